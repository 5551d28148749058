//! Serde/`quick-xml` mirror of the on-disk schema format, and the
//! validating transform from that mirror into [`crate::model`] (spec §4.7
//! / §9 "schema is data, not code" — grounded in the teacher's
//! parse-then-validate split, but every invariant violation here produces
//! a [`SchemaError`] instead of a panic).

use serde::Deserialize;

use crate::error::SchemaError;
use crate::model::{BitField, Category, Edition, ItemDef, ItemFormat, Rule, Uap, UapSlot, VariablePart};
use asterix_core::codec::CodecKind;

#[derive(Debug, Deserialize)]
pub struct XmlCategory {
    #[serde(rename = "@id")]
    pub id: u8,
    #[serde(rename = "edition", default)]
    pub editions: Vec<XmlEdition>,
}

#[derive(Debug, Deserialize)]
pub struct XmlEdition {
    #[serde(rename = "@tag")]
    pub tag: String,
    pub uap: XmlUap,
    #[serde(rename = "item", default)]
    pub items: Vec<XmlItem>,
}

#[derive(Debug, Deserialize)]
pub struct XmlUap {
    #[serde(rename = "slot", default)]
    pub slots: Vec<XmlSlot>,
}

#[derive(Debug, Deserialize)]
pub struct XmlSlot {
    #[serde(rename = "@frn")]
    pub frn: u32,
    #[serde(rename = "@item", default)]
    pub item: Option<String>,
    #[serde(rename = "@spare", default)]
    pub spare: bool,
}

#[derive(Debug, Deserialize)]
pub struct XmlItem {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name", default)]
    pub name: String,
    #[serde(rename = "@rule", default = "default_rule")]
    pub rule: String,
    pub fixed: Option<XmlFixed>,
    pub variable: Option<XmlVariable>,
    pub repetitive: Option<XmlRepetitive>,
    pub compound: Option<XmlCompound>,
    pub explicit: Option<XmlExplicit>,
}

fn default_rule() -> String {
    "mandatory".to_string()
}

#[derive(Debug, Deserialize)]
pub struct XmlFixed {
    #[serde(rename = "@bytes")]
    pub bytes: usize,
    #[serde(rename = "field", default)]
    pub fields: Vec<XmlField>,
}

#[derive(Debug, Deserialize)]
pub struct XmlVariable {
    #[serde(rename = "part", default)]
    pub parts: Vec<XmlPart>,
}

#[derive(Debug, Deserialize)]
pub struct XmlPart {
    #[serde(rename = "@bytes")]
    pub bytes: usize,
    #[serde(rename = "field", default)]
    pub fields: Vec<XmlField>,
}

#[derive(Debug, Deserialize)]
pub struct XmlRepetitive {
    #[serde(rename = "@bytes")]
    pub bytes: usize,
    #[serde(rename = "field", default)]
    pub fields: Vec<XmlField>,
}

#[derive(Debug, Deserialize)]
pub struct XmlCompound {
    #[serde(rename = "item", default)]
    pub items: Vec<XmlItem>,
}

#[derive(Debug, Deserialize)]
pub struct XmlExplicit {
    pub nested_item: Option<Box<XmlItem>>,
}

#[derive(Debug, Deserialize)]
pub struct XmlField {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@bits")]
    pub bits: u32,
    #[serde(rename = "@codec", default = "default_codec")]
    pub codec: String,
    #[serde(rename = "@spare", default)]
    pub spare: bool,
    #[serde(rename = "@signed", default)]
    pub signed: bool,
    #[serde(rename = "@scale_num", default)]
    pub scale_num: Option<i64>,
    #[serde(rename = "@scale_den", default)]
    pub scale_den: Option<i64>,
    #[serde(rename = "@unit", default)]
    pub unit: Option<String>,
}

fn default_codec() -> String {
    "unsigned".to_string()
}

/// Parses a raw XML document into the mirror structs without validating
/// any cross-reference invariant.
pub fn parse_xml(xml: &str) -> Result<XmlCategory, SchemaError> {
    quick_xml::de::from_str(xml).map_err(|e| SchemaError::Xml { message: e.to_string() })
}

/// Validates and lowers a parsed category into the immutable [`Category`]
/// model, accumulating every violation found rather than stopping at the
/// first (spec §9).
pub fn build_category(xml: XmlCategory) -> Result<Category, Vec<SchemaError>> {
    let mut errors = Vec::new();
    let mut editions = Vec::new();
    let mut seen_tags = std::collections::HashSet::new();

    for xml_edition in xml.editions {
        if !seen_tags.insert(xml_edition.tag.clone()) {
            errors.push(SchemaError::DuplicateEdition { category: xml.id, edition: xml_edition.tag.clone() });
        }
        match build_edition(xml.id, xml_edition) {
            Ok(edition) => editions.push(edition),
            Err(mut edition_errors) => errors.append(&mut edition_errors),
        }
    }

    if errors.is_empty() { Ok(Category { id: xml.id, editions }) } else { Err(errors) }
}

fn build_edition(category: u8, xml: XmlEdition) -> Result<Edition, Vec<SchemaError>> {
    let mut errors = Vec::new();
    let mut items = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    for xml_item in xml.items {
        if !seen_ids.insert(xml_item.id.clone()) {
            errors.push(SchemaError::DuplicateItemId {
                category,
                edition: xml.tag.clone(),
                item_id: xml_item.id.clone(),
            });
        }
        match build_item(&xml.tag, category, xml_item) {
            Ok(item) => items.push(item),
            Err(mut item_errors) => errors.append(&mut item_errors),
        }
    }

    if xml.uap.slots.is_empty() {
        errors.push(SchemaError::EmptyUap { category, edition: xml.tag.clone() });
    }

    let mut slots = Vec::with_capacity(xml.uap.slots.len());
    let mut seen_frns = std::collections::HashSet::new();
    for slot in &xml.uap.slots {
        if !seen_frns.insert(slot.frn) {
            errors.push(SchemaError::DuplicateUapSlot { category, edition: xml.tag.clone(), frn: slot.frn });
        }
        if slot.spare {
            slots.push(UapSlot::Spare);
        } else if let Some(item_id) = &slot.item {
            if !seen_ids.contains(item_id) {
                errors.push(SchemaError::UnknownUapItemRef {
                    category,
                    edition: xml.tag.clone(),
                    frn: slot.frn,
                    item_id: item_id.clone(),
                });
            }
            slots.push(UapSlot::Item(item_id.clone()));
        } else {
            slots.push(UapSlot::Spare);
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Edition { tag: xml.tag, uap: Uap { slots }, items })
}

fn build_item(edition_tag: &str, category: u8, xml: XmlItem) -> Result<ItemDef, Vec<SchemaError>> {
    let mut errors = Vec::new();
    let rule = match xml.rule.as_str() {
        "mandatory" => Rule::Mandatory,
        "optional" => Rule::Optional,
        "conditional" => Rule::Conditional,
        other => {
            errors.push(SchemaError::InvalidCodec {
                item_id: xml.id.clone(),
                field: "@rule".into(),
                message: format!("unknown rule '{other}'"),
            });
            Rule::Optional
        }
    };

    let format = match (xml.fixed, xml.variable, xml.repetitive, xml.compound, xml.explicit) {
        (Some(f), None, None, None, None) => build_fixed(&xml.id, f, &mut errors),
        (None, Some(v), None, None, None) => build_variable(&xml.id, v, &mut errors),
        (None, None, Some(r), None, None) => build_repetitive(&xml.id, r, &mut errors),
        (None, None, None, Some(c), None) => build_compound(edition_tag, category, &xml.id, c, &mut errors),
        (None, None, None, None, Some(e)) => build_explicit(&xml.id, e, &mut errors),
        _ => {
            errors.push(SchemaError::InvalidCodec {
                item_id: xml.id.clone(),
                field: "<format>".into(),
                message: "item must declare exactly one of fixed/variable/repetitive/compound/explicit".into(),
            });
            ItemFormat::Fixed { byte_length: 0, fields: Vec::new() }
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ItemDef { id: xml.id, name: xml.name, rule, format })
}

fn build_field(item_id: &str, xml: XmlField, errors: &mut Vec<SchemaError>) -> BitField {
    if xml.bits == 0 {
        errors.push(SchemaError::ZeroWidthField { item_id: item_id.to_string(), field: xml.name.clone() });
    }
    let codec = match xml.codec.as_str() {
        "unsigned" => CodecKind::Unsigned,
        "twos_complement" => CodecKind::TwosComplement,
        "octal" => CodecKind::Octal,
        "ascii" => CodecKind::Ascii,
        "icao6" => CodecKind::Icao6Bit,
        "raw" => CodecKind::Raw,
        "fixed_point" => {
            let scale_num = xml.scale_num.unwrap_or(1);
            let scale_den = xml.scale_den.unwrap_or(1);
            if scale_den == 0 {
                errors.push(SchemaError::InvalidCodec {
                    item_id: item_id.to_string(),
                    field: xml.name.clone(),
                    message: "fixed_point scale_den must not be zero".into(),
                });
            }
            CodecKind::FixedPoint { signed: xml.signed, scale_num, scale_den }
        }
        other => {
            errors.push(SchemaError::InvalidCodec {
                item_id: item_id.to_string(),
                field: xml.name.clone(),
                message: format!("unknown codec '{other}'"),
            });
            CodecKind::Unsigned
        }
    };

    BitField { name: xml.name, width_bits: xml.bits, codec, unit: xml.unit, is_spare: xml.spare }
}

fn build_fixed(item_id: &str, xml: XmlFixed, errors: &mut Vec<SchemaError>) -> ItemFormat {
    let fields: Vec<BitField> = xml.fields.into_iter().map(|f| build_field(item_id, f, errors)).collect();
    let total_bits: u32 = fields.iter().map(|f| f.width_bits).sum();
    if total_bits as usize != xml.bytes * 8 {
        errors.push(SchemaError::FixedWidthMismatch {
            item_id: item_id.to_string(),
            declared_bytes: xml.bytes,
            field_bits: total_bits,
        });
    }
    ItemFormat::Fixed { byte_length: xml.bytes, fields }
}

fn build_variable(item_id: &str, xml: XmlVariable, errors: &mut Vec<SchemaError>) -> ItemFormat {
    let mut parts = Vec::with_capacity(xml.parts.len());
    for (index, part) in xml.parts.into_iter().enumerate() {
        let fields: Vec<BitField> = part.fields.into_iter().map(|f| build_field(item_id, f, errors)).collect();
        let total_bits: u32 = fields.iter().map(|f| f.width_bits).sum();
        // one bit of every part's last byte is the FX continuation flag.
        if total_bits as usize + 1 != part.bytes * 8 {
            errors.push(SchemaError::VariablePartWidthMismatch {
                item_id: item_id.to_string(),
                part_index: index,
                declared_bytes: part.bytes,
                field_bits: total_bits,
            });
        }
        parts.push(VariablePart { byte_length: part.bytes, fields });
    }
    ItemFormat::Variable { parts }
}

fn build_repetitive(item_id: &str, xml: XmlRepetitive, errors: &mut Vec<SchemaError>) -> ItemFormat {
    let fields: Vec<BitField> = xml.fields.into_iter().map(|f| build_field(item_id, f, errors)).collect();
    if fields.is_empty() {
        errors.push(SchemaError::RepetitiveElementEmpty { item_id: item_id.to_string() });
    }
    let total_bits: u32 = fields.iter().map(|f| f.width_bits).sum();
    if total_bits as usize != xml.bytes * 8 {
        errors.push(SchemaError::FixedWidthMismatch {
            item_id: item_id.to_string(),
            declared_bytes: xml.bytes,
            field_bits: total_bits,
        });
    }
    ItemFormat::Repetitive { element_byte_length: xml.bytes, fields }
}

fn build_compound(edition_tag: &str, category: u8, item_id: &str, xml: XmlCompound, errors: &mut Vec<SchemaError>) -> ItemFormat {
    if xml.items.is_empty() {
        errors.push(SchemaError::CompoundEmpty { item_id: item_id.to_string() });
    }
    let mut sub_items = Vec::with_capacity(xml.items.len());
    for sub in xml.items {
        match build_item(edition_tag, category, sub) {
            Ok(item) => sub_items.push(item),
            Err(mut sub_errors) => errors.append(&mut sub_errors),
        }
    }
    ItemFormat::Compound { sub_items }
}

fn build_explicit(item_id: &str, xml: XmlExplicit, errors: &mut Vec<SchemaError>) -> ItemFormat {
    let nested = xml.nested_item.map(|nested_item| {
        // Reuse the item builder for the nested layout; identity fields (id/name/rule)
        // are irrelevant here, only its format is kept.
        let nested_id = format!("{item_id}/explicit");
        match build_item("", 0, XmlItem { id: nested_id, ..*nested_item }) {
            Ok(item) => Box::new(item.format),
            Err(mut nested_errors) => {
                errors.append(&mut nested_errors);
                Box::new(ItemFormat::Fixed { byte_length: 0, fields: Vec::new() })
            }
        }
    });
    ItemFormat::Explicit { nested }
}
