use asterix_core::codec::CodecKind;

/// How often an item's presence can vary within a record (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Mandatory,
    Optional,
    Conditional,
}

/// One field within a fixed-width block (a `Fixed` item, one `Variable`
/// part, or a `Repetitive` element). `is_spare` fields still consume their
/// width but are dropped from the decoded output (spec §3: UAP slots can be
/// spare; the same idea applies one level down, inside an item's own
/// bit layout).
#[derive(Debug, Clone, PartialEq)]
pub struct BitField {
    pub name: String,
    pub width_bits: u32,
    pub codec: CodecKind,
    pub unit: Option<String>,
    pub is_spare: bool,
}

/// The five data item formats (spec §3 / §4.3).
#[derive(Debug, Clone, PartialEq)]
pub enum ItemFormat {
    Fixed { byte_length: usize, fields: Vec<BitField> },
    /// Ordered FX-chained parts; each part is `byte_length` bytes wide and
    /// its fields occupy every bit except the LSB of its last byte, which
    /// is the FX continuation flag.
    Variable { parts: Vec<VariablePart> },
    /// One element is `element_byte_length` bytes; the element count comes
    /// from a REP byte read at decode time, not from the schema.
    Repetitive { element_byte_length: usize, fields: Vec<BitField> },
    /// Sub-items addressed by a nested FSPEC, in declaration order.
    Compound { sub_items: Vec<ItemDef> },
    /// Length-prefixed opaque bytes, optionally re-decoded with a nested
    /// format (e.g. Reserved Expansion fields that carry their own layout).
    Explicit { nested: Option<Box<ItemFormat>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariablePart {
    pub byte_length: usize,
    pub fields: Vec<BitField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub rule: Rule,
    pub format: ItemFormat,
}

/// A single position in a UAP's FSPEC bit ordering (spec §4.4: slot *k*
/// corresponds to FSPEC bit position *k*, numbered across FX-extended
/// bytes at 7 data bits per byte — the FX bit itself is never a slot).
#[derive(Debug, Clone, PartialEq)]
pub enum UapSlot {
    Item(String),
    Spare,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Uap {
    pub slots: Vec<UapSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edition {
    pub tag: String,
    pub uap: Uap,
    pub items: Vec<ItemDef>,
}

impl Edition {
    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|i| i.id == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: u8,
    pub editions: Vec<Edition>,
}

impl Category {
    /// The edition selected by an exact tag match.
    pub fn edition(&self, tag: &str) -> Option<&Edition> {
        self.editions.iter().find(|e| e.tag == tag)
    }

    /// The lexicographically greatest edition tag, used as the
    /// `edition_policy = Latest` default (spec §6).
    pub fn latest_edition(&self) -> Option<&Edition> {
        self.editions.iter().max_by(|a, b| a.tag.cmp(&b.tag))
    }
}
