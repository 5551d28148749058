//! # asterix-schema
//!
//! The declarative schema half of the decoder: an XML data model for
//! (Category, edition) definitions, a [`loader`] that turns XML into a
//! validated in-memory [`model::Category`] without ever panicking on a
//! malformed source, and an immutable [`registry::CategoryRegistry`] that
//! the decoder consults at decode time.
//!
//! Schemas are data, never generated code: there is no build-time step
//! here, only a runtime parse-validate-register pipeline.

pub mod error;
pub mod loader;
pub mod model;
pub mod registry;
mod xml;

pub use error::SchemaError;
pub use loader::{load_all, load_str};
pub use model::{BitField, Category, Edition, ItemDef, ItemFormat, Rule, Uap, UapSlot, VariablePart};
pub use registry::CategoryRegistry;
