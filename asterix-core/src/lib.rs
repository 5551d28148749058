//! # asterix-core
//!
//! Bit-level primitives shared by the rest of the ASTERIX decoder workspace:
//! the [`cursor::BitCursor`] that reads directly from an input buffer, the
//! [`codec`] module that turns raw bits into typed [`value::Value`]s, the
//! decoded-value tree ([`value::DecodedItem`]), and the decode error
//! taxonomy ([`error`]).
//!
//! This crate has **zero external dependencies** and relies only on the
//! Rust standard library — the same property the workspace's original
//! runtime crate documented, preserved here because the innermost,
//! per-bit-read component of an AL-3 decoder is exactly where an
//! unreviewed transitive dependency is least welcome.
//!
//! ## Example
//!
//! ```rust
//! use asterix_core::cursor::BitCursor;
//! use asterix_core::codec::{decode_field, CodecKind};
//!
//! let bytes = [0x19, 0xC9];
//! let mut cursor = BitCursor::from_slice(&bytes);
//! let sac = decode_field(&CodecKind::Unsigned, cursor.read_bits_be(8).unwrap(), 8);
//! let sic = decode_field(&CodecKind::Unsigned, cursor.read_bits_be(8).unwrap(), 8);
//! assert_eq!(sac, asterix_core::value::Value::Unsigned(0x19));
//! assert_eq!(sic, asterix_core::value::Value::Unsigned(0xC9));
//! ```

pub mod codec;
pub mod cursor;
pub mod error;
pub mod value;

pub use cursor::BitCursor;
pub use error::{CursorError, DecodeError, ErrorKind};
pub use value::{DecodedItem, Value};
