//! # Atelier DTCG - Legacy Token Schema Converter
//!
//! Older Atelier token files describe a token with plain `value`, `type` and
//! `description`/`comment` fields. The Design Tokens Community Group format
//! uses `$`-prefixed metadata keys instead. This crate converts the former
//! into the latter while keeping every other key, the nesting and the member
//! order intact.
//!
//! ```rust
//! use atelier_dtcg::convert_json;
//!
//! let legacy = r##"{"color": {"brand": {"value": "#007bff", "type": "color", "comment": "c"}}}"##;
//! let converted = convert_json(legacy).unwrap();
//!
//! assert_eq!(
//!     converted,
//!     r##"{
//!   "color": {
//!     "brand": {
//!       "$value": "#007bff",
//!       "$type": "color",
//!       "$description": "c"
//!     }
//!   }
//! }"##
//! );
//! ```
//!
//! Malformed input is reported to the caller only:
//!
//! ```rust
//! use atelier_dtcg::{convert_json, DtcgError};
//!
//! assert!(matches!(convert_json("{ nope"), Err(DtcgError::InvalidJson(_))));
//! ```

mod convert;
mod error;
mod node;

pub use convert::{convert, convert_value};
pub use error::{DtcgError, Result};
pub use node::TokenNode;

/// Parses `input`, converts it and returns pretty-printed JSON (two-space
/// indentation).
pub fn convert_json(input: &str) -> Result<String> {
    let tree: TokenNode = serde_json::from_str(input)?;
    let converted = convert(tree);
    serde_json::to_string_pretty(&converted).map_err(DtcgError::Serialize)
}
