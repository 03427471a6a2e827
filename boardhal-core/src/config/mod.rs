//! Board configuration
//!
//! Pin assignments can be described in a small TOML subset (see
//! [`parse_config`]) and persisted as postcard binary data (see
//! [`encode`]/[`decode`], `serde` feature).

pub mod parse;
#[cfg(feature = "serde")]
pub mod store;
pub mod types;

pub use parse::{parse_config, parse_pin_spec, ParseError, PinSpec};
#[cfg(feature = "serde")]
pub use store::{decode, encode, StoreError};
pub use types::*;
