//! # ward-registry
//!
//! The Property Registry Builder: resolves normalized records from the
//! student-housing, SAM, and assessment sources into one canonical
//! `PropertyRecord` per physical property.
//!
//! Resolution is an ordered list of strategies, tried in sequence so the
//! order is auditable and testable in isolation:
//! 1. exact normalized address
//! 2. exact normalized address + district composite
//! 3. Jaccard token-set similarity above a configured threshold
//! 4. synthesized source-prefixed fallback key
//!
//! The builder never drops a record: a record that fails to link across
//! sources is still present under a synthesized key with `unmatched = true`.

pub mod builder;
pub mod error;
pub mod matcher;

pub use builder::RegistryBuilder;
pub use error::RegistryError;
pub use matcher::{AddressIndex, Matcher, Resolution};
