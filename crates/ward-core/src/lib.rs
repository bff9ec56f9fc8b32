//! # ward-core
//!
//! Core types and helpers shared across the Wardline pipeline crates.
//!
//! This crate provides:
//! - Entity structs for the pipeline's data model (properties, violation
//!   events, 311 requests, risk scores, district summaries, trend rows)
//! - Ordinal severity and other enums with stable string forms
//! - Deterministic property-key derivation
//! - Per-stage quality accounting (`QualityReport`)
//!
//! Stage-specific errors live in their respective crates; the CLI is where
//! they converge into `anyhow`.

pub mod entities;
pub mod enums;
pub mod keys;
pub mod quality;
