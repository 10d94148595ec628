//! Core types shared across envdelta facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities and by the diff/merge engine:
//!
//! - **Sensitive data**: `Sensitive<T>` marker for automatic redaction of
//!   variable values
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod sensitive;

pub use sensitive::{Sensitive, REDACTED};
