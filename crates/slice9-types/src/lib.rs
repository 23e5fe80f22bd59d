//! Foundation types and traits for slice9.
//!
//! This crate contains the platform-agnostic types shared by all slice9
//! crates: integer geometry, colors, input events, backend trait
//! definitions, and error types.

pub mod backend;
pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
