//! Domain types and pure logic for the actor wardrobe app.
//!
//! This crate has **zero I/O**: the draft model, client-side validation,
//! image descriptor resolution and the record shapes returned by the
//! backend all live here so they can be tested without a runtime.

pub mod actor;
pub mod error;
pub mod image;
pub mod record;
pub mod types;
