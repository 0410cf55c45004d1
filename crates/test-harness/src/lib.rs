//! Test harness for the part generation pipeline.
//!
//! Provides programmatic tools for scripting generation scenarios
//! against the mock kernel and verifying labels at every step.
//!
//! # Key Components
//!
//! - [`PartBuilder`] — scripted stock/feature/extract workflow
//! - [`assertions`] — assertion helpers with diagnostic context

pub mod assertions;
pub mod helpers;

pub use helpers::{HarnessError, PartBuilder};
