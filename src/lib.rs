//! Chorded kana keyboard engine.
//!
//! Re-exports the core crate and owns process-level setup (tracing).

pub mod trace_init;

pub use chord_core::{corpus, kana, layout, search, settings, stroke, timing};
pub use trace_init::{init_tracing, TraceGuard};
