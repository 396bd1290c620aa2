//! Code generation and execution backends.
//!
//! The driver loop hands each parsed unit to a [`backend::Backend`]. Two
//! are provided:
//!
//! - [`eval::Evaluator`]: immediate execution. Named definitions stay
//!   loaded for the session; anonymous top-level expressions are loaded,
//!   invoked once and unloaded again.
//! - [`emit::ModuleEmitter`]: batch mode. Units accumulate into one
//!   persistent module listing written out at session end.

pub mod backend;
pub mod builtins;
pub mod emit;
pub mod eval;
