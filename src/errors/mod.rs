//! Error types and error handling for the front end.
//!
//! This module defines the single error type used throughout the session:
//!
//! - Syntax errors carry the position of the offending token
//! - Semantic errors raised while executing a unit carry no position
//!   (the source is gone by then)
//! - I/O failures are the only fatal kind; everything else is recovered
//!   by the driver loop

pub mod errors;
