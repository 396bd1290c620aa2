//! The top-level driver loop.
//!
//! Owns the session: it pulls one unit at a time from the parser,
//! dispatches it to the backend, and keeps the session alive across
//! recoverable failures.

pub mod driver;
