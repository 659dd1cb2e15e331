//! oreg: Operando sample environment registry
//!
//! Loads a JSON registry of laboratory sample environments, filters it by
//! technique, instrument and capability, and derives the comparison cards,
//! compatibility matrix and export artifacts shown by the `oreg` CLI.

pub mod cli;
pub mod core;
pub mod entities;
