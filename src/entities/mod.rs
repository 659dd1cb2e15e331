//! Entity type definitions

pub mod hardware;

pub use hardware::HardwareRecord;
