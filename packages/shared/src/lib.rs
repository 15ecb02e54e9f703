//! Helpers shared by the Stockroom binaries.

pub mod logger;
