//! Infrastructure layer: concrete implementations of the domain traits and
//! the wire formats.

pub mod dto;
pub mod quote;
pub mod repository;
