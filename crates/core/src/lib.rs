//! Core business logic for lumbr.

pub mod services;

pub use services::*;
