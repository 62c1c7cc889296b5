//! Core business logic for muse.

pub mod services;

pub use services::*;
