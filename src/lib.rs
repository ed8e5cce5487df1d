//! Energy asset board: sector classification, dashboard cards and form
//! validation over the `/api/v1/assets` REST contract.

/// Asset domain types and the pure classifier, presenter and validator.
pub mod assets;
pub mod board;
pub mod config;
pub mod error;
pub mod io;
pub mod source;

#[cfg(feature = "stub")]
pub mod stub;

#[cfg(feature = "tui")]
pub mod tui;
