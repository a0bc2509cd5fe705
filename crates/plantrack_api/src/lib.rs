//! Host-facing facade over `plantrack_core`.
//!
//! Every call takes JSON text and answers with an [`ApiResponse`] envelope,
//! so hosts never link against core types directly.

pub mod api;
pub mod view;

pub use api::*;
