//! Domain records consumed and derived by the dashboard engines.
//!
//! # Responsibility
//! - Define the opaque record shape received from the REST API.
//! - Define derived projections (calendar events, timeline items).
//! - Name the record fields the derivations depend on.
//!
//! # Invariants
//! - Records are never mutated by core; derived values are rebuilt per call.
//! - Derived projections only borrow their source records.

pub mod event;
pub mod fields;
pub mod record;
pub mod status;
pub mod timeline;
