//! Application-layer services.
//!
//! # Responsibility
//! - Own dataset snapshots and control state on behalf of views.
//! - Keep the filter and layout engines stateless.

pub mod filter_session;
