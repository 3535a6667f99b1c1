//! Inbound adapters turning external formats into domain values.

pub mod csv;
pub mod scenario;
