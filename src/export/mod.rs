//! Tabular sinks for classified records.

pub mod csv;
