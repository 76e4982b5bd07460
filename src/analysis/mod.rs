pub mod aggregate;
pub mod analyzer;
pub mod config;
pub mod correlate;
pub mod gate;
pub mod ingest;
pub mod statistics;
