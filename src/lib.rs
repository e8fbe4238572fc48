pub mod configuration;
pub mod document;
pub mod error;
pub mod startup;
pub mod store;
pub mod telemetry;
