//! Infrastructure services

mod index_bootstrap_service;

pub use index_bootstrap_service::{BootstrapReport, IndexBootstrapService};
