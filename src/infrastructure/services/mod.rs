//! Infrastructure services

mod fact_check_service;

pub use fact_check_service::{FactCheckConfig, FactCheckService};
