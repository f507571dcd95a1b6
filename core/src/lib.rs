//! Synthetic sales data generation and aggregation for the
//! Federal vs Non-Federal sales dashboard.

pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod generator;
pub mod name_generator;
pub mod record;
pub mod rng;
pub mod session;
pub mod types;
