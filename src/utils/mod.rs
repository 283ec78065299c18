pub mod error;
pub mod logger;
pub mod monitor;
pub mod pricing;
pub mod validation;
