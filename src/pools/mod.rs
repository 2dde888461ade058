pub mod types;
pub mod validation;
pub mod metrics;
pub mod summary;
pub mod pool_constants;
