pub mod types;
pub mod holdings;
