pub mod config;
pub mod logging;
pub mod pools;
pub mod prices;
pub mod spot;
pub mod store;
