pub mod price_lookup;
pub mod price_index;
pub mod ranges;
pub mod analyzer;
pub mod fear_greed;
