use std::fmt;

use serde::Serialize;

/// Market sentiment bucket for a 0-100 fear & greed reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FearGreedStatus {
    Loading,
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedStatus {
    /// A missing or zero reading means the index hasn't been fetched yet
    pub fn from_index(index: Option<u32>) -> Self {
        match index {
            None | Some(0) => FearGreedStatus::Loading,
            Some(i) if i <= 25 => FearGreedStatus::ExtremeFear,
            Some(i) if i <= 45 => FearGreedStatus::Fear,
            Some(i) if i <= 55 => FearGreedStatus::Neutral,
            Some(i) if i <= 75 => FearGreedStatus::Greed,
            Some(_) => FearGreedStatus::ExtremeGreed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FearGreedStatus::Loading => "Loading",
            FearGreedStatus::ExtremeFear => "Extreme Fear",
            FearGreedStatus::Fear => "Fear",
            FearGreedStatus::Neutral => "Neutral",
            FearGreedStatus::Greed => "Greed",
            FearGreedStatus::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for FearGreedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
