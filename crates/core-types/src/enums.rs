use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five classification labels of the daily sentiment index.
///
/// The variant order is the natural sentiment order, so deriving `Ord` gives
/// us "Extreme Fear < ... < Extreme Greed" for free when sorting groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentClass {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl SentimentClass {
    /// All classes in ascending sentiment order.
    pub const ALL: [SentimentClass; 5] = [
        SentimentClass::ExtremeFear,
        SentimentClass::Fear,
        SentimentClass::Neutral,
        SentimentClass::Greed,
        SentimentClass::ExtremeGreed,
    ];

    /// The canonical label as it appears in the sentiment index CSV.
    pub fn label(&self) -> &'static str {
        match self {
            SentimentClass::ExtremeFear => "Extreme Fear",
            SentimentClass::Fear => "Fear",
            SentimentClass::Neutral => "Neutral",
            SentimentClass::Greed => "Greed",
            SentimentClass::ExtremeGreed => "Extreme Greed",
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SentimentClass {
    type Err = CoreError;

    /// Parses a classification label, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extreme fear" => Ok(SentimentClass::ExtremeFear),
            "fear" => Ok(SentimentClass::Fear),
            "neutral" => Ok(SentimentClass::Neutral),
            "greed" => Ok(SentimentClass::Greed),
            "extreme greed" => Ok(SentimentClass::ExtremeGreed),
            other => Err(CoreError::InvalidInput(
                "classification".to_string(),
                other.to_string(),
            )),
        }
    }
}
