pub mod enums;
pub mod error;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use enums::SentimentClass;
pub use error::CoreError;
pub use records::{DailyAggregate, MergedRow, SentimentRecord, TradeRecord};
