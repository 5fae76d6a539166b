//! Threshold-band classification and grade aggregation.

mod aggregate;
mod engine;
mod grade;
mod insights;

pub use aggregate::aggregate;
pub use engine::{GradingEngine, GradingError};
pub use grade::{Grade, Letter, ParseGradeError};
pub use insights::{strengths_and_risks, StrengthsAndRisks};
