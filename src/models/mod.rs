pub mod report;

// Re-export commonly used types
pub use report::{Holder, NormalizedReport, PrimaryRisk, TokenIdentifier};
