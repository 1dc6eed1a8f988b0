pub mod request;
pub mod types;

pub use request::{AnalysisRequest, ValidationError};
pub use types::{AnalysisResult, QuestionAnalysis, QuestionStatus, RiskLevel};
