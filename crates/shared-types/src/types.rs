#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_risk: RiskLevel,
    pub summary: String,
    pub analyses: Vec<QuestionAnalysis>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalysis {
    pub question: String,
    pub status: QuestionStatus,
    pub risk_level: RiskLevel,
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affected_states: Vec<String>, // Full state names, as sent in the request
    #[serde(default, deserialize_with = "null_as_default")]
    pub legal_basis: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alternative: String, // Empty when the question is already compliant
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RiskLevel {
    #[serde(alias = "low", alias = "LOW")]
    Low,
    #[serde(alias = "medium", alias = "MEDIUM")]
    Medium,
    #[serde(alias = "high", alias = "HIGH")]
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    #[serde(alias = "Compliant", alias = "COMPLIANT")]
    Compliant,
    #[serde(alias = "Problematic", alias = "PROBLEMATIC")]
    Problematic,
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

impl AnalysisResult {
    /// Questions the model flagged as problematic
    pub fn problematic(&self) -> impl Iterator<Item = &QuestionAnalysis> {
        self.analyses
            .iter()
            .filter(|a| a.status == QuestionStatus::Problematic)
    }
}
