//! Analysis request body and its validation
//!
//! The request arrives as loosely-typed JSON from a browser form. Decoding
//! goes through `serde_json::Value` first and every field is checked by hand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Validated analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Interview questions as one text blob
    pub questions: String,

    /// US state names, in the order the caller listed them
    pub states: Vec<String>,
}

impl AnalysisRequest {
    /// Create a request from already-typed values
    pub fn new(questions: impl Into<String>, states: Vec<String>) -> Self {
        Self {
            questions: questions.into(),
            states,
        }
    }

    /// Decode and validate a raw JSON request body
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(ValidationError::EmptyBody);
        }

        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationError::MalformedJson(e.to_string()))?;

        let Value::Object(mut fields) = value else {
            return Err(ValidationError::MalformedJson(
                "request body must be a JSON object".to_string(),
            ));
        };

        let questions = questions_text(fields.remove("questions"))?;
        let states = state_names(fields.remove("states"))?;

        let request = Self { questions, states };
        request.validate()?;
        Ok(request)
    }

    /// Validate the request
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.questions.trim().is_empty() {
            return Err(ValidationError::MissingField("questions"));
        }

        if self.states.is_empty() {
            return Err(ValidationError::NoStates);
        }
        if let Some(index) = self.states.iter().position(|s| s.trim().is_empty()) {
            return Err(ValidationError::InvalidState(index));
        }

        Ok(())
    }
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("request body is empty")]
    EmptyBody,

    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("questions must be a string or an array of strings")]
    InvalidQuestions,

    #[error("states must be an array")]
    StatesNotArray,

    #[error("states must list at least one state")]
    NoStates,

    #[error("states[{0}] must be a non-empty string")]
    InvalidState(usize),
}

fn questions_text(value: Option<Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => Err(ValidationError::MissingField("questions")),
        Some(Value::String(text)) => Ok(text),
        Some(Value::Array(items)) => {
            let lines = items
                .into_iter()
                .map(|item| match item {
                    Value::String(line) => Ok(line),
                    _ => Err(ValidationError::InvalidQuestions),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(lines.join("\n"))
        }
        Some(_) => Err(ValidationError::InvalidQuestions),
    }
}

fn state_names(value: Option<Value>) -> Result<Vec<String>, ValidationError> {
    let Some(Value::Array(items)) = value else {
        return Err(ValidationError::StatesNotArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(name) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            _ => Err(ValidationError::InvalidState(index)),
        })
        .collect()
}
