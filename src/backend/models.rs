//! Wire types for the quiz backend endpoints

use serde::{Deserialize, Serialize};

/// Request body for `POST /generate_question`
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsRequest {
    /// Topic to generate questions for
    pub topic: String,
    /// How many questions to generate (1-5)
    pub num_questions: u32,
}

/// Success body from `POST /generate_question`
///
/// An absent `questions` field deserializes as empty; the caller treats an
/// empty list as a zero-result success, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateQuestionsResponse {
    #[serde(default)]
    pub questions: Vec<String>,
}

/// Request body for `POST /evaluate_answer`
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateAnswerRequest {
    /// Verbatim question text
    pub question: String,
    /// The answer the user typed
    pub student_answer: String,
}

/// Success body from `POST /evaluate_answer`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Evaluation {
    /// Whether the backend judged the answer correct
    pub is_correct: bool,
    /// Feedback text to show the user
    #[serde(default)]
    pub ai_feedback: String,
    /// Canonical answer; may be absent or the literal "N/A"
    #[serde(default)]
    pub correct_answer: Option<String>,
}

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn absent_questions_field_deserializes_as_empty() {
        let response: GenerateQuestionsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.questions.is_empty());
    }

    #[test]
    fn evaluation_tolerates_missing_optional_fields() {
        let evaluation: Evaluation =
            serde_json::from_str(r#"{"is_correct": true}"#).unwrap();
        assert!(evaluation.is_correct);
        assert_eq!(evaluation.ai_feedback, "");
        assert_eq!(evaluation.correct_answer, None);
    }

    #[test]
    fn generate_request_serializes_snake_case() {
        let request =
            GenerateQuestionsRequest { topic: "Biology".into(), num_questions: 3 };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"num_questions\":3"));
        assert!(json.contains("\"topic\":\"Biology\""));
    }
}
