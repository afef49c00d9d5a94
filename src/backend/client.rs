//! HTTP client for the quiz backend

use reqwest::Client;

use super::error::BackendError;
use super::models::{
    ErrorResponse, EvaluateAnswerRequest, Evaluation, GenerateQuestionsRequest,
    GenerateQuestionsResponse,
};

/// Client for the two quiz backend endpoints
pub struct QuizBackend {
    /// HTTP client
    client: Client,
    /// Base URL, e.g. `http://127.0.0.1:5000`
    base_url: String,
}

impl QuizBackend {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url: base_url.into() }
    }

    /// Ask the backend to generate up to `num_questions` questions on `topic`
    ///
    /// An empty list is a legitimate zero-result success.
    pub async fn generate_questions(
        &self,
        topic: &str,
        num_questions: u32,
    ) -> Result<Vec<String>, BackendError> {
        let request = GenerateQuestionsRequest {
            topic: topic.to_string(),
            num_questions,
        };

        let response = self
            .client
            .post(format!("{}/generate_question", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
                "Failed to generate questions",
            ));
        }

        let body: GenerateQuestionsResponse = response.json().await?;
        Ok(body.questions)
    }

    /// Send an answer for evaluation
    pub async fn evaluate_answer(
        &self,
        question: &str,
        student_answer: &str,
    ) -> Result<Evaluation, BackendError> {
        let request = EvaluateAnswerRequest {
            question: question.to_string(),
            student_answer: student_answer.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/evaluate_answer", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(
                status.as_u16(),
                response.text().await.unwrap_or_default(),
                "Failed to evaluate answer",
            ));
        }

        let evaluation: Evaluation = response.json().await?;
        Ok(evaluation)
    }

    /// Build an ApiError from a non-2xx body, preferring the backend's
    /// own `error` field over the generic fallback
    fn api_error(status: u16, body: String, fallback: &str) -> BackendError {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| fallback.to_string());

        BackendError::ApiError { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let backend = QuizBackend::new("http://127.0.0.1:5000");
        assert_eq!(backend.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn api_error_prefers_backend_message() {
        let err = QuizBackend::api_error(
            500,
            r#"{"error": "no API key configured"}"#.to_string(),
            "Failed to generate questions",
        );
        assert_eq!(err.user_message(), "no API key configured");
    }

    #[test]
    fn api_error_falls_back_on_unparseable_body() {
        let err =
            QuizBackend::api_error(502, "<html>bad gateway</html>".to_string(), "Failed to evaluate answer");
        assert_eq!(err.user_message(), "Failed to evaluate answer");
    }

    #[tokio::test]
    async fn unreachable_backend_yields_request_error() {
        // Port 9 (discard) is never serving HTTP on loopback
        let backend = QuizBackend::new("http://127.0.0.1:9");
        let result = backend.generate_questions("Biology", 1).await;
        assert!(matches!(result, Err(BackendError::RequestError(_))));
    }
}
