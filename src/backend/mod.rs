//! Quiz backend integration
//!
//! The backend is an external HTTP/JSON service exposing two endpoints:
//! `POST /generate_question` and `POST /evaluate_answer`. This module owns
//! the wire types, the client, and the error taxonomy; nothing here mutates
//! local state.

pub mod client;
pub mod error;
pub mod models;

pub use client::QuizBackend;
pub use error::BackendError;
pub use models::Evaluation;
