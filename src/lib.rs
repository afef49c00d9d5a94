//! ScoreUp - a TUI for AI-assisted quiz practice
//!
//! ScoreUp generates practice questions on any topic through an external AI
//! backend, evaluates your answers, and tracks your performance locally:
//! per-topic accuracy, overall statistics, and a browsable answer history.

pub mod app;
pub mod backend;
pub mod config;
pub mod history;
pub mod session;
pub mod stats;
pub mod store;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
