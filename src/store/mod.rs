//! Persistent key-value storage
//!
//! All durable state lives as one JSON file per key under the platform data
//! directory. The store owns the key namespace and the (de)serialization;
//! nothing else touches the files. There is no cross-process locking: two
//! processes sharing the namespace are last-writer-wins, a documented
//! limitation rather than something the store guards against.

pub mod model;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use model::{HistoryEntry, PerformanceData, RetryRequest};

/// The fixed key namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey {
    PracticeHistory,
    PerformanceData,
    QuestionCount,
    CorrectCount,
    RetryRequest,
}

impl StoreKey {
    /// Every key in the namespace, for `clear_all`
    pub const ALL: [StoreKey; 5] = [
        StoreKey::PracticeHistory,
        StoreKey::PerformanceData,
        StoreKey::QuestionCount,
        StoreKey::CorrectCount,
        StoreKey::RetryRequest,
    ];

    /// File name backing this key
    pub fn file_name(self) -> &'static str {
        match self {
            StoreKey::PracticeHistory => "practice_history.json",
            StoreKey::PerformanceData => "performance_data.json",
            StoreKey::QuestionCount => "question_count.json",
            StoreKey::CorrectCount => "correct_count.json",
            StoreKey::RetryRequest => "retry_question.json",
        }
    }
}

/// Typed wrapper over the per-key JSON files
#[derive(Debug, Clone)]
pub struct PersistentStore {
    dir: PathBuf,
}

impl PersistentStore {
    /// Open the store at the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self { dir: Config::data_dir()? })
    }

    /// Open the store at an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }

    /// Serialize `value` as JSON under `key`
    pub fn save<T: Serialize>(&self, key: StoreKey, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory {:?}", self.dir))?;

        let contents = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", key.file_name()))?;

        let path = self.path(key);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {:?}", path))?;

        Ok(())
    }

    /// Load the value under `key`, or `default` when missing or corrupted
    ///
    /// A stored value that no longer parses is treated as absent. It is
    /// logged and the default returned; readers never see the error.
    pub fn load<T: DeserializeOwned>(&self, key: StoreKey, default: T) -> T {
        let path = self.path(key);

        let Ok(contents) = std::fs::read_to_string(&path) else {
            return default;
        };

        match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Discarding corrupted {}: {}", key.file_name(), e);
                default
            }
        }
    }

    /// Delete the value under `key`, if any
    pub fn remove(&self, key: StoreKey) -> Result<()> {
        let path = self.path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {:?}", path))?;
        }
        Ok(())
    }

    /// Remove every key in the namespace
    ///
    /// Deletions are independent; order is irrelevant since the keys are
    /// disjoint files.
    pub fn clear_all(&self) -> Result<()> {
        for key in StoreKey::ALL {
            self.remove(key)?;
        }
        Ok(())
    }

    /// The stored practice history, oldest first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.load(StoreKey::PracticeHistory, Vec::new())
    }

    /// The legacy per-topic running accuracy map
    pub fn performance(&self) -> PerformanceData {
        self.load(StoreKey::PerformanceData, PerformanceData::default())
    }

    /// Total answers submitted
    pub fn question_count(&self) -> u32 {
        self.load(StoreKey::QuestionCount, 0)
    }

    /// Answers the backend judged correct
    pub fn correct_count(&self) -> u32 {
        self.load(StoreKey::CorrectCount, 0)
    }

    /// Consume the pending retry request, deleting it from the store
    ///
    /// Consume-once: the request is removed before it is returned, so a
    /// second call sees nothing.
    pub fn take_retry_request(&self) -> Option<RetryRequest> {
        let retry: Option<RetryRequest> = self.load(StoreKey::RetryRequest, None);
        if retry.is_some() {
            if let Err(e) = self.remove(StoreKey::RetryRequest) {
                tracing::warn!("Failed to clear retry request: {e}");
            }
        }
        retry
    }
}
