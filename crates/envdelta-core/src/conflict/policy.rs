//! Resolution policies and the injected prompt capability
//!
//! The engine never talks to a terminal or a browser itself. Interactive
//! resolution goes through a [`ConflictPrompt`] supplied by the adapter; the
//! CLI implements it with a terminal list prompt, tests with
//! [`ScriptedPrompt`].

use crate::conflict::model::{Choice, Resolution};
use crate::errors::{EnvDeltaError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Asks a user how to resolve one conflicting key.
///
/// Called once per conflict, strictly in ascending key order. An
/// implementation signals that the user aborted by returning
/// [`EnvDeltaError::ResolutionCancelled`].
#[async_trait]
pub trait ConflictPrompt: Send + Sync {
    /// Return the user's choice for `key`.
    ///
    /// # Errors
    ///
    /// - `ResolutionCancelled` if the user aborted
    /// - `Prompt` if the input source failed
    async fn ask(&self, key: &str, local_value: &str, remote_value: &str) -> Result<Choice>;
}

/// How [`resolve`](crate::conflict::resolve) obtains a choice for each conflict.
pub enum ResolutionPolicy<'a> {
    /// Ask the injected prompt for every conflict, in key order
    Interactive(&'a dyn ConflictPrompt),
    /// Keep the local value for every conflict
    AlwaysLocal,
    /// Take the remote value for every conflict
    AlwaysRemote,
    /// Use a caller-supplied map, which must cover every conflict
    Explicit(Resolution),
}

impl std::fmt::Debug for ResolutionPolicy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionPolicy::Interactive(_) => f.write_str("Interactive"),
            ResolutionPolicy::AlwaysLocal => f.write_str("AlwaysLocal"),
            ResolutionPolicy::AlwaysRemote => f.write_str("AlwaysRemote"),
            ResolutionPolicy::Explicit(r) => f.debug_tuple("Explicit").field(r).finish(),
        }
    }
}

/// Replays a fixed sequence of answers and records which keys were asked.
///
/// `None` in the script cancels at that point; running out of answers also
/// cancels.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: Mutex<VecDeque<Option<Choice>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Option<Choice>>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Keys asked so far, in call order
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ConflictPrompt for ScriptedPrompt {
    async fn ask(&self, key: &str, _local_value: &str, _remote_value: &str) -> Result<Choice> {
        self.asked
            .lock()
            .map(|mut a| a.push(key.to_string()))
            .ok();

        let next = self
            .answers
            .lock()
            .map_err(|e| EnvDeltaError::Prompt {
                message: e.to_string(),
            })?
            .pop_front()
            .flatten();

        next.ok_or_else(|| EnvDeltaError::ResolutionCancelled {
            key: key.to_string(),
        })
    }
}
