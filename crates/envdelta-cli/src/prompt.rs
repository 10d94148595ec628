//! Terminal conflict prompt

use async_trait::async_trait;
use envdelta_core::{Choice, ConflictPrompt, EnvDeltaError, Result};
use inquire::{InquireError, Select};

const KEEP_LOCAL: &str = "Keep local value";
const USE_REMOTE: &str = "Use remote value";

/// Asks on the terminal with a two-option list. Esc or Ctrl-C cancels.
pub struct TerminalPrompt;

#[async_trait]
impl ConflictPrompt for TerminalPrompt {
    async fn ask(&self, key: &str, local_value: &str, remote_value: &str) -> Result<Choice> {
        let message = format!(
            "Conflict on {} (local: {}, remote: {})",
            key, local_value, remote_value
        );

        // inquire blocks on stdin
        let answer = tokio::task::spawn_blocking(move || {
            Select::new(&message, vec![KEEP_LOCAL, USE_REMOTE]).prompt()
        })
        .await
        .map_err(|e| EnvDeltaError::Prompt {
            message: e.to_string(),
        })?;

        match answer {
            Ok(KEEP_LOCAL) => Ok(Choice::KeepLocal),
            Ok(_) => Ok(Choice::TakeRemote),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Err(EnvDeltaError::ResolutionCancelled {
                    key: key.to_string(),
                })
            }
            Err(e) => Err(EnvDeltaError::Prompt {
                message: e.to_string(),
            }),
        }
    }
}
