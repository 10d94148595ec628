//! Conflict resolution under a policy.

use crate::conflict::model::{Choice, ConflictSet, Resolution};
use crate::conflict::policy::ResolutionPolicy;
use crate::errors::{EnvDeltaError, Result};
use crate::{log_key_decision, log_op_cancelled, log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Obtain a decision for every conflict in `conflicts`.
///
/// Interactive policies are asked once per conflict in ascending key order.
/// The call either returns a resolution covering every conflict or fails;
/// no partial resolution escapes.
///
/// # Errors
///
/// - `IncompleteResolution` if an explicit map misses conflicting keys (all
///   missing keys are named)
/// - `ResolutionCancelled` if the interactive prompt was aborted
/// - `Prompt` if the interactive prompt failed
pub async fn resolve(conflicts: &ConflictSet, policy: ResolutionPolicy<'_>) -> Result<Resolution> {
    let start = Instant::now();
    log_op_start!("resolve", conflict_count = conflicts.len());

    let result = resolve_inner(conflicts, policy).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    match &result {
        Ok(resolution) => {
            log_op_end!("resolve", duration_ms = duration_ms, resolved = resolution.len());
        }
        Err(EnvDeltaError::ResolutionCancelled { key }) => {
            log_op_cancelled!("resolve", key, duration_ms = duration_ms);
        }
        Err(err) => {
            log_op_error!("resolve", err.clone(), duration_ms = duration_ms);
        }
    }

    result
}

async fn resolve_inner(
    conflicts: &ConflictSet,
    policy: ResolutionPolicy<'_>,
) -> Result<Resolution> {
    match policy {
        ResolutionPolicy::AlwaysLocal => Ok(Resolution::uniform(conflicts, Choice::KeepLocal)),
        ResolutionPolicy::AlwaysRemote => Ok(Resolution::uniform(conflicts, Choice::TakeRemote)),
        ResolutionPolicy::Explicit(map) => {
            let missing: Vec<String> = conflicts
                .keys()
                .filter(|key| !map.contains_key(key))
                .map(str::to_string)
                .collect();
            if !missing.is_empty() {
                return Err(EnvDeltaError::IncompleteResolution { missing });
            }
            // entries for keys that are not in conflict carry no decision
            Ok(map
                .iter()
                .filter(|(key, _)| conflicts.contains(key))
                .collect())
        }
        ResolutionPolicy::Interactive(prompt) => {
            let mut resolution = Resolution::new();
            for conflict in conflicts {
                let choice = prompt
                    .ask(&conflict.key, &conflict.local_value, &conflict.remote_value)
                    .await?;
                log_key_decision!("resolve", conflict.key, choice);
                resolution.insert(conflict.key.clone(), choice);
            }
            Ok(resolution)
        }
    }
}
