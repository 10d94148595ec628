pub mod diff;
pub mod merge;
pub mod summary;

use envdelta_core::EnvDeltaError;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// True if the error is the user aborting an interactive resolution
pub fn is_cancellation(err: &(dyn std::error::Error + 'static)) -> bool {
    err.downcast_ref::<EnvDeltaError>()
        .is_some_and(EnvDeltaError::is_cancellation)
}
