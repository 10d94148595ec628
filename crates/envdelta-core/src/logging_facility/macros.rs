//! Canonical logging macros
//!
//! Operation lifecycle macros (`log_op_start!`, `log_op_end!`,
//! `log_op_error!`, `log_op_cancelled!`) plus `log_key_decision!` for the
//! per-variable trace of resolve and merge. Every field name comes from
//! `envdelta_core_types::schema`. A variable value is never a field; callers
//! pass keys, choices and counts only.

/// Log the start of an operation
///
/// Extra fields are sizes such as `local_len` or `conflict_count`.
///
/// # Example
///
/// ```
/// # use envdelta_core::log_op_start;
/// log_op_start!("merge");
/// log_op_start!("merge", local_len = 3usize, remote_len = 4usize);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($count:ident = $value:expr),+ $(,)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_START,
            $($count = $value),+
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use envdelta_core::log_op_end;
/// log_op_end!("merge", duration_ms = 42);
/// log_op_end!("merge", duration_ms = 42, conflict_count = 1usize, merged_len = 4usize);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($count:ident = $value:expr),+ $(,)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($count = $value),+
        );
    };
}

/// Log an operation error
///
/// The error is converted into an `ExError`; its stable kind and code are
/// recorded along with how many variable keys it names.
///
/// # Example
///
/// ```
/// # use envdelta_core::{log_op_error, errors::EnvDeltaError};
/// let err = EnvDeltaError::UnresolvedConflict { keys: vec!["A".to_string()] };
/// log_op_error!("merge", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            key_count = ex_err.keys().map_or(0, <[String]>::len),
        );
    }};
}

/// Log an operation the user aborted
///
/// Recorded at info level: cancellation is an outcome, not a failure.
///
/// # Example
///
/// ```
/// # use envdelta_core::log_op_cancelled;
/// log_op_cancelled!("resolve", "API_KEY", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_cancelled {
    ($op:expr, $key:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = envdelta_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            key = %$key,
            cancelled = true,
            err_code = $crate::errors::ExErrorKind::ResolutionCancelled.code(),
        );
    };
}

/// Log the choice applied to one conflicting key
///
/// # Example
///
/// ```
/// # use envdelta_core::{log_key_decision, Choice};
/// log_key_decision!("merge", "DB_URL", Choice::TakeRemote);
/// ```
#[macro_export]
macro_rules! log_key_decision {
    ($op:expr, $key:expr, $choice:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            key = %$key,
            choice = %$choice,
        );
    };
}
