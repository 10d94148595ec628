//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Variable identifiers (values are never logged)
pub const FIELD_KEY: &str = "key";
pub const FIELD_CHOICE: &str = "choice";

// Collection sizes
pub const FIELD_LOCAL_LEN: &str = "local_len";
pub const FIELD_REMOTE_LEN: &str = "remote_len";
pub const FIELD_CONFLICT_COUNT: &str = "conflict_count";
pub const FIELD_MERGED_LEN: &str = "merged_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_KEY_COUNT: &str = "key_count";
pub const FIELD_CANCELLED: &str = "cancelled";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
