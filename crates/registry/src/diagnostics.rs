//! Reporting for failures swallowed by the best-effort (`*_or_none`) API.
//!
//! Every swallowed failure becomes a `tracing` event; the subscriber's
//! `EnvFilter` decides what is shown.

use std::any::Any;

use tracing::{error, warn};

use crate::MockupError;

/// Emit a failure that is about to be converted into `None`.
///
/// Defects (unconstructible or empty providers) go out at `error`, everything
/// else at `warn`.
pub(crate) fn report_discarded(operation: &'static str, failure: &MockupError) {
    if failure.is_internal() {
        error!(operation, error = %failure, "mockup provider defect; returning None");
    } else {
        warn!(operation, error = %failure, "returning None");
    }
}

/// Emit a panic raised while decoding, after it has been caught.
pub(crate) fn report_decode_panic(operation: &'static str, type_name: &'static str, message: &str) {
    warn!(operation, type_name, panic = message, "decoder panicked; returning None");
}

/// Text carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
