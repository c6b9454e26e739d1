//! Redis error to HTTP error conversion.

use super::http_error::{Error as HttpError, ErrorKind};

impl From<nvisy_redis::Error> for HttpError<'static> {
    fn from(redis_error: nvisy_redis::Error) -> Self {
        // Timeouts and dropped connections.
        if redis_error.is_transient() {
            return ErrorKind::ServiceUnavailable
                .with_message("Cache service temporarily unavailable")
                .with_context(redis_error.to_string());
        }

        match redis_error {
            nvisy_redis::Error::Config(_)
            | nvisy_redis::Error::InvalidSetting { .. }
            | nvisy_redis::Error::InvalidUrl(_) => ErrorKind::InternalServerError
                .with_message("Cache service is misconfigured")
                .with_context(redis_error.to_string()),

            _ => ErrorKind::InternalServerError
                .with_message("Cache operation failed")
                .with_context(redis_error.to_string()),
        }
    }
}
