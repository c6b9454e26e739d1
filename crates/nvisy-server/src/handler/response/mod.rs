//! Response types shared by handlers and extractors.

mod error_response;

pub use error_response::ErrorResponse;
