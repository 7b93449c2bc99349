//! Event and response types shared by the handlers

pub mod envelope;
pub mod error;
pub mod events;
pub mod json;

pub use envelope::ResponseEnvelope;
pub use error::{ApiError, ApiErrorResponse};
pub use events::{HttpEvent, S3Event, MISSING_QUERY_MESSAGE};
pub use json::Json;
