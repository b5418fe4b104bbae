pub mod envelope;

pub use envelope::{ApiEnvelope, ApiErrorBody};
