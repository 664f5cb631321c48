//! Maps domain `AppError` to HTTP responses.

// The `IntoResponse` impl for `AppError` lives in `bookhub_core::error`
// alongside the type itself, as required by the orphan rules.
pub use bookhub_core::error::ApiErrorResponse;
