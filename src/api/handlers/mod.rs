//! Request handlers, one module per resource.

mod categories;
mod questions;
mod quiz;
mod search;
mod system;

#[cfg(test)]
mod categories_test;
#[cfg(test)]
mod quiz_test;
#[cfg(test)]
mod test_support;

pub use categories::*;
pub use questions::*;
pub use quiz::*;
pub use search::*;
pub use system::*;

use crate::api::ApiError;

/// Fallback for routes that do not exist.
pub async fn route_not_found() -> ApiError {
    ApiError::not_found()
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
