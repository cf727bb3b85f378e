use crate::error::ApiError;

// No route matched the path
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

// Path matched but not with this method
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
