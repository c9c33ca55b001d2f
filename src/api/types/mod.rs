//! Request/response types shared by the HTTP handlers

pub mod error;
pub mod json;
pub mod keys;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use keys::{
    ApiKeyRequest, KeyEntryResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse, SuccessResponse,
};
