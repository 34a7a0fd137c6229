//! Middleware for authentication and request tracking

pub mod auth;
pub mod request_tracking;
pub mod token;

pub use auth::TokenAuth;
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, SENSITIVE_HEADERS,
};
pub use token::{extract_token, Claims, StaticTokenValidator, TokenValidator};
