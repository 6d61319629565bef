//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Short code generation and custom code policy
//! - [`url_validator`] - Destination URL validation
//! - [`request_origin`] - Public origin extraction for short URLs

pub mod code_generator;
pub mod request_origin;
pub mod url_validator;
