//! # Posts Shared
//!
//! Wire types shared by the posts API and its clients.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorCode, ErrorResponse};
