//! # Portal Shared
//!
//! Wire types of the portal HTTP API: request bodies, query strings and
//! response payloads, plus the RFC 7807 problem document returned on errors.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
