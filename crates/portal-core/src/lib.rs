//! # Portal Core
//!
//! The domain layer of the Evolance research portal.
//! Entities, ports and the services built on top of them. No infrastructure
//! dependencies live here; storage and crypto are reached through traits.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use policy::AccessPolicy;
