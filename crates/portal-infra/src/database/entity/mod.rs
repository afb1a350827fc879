//! SeaORM entities mirroring the domain records.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;
pub mod waitlist;
