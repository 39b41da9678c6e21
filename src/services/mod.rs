//! Business logic services.

pub mod experiments;
pub mod results;
pub mod storage;
pub mod videos;
