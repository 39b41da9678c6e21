//! SeaORM entity definitions for PostgreSQL database.

pub mod encoder;
pub mod experiment;
pub mod experiment_sequence;
pub mod input_video;
pub mod network;
pub mod result_file;
pub mod user;
