//! EncodeLab server library.
//!
//! Data management backend for video encoding experiments: experiment
//! aggregates with their sequences, result file storage, and the
//! network/encoder/video catalogs.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
