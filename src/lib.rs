//! Synthetic plant metric simulator: random-walk metrics, threshold
//! classification and transition alerts, driven by a periodic tick job.

pub mod app_context;
pub mod config;
pub mod engine;
pub mod jobs;
