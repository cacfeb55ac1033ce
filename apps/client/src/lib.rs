//! Shortlist — client SDK for the resume-screening backend.
//!
//! The library side is kept free of terminal concerns: [`api::ApiClient`]
//! speaks the REST protocol (with transparent token refresh),
//! [`analyze`] holds the validation and submission flow, and [`render`]
//! turns typed payloads into printable reports.

pub mod analyze;
pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod render;
pub mod session;
