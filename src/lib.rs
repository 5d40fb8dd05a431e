pub mod utils;

#[cfg(feature = "webhook")]
pub mod config;

#[cfg(feature = "webhook")]
pub mod models;

#[cfg(feature = "webhook")]
pub mod gates;

#[cfg(feature = "webhook")]
pub mod execution;

#[cfg(feature = "webhook")]
pub mod error;

// HTTP surface (axum)
#[cfg(feature = "webhook")]
pub mod api;
