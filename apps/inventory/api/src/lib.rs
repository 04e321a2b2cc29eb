//! Inventory API: wiring of the domain crates into one HTTP service.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;
