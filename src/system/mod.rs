//! Core system components for locator operation
pub mod alert;
pub mod config;
pub mod event;
pub mod listener;
pub mod rangefinder;
pub mod resources;
pub mod status;
