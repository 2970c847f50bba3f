//! Hardware-free control logic for the stick locator
//!
//! Everything in here is pure over plain values: the alert state machine,
//! the pulse-width-to-distance law, request parsing and routing. The
//! firmware crate wraps these in GPIO and socket handling; this crate
//! builds and tests on the host.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod http;
pub mod sample;
pub mod state;
