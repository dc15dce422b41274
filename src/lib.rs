#![cfg_attr(not(test), no_std)]

//! hoprx - Frequency-hopping RC receiver firmware core
//!
//! This library provides the platform abstraction, the nRF24L01 radio driver,
//! bind-record persistence and the polling-loop dispatcher of a 2.4 GHz
//! frequency-hopping receiver. The protocol state machines themselves live in
//! the hardware-free `hoprx_core` crate.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Interrupt handoff, logging, persistence
pub mod core;

// Top-level dispatcher
pub mod receiver;

pub use receiver::Receiver;
