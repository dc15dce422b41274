//! Core receiver infrastructure
//!
//! Pieces the dispatcher builds on that are not protocol logic: interrupt
//! handoff flags, logging, the event journal and bind-record persistence.

pub mod irq;
pub mod log_buffer;
pub mod logging;
pub mod persist;
