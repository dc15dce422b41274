//! Device drivers
//!
//! Drivers here are written against the platform abstraction traits so they
//! run unchanged on hardware and against the mock platform.
//!
//! ## Modules
//!
//! - `nrf24l01`: Nordic nRF24L01(+) 2.4 GHz transceiver, receive side

pub mod nrf24l01;
