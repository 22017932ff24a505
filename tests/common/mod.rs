//! Common test utilities and mock implementations

#![allow(dead_code)]

pub mod mock_i2c;

pub use mock_bus::{create_mock_encoder, Operation};
