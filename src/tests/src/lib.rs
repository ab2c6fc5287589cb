//! Integration tests for the benefits token client.

pub mod chain_tests;
pub mod config_tests;
pub mod qr_tests;
