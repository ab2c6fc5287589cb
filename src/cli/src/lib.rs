//! Command line front end for the benefits token client.

pub mod commands;
pub mod config;

pub use config::{load, secret, AUTHORIZATION_VAR, PRIVATE_KEY_VAR};
