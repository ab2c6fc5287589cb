//! Commands for the tokenization CLI.

pub mod attached;
pub mod balance;
pub mod burn;
pub mod qr;
pub mod role;
pub mod send;
pub mod upload_ticket;
