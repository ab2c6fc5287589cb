//! Backend services for the benefits token client.

pub mod ticket;

pub use ticket::{process_ticket_image, TicketClient};
