pub mod health;
pub mod tickets;
