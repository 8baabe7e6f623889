pub mod error;
pub mod files;
pub mod store;
pub mod ticket;
