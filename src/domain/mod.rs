pub mod admin;
pub mod client;
pub mod ports;
pub mod transaction;
