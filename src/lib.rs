//! Administrative backend for a brokerage operation: client capital
//! balances, admin authentication, and two money-movement operations
//! (withdraw, transfer) kept consistent with an external payout provider
//! and an append-only transaction log.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
