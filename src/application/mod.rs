//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `TransactionProcessor`, the entry point for
//! withdraw and transfer processing. It composes the storage and payout
//! ports and owns the ordering and failure policy of each operation.

pub mod processor;
