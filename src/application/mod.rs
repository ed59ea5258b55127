//! Application layer orchestrating a purchase.
//!
//! This module defines the `PurchaseFlow` state machine, which takes a single
//! purchase from offer selection through the remote call to a recorded outcome.

pub mod flow;
