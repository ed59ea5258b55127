//! Domain types and the ports the purchase flow talks through.

pub mod catalog;
pub mod offer;
pub mod phone;
pub mod ports;
pub mod purchase;
pub mod transaction;
