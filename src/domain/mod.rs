//! Vendor-facing value types and the ports the application layer talks through.

pub mod customer;
pub mod funding_source;
pub mod identity;
pub mod ids;
pub mod links;
pub mod ports;
pub mod transfer;
