//! Ports (hexagonal architecture interfaces)

pub mod inbound;
pub mod outbound;
