//! API Routes

pub mod health;
pub mod forms;
pub mod responses;
pub mod session;
