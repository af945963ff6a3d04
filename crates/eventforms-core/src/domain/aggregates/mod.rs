//! Aggregates module

pub mod form;
pub mod response;

pub use form::FormDefinition;
pub use response::Response;
