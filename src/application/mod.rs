// Application layer - validation and orchestration on top of the repository.
// This is what both the HTTP API and the tests drive.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
