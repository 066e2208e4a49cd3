//! QA scenario runners
//!
//! Two independent runners: a browser flow that submits the demoqa practice
//! form and checks its confirmation dialog, and a REST API flow that
//! exercises the reqres.in CRUD, auth and pagination endpoints.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod form;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use scenario::{Outcome, ScenarioResult, Summary};
