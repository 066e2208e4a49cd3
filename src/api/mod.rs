//! REST API flow
//!
//! CRUD, auth and pagination checks against the reqres.in API. Every
//! request carries the static `x-api-key` header and is logged in full.

mod client;
mod scenarios;

pub use client::{ApiClient, ApiResponse};
pub use scenarios::{
    email_looks_valid, expected_total_pages, random_letters, random_letters_with, resource_id,
    run_api_suite, ApiScenario, RunContext,
};
