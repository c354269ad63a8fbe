#![doc = "The `tasknest` library crate."]
#![doc = ""]
#![doc = "This crate contains the task-management domain models, the JWT"]
#![doc = "authentication guard, routing configuration, and error handling for"]
#![doc = "the tasknest API. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application, and by the integration tests to"]
#![doc = "assemble the same app against a test database."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
