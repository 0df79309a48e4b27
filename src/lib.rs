#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the Taskboard API."]
#![doc = "It is used by the main binary (`main.rs`) and the `seed` binary to construct"]
#![doc = "and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod tasks;
