// Library exports so integration tests can assemble the app.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractors;
pub mod kv;
pub mod routes;
pub mod state;
pub mod store;
