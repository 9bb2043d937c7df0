//! Endpoint-level integration tests

pub mod events_test;
pub mod join_test;
