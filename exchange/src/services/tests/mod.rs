//! Tests for exchange services
//!
//! HTTP services run against a local wiremock server.

pub mod metadata_lookup;
