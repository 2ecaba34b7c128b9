//! Apex REST transport for the FieldScope widgets
//!
//! Implements the core gateway trait over the dev-tools Apex REST endpoints,
//! including the best-effort extraction of structured error messages from
//! the platform's error bodies.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod client;

pub use client::ApexRestClient;
