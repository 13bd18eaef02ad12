//! Common test utilities and helpers
//!
//! - Mock server helpers and a recording dispatcher
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod mock_server;

pub use mock_server::*;
