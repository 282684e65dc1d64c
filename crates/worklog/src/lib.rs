//! worklog library
//!
//! This module exports the command-line and HTTP surfaces of worklog for use
//! in integration tests and as a library.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod optimize;
pub mod server;
