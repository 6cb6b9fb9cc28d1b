//! Command-line client for the inventory prediction service.
//!
//! Drives the same dashboard state machine as the browser frontend
//! (`common::DashboardState`) against the remote prediction endpoint.

pub mod cli;
pub mod client;
pub mod config;
pub mod session;

#[cfg(test)]
mod test_utils;
