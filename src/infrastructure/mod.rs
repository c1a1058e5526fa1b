//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters and external integrations:
//! - GitHub REST API client
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod github;
pub mod logging;
