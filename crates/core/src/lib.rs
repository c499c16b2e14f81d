//! iam-core: Core library for the IAM API client
//!
//! This crate provides the pieces shared by the HTTP client and the CLI:
//! - Error taxonomy mapping API error codes to [`ErrorKind`]
//! - Authentication strategies ([`AuthMethod`])
//! - Resource models for users, service users, groups, federations,
//!   certificates, roles and S3 credentials
//! - Profile configuration for the CLI
//!
//! This crate performs no I/O against the API itself, which keeps the
//! taxonomy and models testable without a server.

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod profile;

pub use auth::{AuthMethod, AuthOpts, KeystoneTokenAuth};
pub use config::{Config, ConfigManager};
pub use error::{get_error, ConfigError, Error, ErrorCategory, ErrorKind, ErrorOrigin, Result};
pub use profile::{Profile, ProfileManager};

/// Default IAM API URL
pub const DEFAULT_API_URL: &str = "https://api.selectel.ru";
