//! iam-client: HTTP client for the IAM API
//!
//! Build a [`Client`] once with [`Client::builder`], then reach each resource
//! through its service handle. Every call takes a
//! [`CancellationToken`](tokio_util::sync::CancellationToken); cancelling it
//! aborts the in-flight request.
//!
//! ```no_run
//! # async fn run() -> iam_core::Result<()> {
//! use iam_client::Client;
//! use iam_core::AuthOpts;
//! use tokio_util::sync::CancellationToken;
//!
//! let client = Client::builder()
//!     .auth_opts(AuthOpts::keystone_token("gAAAAA..."))
//!     .build()?;
//! let users = client.users().list(&CancellationToken::new()).await?;
//! println!("{} users", users.users.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod client;
pub mod services;

pub use builder::{Client, ClientBuilder};
pub use client::{BaseClient, RequestDescriptor};
pub use services::{
    Certificates, Federations, Groups, Roles, S3Credentials, ServiceUsers, Users,
};
