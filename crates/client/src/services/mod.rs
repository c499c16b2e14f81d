//! Resource services
//!
//! Thin typed wrappers over [`BaseClient::do_request`]. Each operation checks
//! its required inputs before any I/O, then builds the path and JSON body.

mod certificates;
mod federations;
mod groups;
mod roles;
mod s3_credentials;
mod service_users;
mod users;

pub use certificates::Certificates;
pub use federations::Federations;
pub use groups::Groups;
pub use roles::Roles;
pub use s3_credentials::S3Credentials;
pub use service_users::ServiceUsers;
pub use users::Users;

use iam_core::models::Role;
use iam_core::{Error, ErrorKind, Result};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::client::{BaseClient, RequestDescriptor, decode_json, encode_json};

/// Prefix of the users, service users, groups, roles and credentials APIs
pub(crate) const IAM_API: &str = "iam/v1";

/// Prefix of the SAML federations API
pub(crate) const FEDERATIONS_API: &str = "v1/federations/saml";

/// Fail with `kind` when `value` is empty
pub(crate) fn require(value: &str, kind: ErrorKind, description: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::new(kind, description));
    }
    Ok(())
}

/// Fail with `kind` when `items` is empty
pub(crate) fn require_any<T>(items: &[T], kind: ErrorKind, description: &str) -> Result<()> {
    if items.is_empty() {
        return Err(Error::new(kind, description));
    }
    Ok(())
}

/// Request body for assigning or revoking roles
#[derive(Debug, Serialize)]
pub(crate) struct ManageRolesBody<'a> {
    pub(crate) roles: &'a [Role],
}

pub(crate) fn json_request<B: Serialize>(
    method: Method,
    path: String,
    body: &B,
) -> Result<RequestDescriptor> {
    Ok(RequestDescriptor::new(method, path).with_body(encode_json(body)?))
}

/// Send `request` and decode the JSON response
pub(crate) async fn fetch<T: DeserializeOwned>(
    base: &BaseClient,
    ctx: &CancellationToken,
    request: RequestDescriptor,
) -> Result<T> {
    let body = base.do_request(ctx, request).await?;
    decode_json(&body)
}

/// Send `request` and discard the response body
pub(crate) async fn execute(
    base: &BaseClient,
    ctx: &CancellationToken,
    request: RequestDescriptor,
) -> Result<()> {
    base.do_request(ctx, request).await.map(drop)
}
