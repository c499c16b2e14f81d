//! Roles catalog API

use std::sync::Arc;

use iam_core::Result;
use iam_core::models::RoleList;
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use super::{IAM_API, fetch};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `iam/v1/roles`
#[derive(Debug, Clone)]
pub struct Roles {
    base: Arc<BaseClient>,
}

impl Roles {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// List roles available for assignment
    pub async fn list(&self, ctx: &CancellationToken) -> Result<RoleList> {
        let request = RequestDescriptor::new(Method::GET, format!("{IAM_API}/roles"));
        fetch(&self.base, ctx, request).await
    }
}
