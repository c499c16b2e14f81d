//! Panel users API

use std::sync::Arc;

use iam_core::models::{AuthType, CreateUserRequest, Role, User, UserFederation, UserList};
use iam_core::{ErrorKind, Result};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{IAM_API, ManageRolesBody, execute, fetch, json_request, require, require_any};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `iam/v1/users`
#[derive(Debug, Clone)]
pub struct Users {
    base: Arc<BaseClient>,
}

impl Users {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// List all panel users of the account
    pub async fn list(&self, ctx: &CancellationToken) -> Result<UserList> {
        let request = RequestDescriptor::new(Method::GET, format!("{IAM_API}/users"));
        fetch(&self.base, ctx, request).await
    }

    /// Get a user by ID
    pub async fn get(&self, ctx: &CancellationToken, user_id: &str) -> Result<User> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request = RequestDescriptor::new(Method::GET, format!("{IAM_API}/users/{user_id}"));
        fetch(&self.base, ctx, request).await
    }

    /// Invite a new user by e-mail
    pub async fn create(&self, ctx: &CancellationToken, input: CreateUserRequest) -> Result<User> {
        require(
            &input.email,
            ErrorKind::UserEmailRequired,
            "No email for User was provided.",
        )?;

        let body = CreateUserBody {
            auth_type: input.auth_type,
            email: &input.email,
            federation: input.federation.as_ref(),
            roles: &input.roles,
            group_ids: &input.group_ids,
            subscriptions_only: false,
            subscriptions: &[],
        };
        let request = json_request(Method::POST, format!("{IAM_API}/users"), &body)?;
        fetch(&self.base, ctx, request).await
    }

    /// Delete a user
    pub async fn delete(&self, ctx: &CancellationToken, user_id: &str) -> Result<()> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request =
            RequestDescriptor::new(Method::DELETE, format!("{IAM_API}/users/{user_id}"));
        execute(&self.base, ctx, request).await
    }

    /// Send the invitation e-mail again
    pub async fn resend_invite(&self, ctx: &CancellationToken, user_id: &str) -> Result<()> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request = RequestDescriptor::new(
            Method::PATCH,
            format!("{IAM_API}/users/{user_id}/resend_invite"),
        );
        execute(&self.base, ctx, request).await
    }

    /// Grant roles to a user
    pub async fn assign_roles(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        self.manage_roles(ctx, Method::PUT, user_id, roles).await
    }

    /// Revoke roles from a user
    pub async fn unassign_roles(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        self.manage_roles(ctx, Method::DELETE, user_id, roles).await
    }

    async fn manage_roles(
        &self,
        ctx: &CancellationToken,
        method: Method,
        user_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;
        require_any(roles, ErrorKind::UserRolesRequired, "No roles for User was provided.")?;

        let request = json_request(
            method,
            format!("{IAM_API}/users/{user_id}/roles"),
            &ManageRolesBody { roles },
        )?;
        execute(&self.base, ctx, request).await
    }
}

/// Request body for creating a user
#[derive(Debug, Serialize)]
struct CreateUserBody<'a> {
    auth_type: AuthType,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    federation: Option<&'a UserFederation>,
    #[serde(skip_serializing_if = "<[Role]>::is_empty")]
    roles: &'a [Role],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    group_ids: &'a [String],
    // The API requires both subscription fields to be present
    subscriptions_only: bool,
    subscriptions: &'a [String],
}
