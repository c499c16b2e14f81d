//! Groups API

use std::sync::Arc;

use iam_core::models::{CreateGroupRequest, GroupDetails, GroupList, Role, UpdateGroupRequest};
use iam_core::{Error, ErrorKind, Result};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{IAM_API, ManageRolesBody, execute, fetch, json_request, require, require_any};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `iam/v1/groups`
#[derive(Debug, Clone)]
pub struct Groups {
    base: Arc<BaseClient>,
}

impl Groups {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, ctx: &CancellationToken) -> Result<GroupList> {
        let request = RequestDescriptor::new(Method::GET, format!("{IAM_API}/groups"));
        fetch(&self.base, ctx, request).await
    }

    /// Get a group with its members
    pub async fn get(&self, ctx: &CancellationToken, group_id: &str) -> Result<GroupDetails> {
        require(group_id, ErrorKind::GroupIdRequired, "No groupID was provided.")?;

        let request =
            RequestDescriptor::new(Method::GET, format!("{IAM_API}/groups/{group_id}"));
        fetch(&self.base, ctx, request).await
    }

    pub async fn create(
        &self,
        ctx: &CancellationToken,
        input: CreateGroupRequest,
    ) -> Result<GroupDetails> {
        require(
            &input.name,
            ErrorKind::GroupNameRequired,
            "No Name for Group was provided.",
        )?;

        let request = json_request(Method::POST, format!("{IAM_API}/groups"), &input)?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn update(
        &self,
        ctx: &CancellationToken,
        group_id: &str,
        input: UpdateGroupRequest,
    ) -> Result<GroupDetails> {
        require(group_id, ErrorKind::GroupIdRequired, "No groupID was provided.")?;
        if input.name.is_none() && input.description.is_none() {
            return Err(Error::new(
                ErrorKind::InputDataRequired,
                "No fields to update were provided.",
            ));
        }

        let request = json_request(
            Method::PATCH,
            format!("{IAM_API}/groups/{group_id}"),
            &input,
        )?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn delete(&self, ctx: &CancellationToken, group_id: &str) -> Result<()> {
        require(group_id, ErrorKind::GroupIdRequired, "No groupID was provided.")?;

        let request =
            RequestDescriptor::new(Method::DELETE, format!("{IAM_API}/groups/{group_id}"));
        execute(&self.base, ctx, request).await
    }

    pub async fn assign_roles(
        &self,
        ctx: &CancellationToken,
        group_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        self.manage_roles(ctx, Method::PUT, group_id, roles).await
    }

    pub async fn unassign_roles(
        &self,
        ctx: &CancellationToken,
        group_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        self.manage_roles(ctx, Method::DELETE, group_id, roles).await
    }

    /// Add users, by Keystone ID, to a group
    pub async fn add_users(
        &self,
        ctx: &CancellationToken,
        group_id: &str,
        keystone_ids: &[String],
    ) -> Result<()> {
        self.manage_users(ctx, Method::PUT, group_id, keystone_ids)
            .await
    }

    /// Remove users, by Keystone ID, from a group
    pub async fn remove_users(
        &self,
        ctx: &CancellationToken,
        group_id: &str,
        keystone_ids: &[String],
    ) -> Result<()> {
        self.manage_users(ctx, Method::DELETE, group_id, keystone_ids)
            .await
    }

    async fn manage_roles(
        &self,
        ctx: &CancellationToken,
        method: Method,
        group_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        require(group_id, ErrorKind::GroupIdRequired, "No groupID was provided.")?;
        require_any(
            roles,
            ErrorKind::GroupRolesRequired,
            "No roles for Group was provided.",
        )?;

        let request = json_request(
            method,
            format!("{IAM_API}/groups/{group_id}/roles"),
            &ManageRolesBody { roles },
        )?;
        execute(&self.base, ctx, request).await
    }

    async fn manage_users(
        &self,
        ctx: &CancellationToken,
        method: Method,
        group_id: &str,
        keystone_ids: &[String],
    ) -> Result<()> {
        require(group_id, ErrorKind::GroupIdRequired, "No groupID was provided.")?;
        require_any(
            keystone_ids,
            ErrorKind::GroupUserIdsRequired,
            "No users for Group was provided.",
        )?;

        let request = json_request(
            method,
            format!("{IAM_API}/groups/{group_id}/users"),
            &ManageUsersBody { keystone_ids },
        )?;
        execute(&self.base, ctx, request).await
    }
}

/// Request body for adding or removing group members
#[derive(Serialize)]
struct ManageUsersBody<'a> {
    keystone_ids: &'a [String],
}
