//! Service users API

use std::sync::Arc;

use iam_core::models::{
    CreateServiceUserRequest, Role, ServiceUser, ServiceUserList, UpdateServiceUserRequest,
};
use iam_core::{Error, ErrorKind, Result};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{IAM_API, ManageRolesBody, execute, fetch, json_request, require, require_any};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `iam/v1/service_users`
#[derive(Debug, Clone)]
pub struct ServiceUsers {
    base: Arc<BaseClient>,
}

impl ServiceUsers {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, ctx: &CancellationToken) -> Result<ServiceUserList> {
        let request = RequestDescriptor::new(Method::GET, format!("{IAM_API}/service_users"));
        fetch(&self.base, ctx, request).await
    }

    pub async fn get(&self, ctx: &CancellationToken, user_id: &str) -> Result<ServiceUser> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request = RequestDescriptor::new(
            Method::GET,
            format!("{IAM_API}/service_users/{user_id}"),
        );
        fetch(&self.base, ctx, request).await
    }

    pub async fn create(
        &self,
        ctx: &CancellationToken,
        input: CreateServiceUserRequest,
    ) -> Result<ServiceUser> {
        require(
            &input.name,
            ErrorKind::ServiceUserNameRequired,
            "No name for Service User was provided.",
        )?;
        require(
            &input.password,
            ErrorKind::ServiceUserPasswordRequired,
            "No password for Service User was provided.",
        )?;

        let body = CreateServiceUserBody {
            enabled: input.enabled,
            name: &input.name,
            password: &input.password,
            roles: &input.roles,
        };
        let request = json_request(Method::POST, format!("{IAM_API}/service_users"), &body)?;
        fetch(&self.base, ctx, request).await
    }

    /// Change name, password or enabled flag; unset fields stay as they are
    pub async fn update(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        input: UpdateServiceUserRequest,
    ) -> Result<ServiceUser> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;
        if input.is_empty() {
            return Err(Error::new(
                ErrorKind::InputDataRequired,
                "No fields to update were provided.",
            ));
        }

        let body = UpdateServiceUserBody {
            enabled: input.enabled,
            name: input.name.as_deref(),
            password: input.password.as_deref(),
        };
        let request = json_request(
            Method::PATCH,
            format!("{IAM_API}/service_users/{user_id}"),
            &body,
        )?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn delete(&self, ctx: &CancellationToken, user_id: &str) -> Result<()> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request = RequestDescriptor::new(
            Method::DELETE,
            format!("{IAM_API}/service_users/{user_id}"),
        );
        execute(&self.base, ctx, request).await
    }

    pub async fn assign_roles(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        roles: &[Role],
    ) -> Result<()> {
        self.manage_roles(ctx, Method::PUT, user_id, roles).await
    }

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
        require_any(
            roles,
            ErrorKind::ServiceUserRolesRequired,
            "No roles for Service User was provided.",
        )?;

        let request = json_request(
            method,
            format!("{IAM_API}/service_users/{user_id}/roles"),
            &ManageRolesBody { roles },
        )?;
        execute(&self.base, ctx, request).await
    }
}

/// Request body for creating a service user
#[derive(Serialize)]
struct CreateServiceUserBody<'a> {
    enabled: bool,
    name: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "<[Role]>::is_empty")]
    roles: &'a [Role],
}

/// Request body for updating a service user
#[derive(Serialize)]
struct UpdateServiceUserBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use iam_core::models::RoleName;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::{client_for, offline_client};

    const SERVICE_USER_JSON: &str = r#"{
        "id": "su-1",
        "enabled": true,
        "name": "robot",
        "roles": [{"role_name": "object_storage:admin", "scope": "project", "project_id": "p1"}]
    }"#;

    #[tokio::test]
    async fn test_list_service_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/service_users"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"users":[{SERVICE_USER_JSON}]}}"#)),
            )
            .mount(&server)
            .await;

        let list = client_for(&server)
            .service_users()
            .list(&CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(list.users.len(), 1);
        assert_eq!(
            list.users[0].roles[0],
            Role::project(RoleName::OBJECT_STORAGE_ADMIN, "p1")
        );
    }

    #[tokio::test]
    async fn test_create_service_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/iam/v1/service_users"))
            .and(body_json(json!({
                "enabled": true,
                "name": "robot",
                "password": "Secret-12345",
                "roles": [{"role_name": "member", "scope": "account"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(SERVICE_USER_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let input = CreateServiceUserRequest {
            enabled: true,
            name: "robot".into(),
            password: "Secret-12345".into(),
            roles: vec![Role::account(RoleName::MEMBER)],
        };
        let created = client_for(&server)
            .service_users()
            .create(&CancellationToken::new(), input)
            .await
            .unwrap();
        assert_eq!(created.name, "robot");
        assert!(created.enabled);
    }

    #[tokio::test]
    async fn test_update_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/iam/v1/service_users/su-1"))
            .and(body_json(json!({"enabled": false})))
            .respond_with(ResponseTemplate::new(200).set_body_string(SERVICE_USER_JSON))
            .expect(1)
            .mount(&server)
            .await;

        let input = UpdateServiceUserRequest {
            enabled: Some(false),
            ..Default::default()
        };
        client_for(&server)
            .service_users()
            .update(&CancellationToken::new(), "su-1", input)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_service_user_already_exists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_string(r#"{"code":"USER_ALREADY_EXISTS","message":"taken"}"#),
            )
            .mount(&server)
            .await;

        let input = CreateServiceUserRequest {
            name: "robot".into(),
            password: "pw".into(),
            ..Default::default()
        };
        let err = client_for(&server)
            .service_users()
            .create(&CancellationToken::new(), input)
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_validation_happens_before_io() {
        let service_users = offline_client().service_users();
        let ctx = CancellationToken::new();

        let err = service_users
            .create(
                &ctx,
                CreateServiceUserRequest {
                    password: "pw".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::ServiceUserNameRequired));

        let err = service_users
            .create(
                &ctx,
                CreateServiceUserRequest {
                    name: "robot".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::ServiceUserPasswordRequired));

        let err = service_users
            .update(&ctx, "su-1", UpdateServiceUserRequest::default())
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::InputDataRequired));

        let err = service_users.assign_roles(&ctx, "su-1", &[]).await.unwrap_err();
        assert!(err.is(ErrorKind::ServiceUserRolesRequired));

        let err = service_users.get(&ctx, "").await.unwrap_err();
        assert!(err.is(ErrorKind::UserIdRequired));
    }
}
