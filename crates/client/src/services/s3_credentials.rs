//! S3 credentials API

use std::sync::Arc;

use iam_core::models::{CreatedCredential, Credential, CredentialList};
use iam_core::{ErrorKind, Result};
use reqwest::Method;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::{IAM_API, execute, fetch, json_request, require};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `iam/v1/service_users/{user_id}/credentials`
#[derive(Debug, Clone)]
pub struct S3Credentials {
    base: Arc<BaseClient>,
}

impl S3Credentials {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// List credentials of a service user
    pub async fn list(&self, ctx: &CancellationToken, user_id: &str) -> Result<Vec<Credential>> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;

        let request = RequestDescriptor::new(Method::GET, credentials_path(user_id));
        let list: CredentialList = fetch(&self.base, ctx, request).await?;
        Ok(list.credentials)
    }

    /// Issue a credential bound to a project
    ///
    /// The secret key is only ever returned by this call.
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        name: &str,
        project_id: &str,
    ) -> Result<CreatedCredential> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;
        require(
            name,
            ErrorKind::CredentialNameRequired,
            "No credentials name was provided.",
        )?;
        require(project_id, ErrorKind::ProjectIdRequired, "No projectID was provided.")?;

        let request = json_request(
            Method::POST,
            credentials_path(user_id),
            &CreateCredentialBody { name, project_id },
        )?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn delete(
        &self,
        ctx: &CancellationToken,
        user_id: &str,
        access_key: &str,
    ) -> Result<()> {
        require(user_id, ErrorKind::UserIdRequired, "No userID was provided.")?;
        require(
            access_key,
            ErrorKind::CredentialAccessKeyRequired,
            "No accessKey was provided.",
        )?;

        let request = RequestDescriptor::new(
            Method::DELETE,
            format!("{}/{access_key}", credentials_path(user_id)),
        );
        execute(&self.base, ctx, request).await
    }
}

fn credentials_path(user_id: &str) -> String {
    format!("{IAM_API}/service_users/{user_id}/credentials")
}

/// Request body for issuing a credential
#[derive(Serialize)]
struct CreateCredentialBody<'a> {
    name: &'a str,
    project_id: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::services::test_support::{client_for, offline_client};

    #[tokio::test]
    async fn test_list_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/service_users/su-1/credentials"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"credentials":[{"name":"backup","project_id":"p1","access_key":"AK1"}]}"#,
            ))
            .mount(&server)
            .await;

        let credentials = client_for(&server)
            .s3_credentials()
            .list(&CancellationToken::new(), "su-1")
            .await
            .unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].access_key, "AK1");
    }

    #[tokio::test]
    async fn test_create_credential() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/iam/v1/service_users/su-1/credentials"))
            .and(body_json(json!({"name": "backup", "project_id": "p1"})))
            .respond_with(ResponseTemplate::new(201).set_body_string(
                r#"{"name":"backup","project_id":"p1","access_key":"AK1","secret_key":"SK1"}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .s3_credentials()
            .create(&CancellationToken::new(), "su-1", "backup", "p1")
            .await
            .unwrap();
        assert_eq!(created.credential.access_key, "AK1");
        assert_eq!(created.secret_key, "SK1");
    }

    #[tokio::test]
    async fn test_delete_missing_credential() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/iam/v1/service_users/su-1/credentials/AK1"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_string(r#"{"code":"CRED_NOT_FOUND","message":"gone"}"#),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .s3_credentials()
            .delete(&CancellationToken::new(), "su-1", "AK1")
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::CredentialNotFound));
    }

    #[tokio::test]
    async fn test_validation_happens_before_io() {
        let credentials = offline_client().s3_credentials();
        let ctx = CancellationToken::new();

        let err = credentials.list(&ctx, "").await.unwrap_err();
        assert!(err.is(ErrorKind::UserIdRequired));

        let err = credentials.create(&ctx, "su-1", "", "p1").await.unwrap_err();
        assert!(err.is(ErrorKind::CredentialNameRequired));

        let err = credentials.create(&ctx, "su-1", "n", "").await.unwrap_err();
        assert!(err.is(ErrorKind::ProjectIdRequired));

        let err = credentials.delete(&ctx, "su-1", "").await.unwrap_err();
        assert!(err.is(ErrorKind::CredentialAccessKeyRequired));
    }
}
