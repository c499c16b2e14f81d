//! End-to-end tests for the iamctl binary
//!
//! Each test runs the compiled binary with an isolated config directory.
//! API calls go to a local wiremock server.

use std::path::Path;
use std::process::Output;

use tempfile::TempDir;
use tokio::process::Command;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run iamctl with an isolated config directory
async fn run_iamctl(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_iamctl"))
        .args(args)
        .env("IAMCTL_CONFIG_DIR", config_dir)
        .env_remove("IAMCTL_PROFILE")
        .env_remove("IAM_API_URL")
        .env_remove("IAM_KEYSTONE_TOKEN")
        .output()
        .await
        .expect("Failed to execute iamctl")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

mod profile_operations {
    use super::*;

    #[tokio::test]
    async fn test_profile_set_list_remove() {
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "profile",
                "set",
                "prod",
                "gAAAA-token",
                "--api-url",
                "https://iam.example",
                "--default",
            ],
            config_dir.path(),
        )
        .await;
        assert!(output.status.success(), "{output:?}");

        let output = run_iamctl(&["profile", "list", "--json"], config_dir.path()).await;
        assert!(output.status.success());
        let json = stdout_json(&output);
        assert_eq!(json["default"], "prod");
        assert_eq!(json["profiles"][0]["name"], "prod");
        assert_eq!(json["profiles"][0]["api_url"], "https://iam.example");
        assert!(!String::from_utf8_lossy(&output.stdout).contains("gAAAA-token"));

        let output = run_iamctl(&["profile", "remove", "prod"], config_dir.path()).await;
        assert!(output.status.success());

        let output = run_iamctl(&["profile", "remove", "prod"], config_dir.path()).await;
        assert_eq!(output.status.code(), Some(5));
    }

    #[tokio::test]
    async fn test_missing_profile_exits_not_found() {
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(&["user", "list"], config_dir.path()).await;
        assert_eq!(output.status.code(), Some(5));
        assert!(String::from_utf8_lossy(&output.stderr).contains("default"));
    }
}

mod api_operations {
    use super::*;

    #[tokio::test]
    async fn test_user_list_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/iam/v1/users"))
            .and(header("X-Auth-Token", "cli-token"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"users":[{"id":"u-1","keystone_id":"ks-1","auth_type":"local","roles":[]}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                &server.uri(),
                "--token",
                "cli-token",
                "--json",
                "user",
                "list",
            ],
            config_dir.path(),
        )
        .await;

        assert!(output.status.success(), "{output:?}");
        let json = stdout_json(&output);
        assert_eq!(json["users"][0]["id"], "u-1");
    }

    #[tokio::test]
    async fn test_unauthorized_exits_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&server)
            .await;
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                &server.uri(),
                "--token",
                "stale",
                "--json",
                "group",
                "list",
            ],
            config_dir.path(),
        )
        .await;

        assert_eq!(output.status.code(), Some(4));
        let stderr: serde_json::Value = serde_json::from_slice(&output.stderr).unwrap();
        assert_eq!(stderr["code"], "AUTH_TOKEN_UNAUTHORIZED");
        assert_eq!(stderr["error"], "token expired");
    }

    #[tokio::test]
    async fn test_not_found_exits_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/federations/saml/fed-404"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"code":"FEDERATION_NOT_FOUND","message":"Federation not found"}"#,
            ))
            .mount(&server)
            .await;
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                &server.uri(),
                "--token",
                "t",
                "federation",
                "get",
                "fed-404",
            ],
            config_dir.path(),
        )
        .await;

        assert_eq!(output.status.code(), Some(5));
        assert!(String::from_utf8_lossy(&output.stderr).contains("FEDERATION_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_federation_check_missing_exits_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/v1/federations/saml/fed-404"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                &server.uri(),
                "--token",
                "t",
                "federation",
                "check",
                "fed-404",
            ],
            config_dir.path(),
        )
        .await;

        assert_eq!(output.status.code(), Some(5));
        assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
    }

    #[tokio::test]
    async fn test_validation_error_exits_usage() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                &server.uri(),
                "--token",
                "t",
                "service-user",
                "update",
                "su-1",
            ],
            config_dir.path(),
        )
        .await;

        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr).contains("INPUT_DATA_REQUIRED"));
    }

    #[tokio::test]
    async fn test_unreachable_api_exits_network_error() {
        let config_dir = TempDir::new().unwrap();

        let output = run_iamctl(
            &[
                "--api-url",
                "http://127.0.0.1:1",
                "--token",
                "t",
                "role",
                "list",
            ],
            config_dir.path(),
        )
        .await;

        assert_eq!(output.status.code(), Some(3));
    }
}
