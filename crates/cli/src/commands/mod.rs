//! CLI command definitions and execution
//!
//! Each resource of the IAM API gets its own subcommand group. Commands that
//! talk to the API share a [`Session`]: output formatting, the resolved
//! profile and the cancellation token wired to Ctrl+C.

use std::time::Duration;

use clap::{Parser, Subcommand};
use iam_client::Client;
use iam_core::models::Role;
use iam_core::{AuthOpts, ConfigError, DEFAULT_API_URL, Error, Profile, ProfileManager};
use tokio_util::sync::CancellationToken;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod certificate;
mod completions;
mod credential;
mod federation;
mod group;
mod profile;
mod role;
mod service_user;
mod user;

/// iamctl - IAM API command-line client
///
/// Manage users, service users, groups, SAML federations and S3 credentials.
#[derive(Parser, Debug)]
#[command(name = "iamctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format: human-readable or JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where and as whom to talk to the API
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Profile to use (defaults to the configured default profile)
    #[arg(long, global = true, env = "IAMCTL_PROFILE")]
    pub profile: Option<String>,

    /// Override the profile API URL
    #[arg(long, global = true, env = "IAM_API_URL")]
    pub api_url: Option<String>,

    /// Override the profile Keystone token
    #[arg(long, global = true, env = "IAM_KEYSTONE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage connection profiles
    #[command(subcommand)]
    Profile(profile::ProfileCommands),

    /// Manage users
    #[command(subcommand)]
    User(user::UserCommands),

    /// Manage service users
    #[command(name = "service-user", subcommand)]
    ServiceUser(service_user::ServiceUserCommands),

    /// Manage groups and their members
    #[command(subcommand)]
    Group(group::GroupCommands),

    /// Manage SAML federations
    #[command(subcommand)]
    Federation(federation::FederationCommands),

    /// Manage federation certificates
    #[command(subcommand)]
    Certificate(certificate::CertificateCommands),

    /// Browse assignable roles
    #[command(subcommand)]
    Role(role::RoleCommands),

    /// Manage S3 credentials of service users
    #[command(subcommand)]
    Credential(credential::CredentialCommands),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Arguments for `assign-role` and `unassign-role`
#[derive(clap::Args, Debug)]
pub struct RoleAssignmentArgs {
    /// ID of the user, service user or group
    pub id: String,

    /// Role to (un)assign, repeatable
    #[arg(short, long = "role", value_name = "SCOPE:ROLE[@PROJECT_ID]")]
    pub roles: Vec<Role>,
}

/// Render roles for table cells
pub fn format_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute the CLI command and return an exit code
pub async fn execute(cli: Cli, cancel: CancellationToken) -> ExitCode {
    let output_config = OutputConfig {
        json: cli.json,
        no_color: cli.no_color,
        quiet: cli.quiet,
    };
    let session = Session {
        formatter: Formatter::new(output_config),
        connection: cli.connection,
        cancel,
    };

    match cli.command {
        Commands::Profile(cmd) => profile::execute(cmd, &session.formatter),
        Commands::User(cmd) => user::execute(cmd, &session).await,
        Commands::ServiceUser(cmd) => service_user::execute(cmd, &session).await,
        Commands::Group(cmd) => group::execute(cmd, &session).await,
        Commands::Federation(cmd) => federation::execute(cmd, &session).await,
        Commands::Certificate(cmd) => certificate::execute(cmd, &session).await,
        Commands::Role(cmd) => role::execute(cmd, &session).await,
        Commands::Credential(cmd) => credential::execute(cmd, &session).await,
        Commands::Completions(args) => completions::execute(args),
    }
}

/// State shared by commands that call the API
pub struct Session {
    formatter: Formatter,
    connection: ConnectionArgs,
    cancel: CancellationToken,
}

impl Session {
    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    /// Cancellation token passed to every API call
    pub fn ctx(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Build a client from the selected profile and flag overrides
    pub fn client(&self) -> Result<Client, ExitCode> {
        let profile = ProfileManager::new()
            .and_then(|manager| resolve_profile(&manager, &self.connection))
            .map_err(|e| {
                self.formatter.error(&e.to_string());
                ExitCode::from(&e)
            })?;

        build_client(profile).map_err(|e| self.fail(&e))
    }

    /// Report an API error and pick the exit code
    pub fn fail(&self, error: &Error) -> ExitCode {
        if self.cancel.is_cancelled() {
            self.formatter.error("Interrupted");
            return ExitCode::Interrupted;
        }

        tracing::debug!(kind = %error.kind(), status = ?error.status(), "command failed");
        self.formatter
            .api_error(error.kind().as_str(), error.description());
        ExitCode::from(error)
    }
}

/// Pick the profile to use and apply flag overrides
///
/// An unknown profile is tolerated when a token is passed explicitly, so the
/// CLI works without any configuration file.
pub fn resolve_profile(
    manager: &ProfileManager,
    connection: &ConnectionArgs,
) -> Result<Profile, ConfigError> {
    let name = match &connection.profile {
        Some(name) => name.clone(),
        None => manager.default_name()?,
    };

    let mut profile = match manager.get(&name) {
        Ok(profile) => profile,
        Err(ConfigError::ProfileNotFound(_)) if connection.token.is_some() => {
            Profile::new(name, DEFAULT_API_URL, "")
        }
        Err(e) => return Err(e),
    };

    if let Some(api_url) = &connection.api_url {
        profile.api_url = api_url.clone();
    }
    if let Some(token) = &connection.token {
        profile.keystone_token = token.clone();
    }
    Ok(profile)
}

/// Build an API client for a profile
pub fn build_client(profile: Profile) -> iam_core::Result<Client> {
    let mut builder = Client::builder()
        .api_url(profile.api_url)
        .auth_opts(AuthOpts::keystone_token(profile.keystone_token))
        .user_agent_postfix(format!("iamctl/{}", env!("CARGO_PKG_VERSION")));

    if let Some(prefix) = profile.user_agent_prefix {
        builder = builder.user_agent_prefix(prefix);
    }
    if let Some(secs) = profile.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}
