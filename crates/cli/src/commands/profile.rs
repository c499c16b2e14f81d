//! Profile management commands
//!
//! Profiles are named API targets: an API URL plus the Keystone token used
//! to reach it.

use clap::Subcommand;
use iam_core::{ConfigError, DEFAULT_API_URL, Profile, ProfileManager};
use serde::Serialize;

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Profile subcommands for managing API connections
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add or update a profile
    Set(SetArgs),

    /// List all configured profiles
    List,

    /// Remove a profile
    Remove(RemoveArgs),
}

/// Arguments for the `profile set` command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Profile name (e.g., "default", "prod")
    pub name: String,

    /// Keystone token sent as X-Auth-Token
    pub token: String,

    /// IAM API URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Prepended to the client user agent
    #[arg(long)]
    pub user_agent_prefix: Option<String>,

    /// Total request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Use this profile when --profile is not given
    #[arg(long)]
    pub default: bool,
}

/// Arguments for the `profile remove` command
#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Name of the profile to remove
    pub name: String,
}

/// JSON output for profile list
#[derive(Serialize)]
struct ProfileListOutput {
    default: String,
    profiles: Vec<ProfileInfo>,
}

/// Profile information for JSON output (without the token)
#[derive(Serialize)]
struct ProfileInfo {
    name: String,
    api_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            api_url: profile.api_url.clone(),
            timeout_secs: profile.timeout_secs,
        }
    }
}

/// JSON output for profile set/remove operations
#[derive(Serialize)]
struct ProfileOperationOutput {
    success: bool,
    profile: String,
    message: String,
}

/// Execute a profile subcommand
pub fn execute(cmd: ProfileCommands, formatter: &Formatter) -> ExitCode {
    let manager = match ProfileManager::new() {
        Ok(manager) => manager,
        Err(e) => return fail(formatter, &e),
    };

    let result = match cmd {
        ProfileCommands::Set(args) => execute_set(args, &manager, formatter),
        ProfileCommands::List => execute_list(&manager, formatter),
        ProfileCommands::Remove(args) => execute_remove(args, &manager, formatter),
    };

    match result {
        Ok(code) => code,
        Err(e) => fail(formatter, &e),
    }
}

fn fail(formatter: &Formatter, error: &ConfigError) -> ExitCode {
    formatter.error(&error.to_string());
    ExitCode::from(error)
}

fn execute_set(
    args: SetArgs,
    manager: &ProfileManager,
    formatter: &Formatter,
) -> Result<ExitCode, ConfigError> {
    if args.name.is_empty() {
        formatter.error("Profile name cannot be empty");
        return Ok(ExitCode::UsageError);
    }
    if args.token.is_empty() {
        formatter.error("Keystone token cannot be empty");
        return Ok(ExitCode::UsageError);
    }

    let mut profile = Profile::new(&args.name, &args.api_url, args.token);
    profile.user_agent_prefix = args.user_agent_prefix;
    profile.timeout_secs = args.timeout;
    manager.set(profile)?;

    if args.default {
        manager.set_default(&args.name)?;
    }

    let message = format!("Profile '{}' configured successfully", args.name);
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: args.name,
            message,
        });
    } else {
        formatter.success(&message);
    }
    Ok(ExitCode::Success)
}

fn execute_list(manager: &ProfileManager, formatter: &Formatter) -> Result<ExitCode, ConfigError> {
    let profiles = manager.list()?;
    let default = manager.default_name()?;

    if formatter.is_json() {
        formatter.json(&ProfileListOutput {
            default,
            profiles: profiles.iter().map(ProfileInfo::from).collect(),
        });
    } else if profiles.is_empty() {
        formatter.println("No profiles configured.");
    } else {
        formatter.table(
            &["", "NAME", "API URL"],
            profiles.iter().map(|p| {
                let marker = if p.name == default { "*" } else { "" };
                vec![marker.to_string(), p.name.clone(), p.api_url.clone()]
            }),
        );
    }
    Ok(ExitCode::Success)
}

fn execute_remove(
    args: RemoveArgs,
    manager: &ProfileManager,
    formatter: &Formatter,
) -> Result<ExitCode, ConfigError> {
    manager.remove(&args.name)?;

    let message = format!("Profile '{}' removed successfully", args.name);
    if formatter.is_json() {
        formatter.json(&ProfileOperationOutput {
            success: true,
            profile: args.name,
            message,
        });
    } else {
        formatter.success(&message);
    }
    Ok(ExitCode::Success)
}
