//! Service user commands

use clap::Subcommand;
use iam_client::Client;
use iam_core::models::{CreateServiceUserRequest, Role, ServiceUser, UpdateServiceUserRequest};

use super::{RoleAssignmentArgs, Session, format_roles};
use crate::exit_code::ExitCode;

/// Service user subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceUserCommands {
    /// List service users
    List,

    /// Show a service user
    Get(ServiceUserIdArgs),

    /// Create a service user
    Create(CreateArgs),

    /// Change name, password or enabled state
    Update(UpdateArgs),

    /// Delete a service user
    Delete(ServiceUserIdArgs),

    /// Assign roles to a service user
    AssignRole(RoleAssignmentArgs),

    /// Revoke roles from a service user
    UnassignRole(RoleAssignmentArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServiceUserIdArgs {
    /// Service user ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Login name
    pub name: String,

    /// Password
    #[arg(long, env = "IAMCTL_SERVICE_USER_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Create the service user disabled
    #[arg(long)]
    pub disabled: bool,

    /// Role to assign, repeatable
    #[arg(short, long = "role", value_name = "SCOPE:ROLE[@PROJECT_ID]")]
    pub roles: Vec<Role>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Service user ID
    pub id: String,

    /// New login name
    #[arg(long)]
    pub name: Option<String>,

    /// New password
    #[arg(long)]
    pub password: Option<String>,

    /// Enable the service user
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,

    /// Disable the service user
    #[arg(long)]
    pub disable: bool,
}

impl UpdateArgs {
    fn to_request(&self) -> UpdateServiceUserRequest {
        let enabled = match (self.enable, self.disable) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        UpdateServiceUserRequest {
            enabled,
            name: self.name.clone(),
            password: self.password.clone(),
        }
    }
}

/// Execute a service-user subcommand
pub async fn execute(cmd: ServiceUserCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    match cmd {
        ServiceUserCommands::List => execute_list(&client, session).await,
        ServiceUserCommands::Get(args) => {
            let result = client.service_users().get(session.ctx(), &args.id).await;
            show(result, session)
        }
        ServiceUserCommands::Create(args) => {
            let input = CreateServiceUserRequest {
                enabled: !args.disabled,
                name: args.name,
                password: args.password,
                roles: args.roles,
            };
            let result = client.service_users().create(session.ctx(), input).await;
            show(result, session)
        }
        ServiceUserCommands::Update(args) => {
            let result = client
                .service_users()
                .update(session.ctx(), &args.id, args.to_request())
                .await;
            show(result, session)
        }
        ServiceUserCommands::Delete(args) => execute_delete(args, &client, session).await,
        ServiceUserCommands::AssignRole(args) => execute_roles(args, true, &client, session).await,
        ServiceUserCommands::UnassignRole(args) => {
            execute_roles(args, false, &client, session).await
        }
    }
}

async fn execute_list(client: &Client, session: &Session) -> ExitCode {
    let formatter = session.formatter();
    match client.service_users().list(session.ctx()).await {
        Ok(list) => {
            if formatter.is_json() {
                formatter.json(&list);
            } else if list.users.is_empty() {
                formatter.println("No service users found.");
            } else {
                formatter.table(
                    &["ID", "NAME", "ENABLED", "ROLES"],
                    list.users.iter().map(|user| {
                        vec![
                            user.id.clone(),
                            user.name.clone(),
                            user.enabled.to_string(),
                            format_roles(&user.roles),
                        ]
                    }),
                );
            }
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn show(result: iam_core::Result<ServiceUser>, session: &Session) -> ExitCode {
    let user = match result {
        Ok(user) => user,
        Err(e) => return session.fail(&e),
    };

    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(&user);
    } else {
        formatter.println(&format!("ID:      {}", formatter.style_name(&user.id)));
        formatter.println(&format!("Name:    {}", user.name));
        formatter.println(&format!("Enabled: {}", user.enabled));
        formatter.println(&format!("Roles:   {}", format_roles(&user.roles)));
    }
    ExitCode::Success
}

async fn execute_delete(args: ServiceUserIdArgs, client: &Client, session: &Session) -> ExitCode {
    match client.service_users().delete(session.ctx(), &args.id).await {
        Ok(()) => {
            session
                .formatter()
                .success(&format!("Service user '{}' deleted.", args.id));
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

async fn execute_roles(
    args: RoleAssignmentArgs,
    assign: bool,
    client: &Client,
    session: &Session,
) -> ExitCode {
    let service_users = client.service_users();
    let result = if assign {
        service_users
            .assign_roles(session.ctx(), &args.id, &args.roles)
            .await
    } else {
        service_users
            .unassign_roles(session.ctx(), &args.id, &args.roles)
            .await
    };

    match result {
        Ok(()) => {
            let verb = if assign { "assigned to" } else { "revoked from" };
            session.formatter().success(&format!(
                "Roles {} {verb} service user '{}'.",
                format_roles(&args.roles),
                args.id
            ));
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: ServiceUserCommands,
    }

    #[test]
    fn test_parse_update_flags() {
        let cli = TestCli::parse_from(["iamctl", "update", "su-1", "--name", "robot", "--disable"]);
        let ServiceUserCommands::Update(args) = cli.command else {
            panic!("Unexpected command parsing result");
        };

        let request = args.to_request();
        assert_eq!(request.name.as_deref(), Some("robot"));
        assert_eq!(request.enabled, Some(false));
        assert!(request.password.is_none());
    }

    #[test]
    fn test_update_without_flags_is_empty() {
        let cli = TestCli::parse_from(["iamctl", "update", "su-1"]);
        let ServiceUserCommands::Update(args) = cli.command else {
            panic!("Unexpected command parsing result");
        };
        assert!(args.to_request().is_empty());
    }

    #[test]
    fn test_enable_conflicts_with_disable() {
        let result = TestCli::try_parse_from(["iamctl", "update", "su-1", "--enable", "--disable"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_create() {
        let cli = TestCli::parse_from([
            "iamctl",
            "create",
            "robot",
            "--password",
            "Pa$$w0rd!",
            "--role",
            "project:object_storage:admin@p-1",
        ]);
        let ServiceUserCommands::Create(args) = cli.command else {
            panic!("Unexpected command parsing result");
        };
        assert!(!args.disabled);
        assert_eq!(args.roles[0].role_name.as_str(), "object_storage:admin");
        assert_eq!(args.roles[0].project_id.as_deref(), Some("p-1"));
    }
}
