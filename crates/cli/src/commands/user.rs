//! User commands
//!
//! Users are people with an account login, either local (invited by email)
//! or signed in through a SAML federation.

use clap::Subcommand;
use iam_client::Client;
use iam_core::models::{AuthType, CreateUserRequest, Role, User, UserFederation};

use super::{RoleAssignmentArgs, Session, format_roles};
use crate::exit_code::ExitCode;

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users of the account
    List,

    /// Show a user
    Get(UserIdArgs),

    /// Invite a local user or register a federated one
    Create(CreateArgs),

    /// Delete a user
    Delete(UserIdArgs),

    /// Send the invitation email again
    ResendInvite(UserIdArgs),

    /// Assign roles to a user
    AssignRole(RoleAssignmentArgs),

    /// Revoke roles from a user
    UnassignRole(RoleAssignmentArgs),
}

#[derive(clap::Args, Debug)]
pub struct UserIdArgs {
    /// User ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Email address the invitation goes to
    pub email: String,

    /// Role to assign, repeatable
    #[arg(short, long = "role", value_name = "SCOPE:ROLE[@PROJECT_ID]")]
    pub roles: Vec<Role>,

    /// Group to add the user to, repeatable
    #[arg(short, long = "group", value_name = "GROUP_ID")]
    pub groups: Vec<String>,

    /// Federation the user signs in through
    #[arg(long, requires = "external_id")]
    pub federation_id: Option<String>,

    /// User ID inside the identity provider
    #[arg(long, requires = "federation_id")]
    pub external_id: Option<String>,
}

impl CreateArgs {
    fn into_request(self) -> CreateUserRequest {
        let federation = match (self.federation_id, self.external_id) {
            (Some(id), Some(external_id)) => Some(UserFederation { external_id, id }),
            _ => None,
        };
        let auth_type = if federation.is_some() {
            AuthType::Federated
        } else {
            AuthType::Local
        };

        CreateUserRequest {
            auth_type,
            email: self.email,
            federation,
            roles: self.roles,
            group_ids: self.groups,
        }
    }
}

/// Execute a user subcommand
pub async fn execute(cmd: UserCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    match cmd {
        UserCommands::List => execute_list(&client, session).await,
        UserCommands::Get(args) => execute_get(args, &client, session).await,
        UserCommands::Create(args) => execute_create(args, &client, session).await,
        UserCommands::Delete(args) => execute_delete(args, &client, session).await,
        UserCommands::ResendInvite(args) => execute_resend_invite(args, &client, session).await,
        UserCommands::AssignRole(args) => execute_roles(args, true, &client, session).await,
        UserCommands::UnassignRole(args) => execute_roles(args, false, &client, session).await,
    }
}

async fn execute_list(client: &Client, session: &Session) -> ExitCode {
    let formatter = session.formatter();
    match client.users().list(session.ctx()).await {
        Ok(list) => {
            if formatter.is_json() {
                formatter.json(&list);
            } else if list.users.is_empty() {
                formatter.println("No users found.");
            } else {
                formatter.table(
                    &["ID", "KEYSTONE ID", "AUTH", "ROLES"],
                    list.users.iter().map(user_row),
                );
            }
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn user_row(user: &User) -> Vec<String> {
    vec![
        user.id.clone(),
        user.keystone_id.clone(),
        user.auth_type.to_string(),
        format_roles(&user.roles),
    ]
}

async fn execute_get(args: UserIdArgs, client: &Client, session: &Session) -> ExitCode {
    match client.users().get(session.ctx(), &args.id).await {
        Ok(user) => {
            print_user(&user, session);
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

async fn execute_create(args: CreateArgs, client: &Client, session: &Session) -> ExitCode {
    match client.users().create(session.ctx(), args.into_request()).await {
        Ok(user) => {
            print_user(&user, session);
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn print_user(user: &User, session: &Session) {
    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(user);
        return;
    }

    formatter.println(&format!("ID:          {}", formatter.style_name(&user.id)));
    formatter.println(&format!("Keystone ID: {}", user.keystone_id));
    formatter.println(&format!("Auth type:   {}", user.auth_type));
    if let Some(federation) = &user.federation {
        formatter.println(&format!(
            "Federation:  {} (external ID {})",
            federation.id, federation.external_id
        ));
    }
    formatter.println(&format!("Roles:       {}", format_roles(&user.roles)));
}

async fn execute_delete(args: UserIdArgs, client: &Client, session: &Session) -> ExitCode {
    match client.users().delete(session.ctx(), &args.id).await {
        Ok(()) => {
            session
                .formatter()
                .success(&format!("User '{}' deleted.", args.id));
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

async fn execute_resend_invite(args: UserIdArgs, client: &Client, session: &Session) -> ExitCode {
    match client.users().resend_invite(session.ctx(), &args.id).await {
        Ok(()) => {
            session
                .formatter()
                .success(&format!("Invitation sent again to user '{}'.", args.id));
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
    let users = client.users();
    let result = if assign {
        users.assign_roles(session.ctx(), &args.id, &args.roles).await
    } else {
        users.unassign_roles(session.ctx(), &args.id, &args.roles).await
    };

    match result {
        Ok(()) => {
            let verb = if assign { "assigned to" } else { "revoked from" };
            session.formatter().success(&format!(
                "Roles {} {verb} user '{}'.",
                format_roles(&args.roles),
                args.id
            ));
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}
