//! Group commands

use clap::Subcommand;
use iam_client::Client;
use iam_core::models::{CreateGroupRequest, GroupDetails, UpdateGroupRequest};

use super::{RoleAssignmentArgs, Session, format_roles};
use crate::exit_code::ExitCode;

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    List,

    /// Show a group and its members
    Get(GroupIdArgs),

    /// Create a group
    Create(CreateArgs),

    /// Rename a group or change its description
    Update(UpdateArgs),

    /// Delete a group
    Delete(GroupIdArgs),

    /// Assign roles to a group
    AssignRole(RoleAssignmentArgs),

    /// Revoke roles from a group
    UnassignRole(RoleAssignmentArgs),

    /// Add users to a group
    AddUsers(MembersArgs),

    /// Remove users from a group
    RemoveUsers(MembersArgs),
}

#[derive(clap::Args, Debug)]
pub struct GroupIdArgs {
    /// Group ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Group name
    pub name: String,

    /// Group description
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Group ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description; an empty value clears it
    #[arg(long)]
    pub description: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct MembersArgs {
    /// Group ID
    pub id: String,

    /// Keystone IDs of the users
    #[arg(required = true)]
    pub keystone_ids: Vec<String>,
}

/// Execute a group subcommand
pub async fn execute(cmd: GroupCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let groups = client.groups();
    let ctx = session.ctx();

    match cmd {
        GroupCommands::List => execute_list(&client, session).await,
        GroupCommands::Get(args) => show(groups.get(ctx, &args.id).await, session),
        GroupCommands::Create(args) => {
            let input = CreateGroupRequest {
                name: args.name,
                description: args.description,
            };
            show(groups.create(ctx, input).await, session)
        }
        GroupCommands::Update(args) => {
            let input = UpdateGroupRequest {
                name: args.name,
                description: args.description,
            };
            show(groups.update(ctx, &args.id, input).await, session)
        }
        GroupCommands::Delete(args) => {
            let result = groups.delete(ctx, &args.id).await;
            done(result, session, format!("Group '{}' deleted.", args.id))
        }
        GroupCommands::AssignRole(args) => {
            let result = groups.assign_roles(ctx, &args.id, &args.roles).await;
            let message = format!(
                "Roles {} assigned to group '{}'.",
                format_roles(&args.roles),
                args.id
            );
            done(result, session, message)
        }
        GroupCommands::UnassignRole(args) => {
            let result = groups.unassign_roles(ctx, &args.id, &args.roles).await;
            let message = format!(
                "Roles {} revoked from group '{}'.",
                format_roles(&args.roles),
                args.id
            );
            done(result, session, message)
        }
        GroupCommands::AddUsers(args) => {
            let result = groups.add_users(ctx, &args.id, &args.keystone_ids).await;
            let message = format!(
                "Added {} user(s) to group '{}'.",
                args.keystone_ids.len(),
                args.id
            );
            done(result, session, message)
        }
        GroupCommands::RemoveUsers(args) => {
            let result = groups.remove_users(ctx, &args.id, &args.keystone_ids).await;
            let message = format!(
                "Removed {} user(s) from group '{}'.",
                args.keystone_ids.len(),
                args.id
            );
            done(result, session, message)
        }
    }
}

async fn execute_list(client: &Client, session: &Session) -> ExitCode {
    let formatter = session.formatter();
    match client.groups().list(session.ctx()).await {
        Ok(list) => {
            if formatter.is_json() {
                formatter.json(&list);
            } else if list.groups.is_empty() {
                formatter.println("No groups found.");
            } else {
                formatter.table(
                    &["ID", "NAME", "DESCRIPTION", "ROLES"],
                    list.groups.iter().map(|group| {
                        vec![
                            group.id.clone(),
                            group.name.clone(),
                            group.description.clone(),
                            format_roles(&group.roles),
                        ]
                    }),
                );
            }
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn show(result: iam_core::Result<GroupDetails>, session: &Session) -> ExitCode {
    let details = match result {
        Ok(details) => details,
        Err(e) => return session.fail(&e),
    };

    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(&details);
        return ExitCode::Success;
    }

    let group = &details.group;
    formatter.println(&format!("ID:          {}", formatter.style_name(&group.id)));
    formatter.println(&format!("Name:        {}", group.name));
    formatter.println(&format!("Description: {}", group.description));
    formatter.println(&format!("Roles:       {}", format_roles(&group.roles)));

    if !details.users.is_empty() {
        formatter.println("");
        formatter.table(
            &["USER ID", "KEYSTONE ID", "AUTH"],
            details.users.iter().map(|user| {
                vec![
                    user.id.clone(),
                    user.keystone_id.clone(),
                    user.auth_type.to_string(),
                ]
            }),
        );
    }
    if !details.service_users.is_empty() {
        formatter.println("");
        formatter.table(
            &["SERVICE USER ID", "NAME", "ENABLED"],
            details.service_users.iter().map(|user| {
                vec![user.id.clone(), user.name.clone(), user.enabled.to_string()]
            }),
        );
    }
    ExitCode::Success
}

fn done(result: iam_core::Result<()>, session: &Session, message: String) -> ExitCode {
    match result {
        Ok(()) => {
            session.formatter().success(&message);
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}
