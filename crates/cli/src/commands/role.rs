//! Role catalog commands

use clap::Subcommand;

use super::Session;
use crate::exit_code::ExitCode;

/// Role subcommands
#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List roles available for assignment
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Include deprecated roles
    #[arg(long)]
    pub all: bool,
}

/// Execute a role subcommand
pub async fn execute(cmd: RoleCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };

    let RoleCommands::List(args) = cmd;
    let mut list = match client.roles().list(session.ctx()).await {
        Ok(list) => list,
        Err(e) => return session.fail(&e),
    };
    if !args.all {
        list.roles.retain(|role| !role.deprecated);
    }

    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(&list);
    } else if list.roles.is_empty() {
        formatter.println("No roles found.");
    } else {
        formatter.table(
            &["ROLE", "CATEGORY", "SCOPES", "SUBJECTS", "DESCRIPTION"],
            list.roles.iter().map(|role| {
                vec![
                    role.id.clone(),
                    role.category.clone(),
                    role.scopes.join(", "),
                    role.subject_types.join(", "),
                    role.description.clone(),
                ]
            }),
        );
    }
    ExitCode::Success
}
