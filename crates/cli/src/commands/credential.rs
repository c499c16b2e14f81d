//! S3 credential commands

use clap::Subcommand;
use serde::Serialize;

use super::Session;
use crate::exit_code::ExitCode;

/// Credential subcommands
#[derive(Subcommand, Debug)]
pub enum CredentialCommands {
    /// List S3 credentials of a service user
    List(ListArgs),

    /// Issue an S3 credential bound to a project
    Create(CreateArgs),

    /// Revoke an S3 credential
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Service user ID
    pub user_id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Service user ID
    pub user_id: String,

    /// Credential name
    pub name: String,

    /// Project the credential is bound to
    #[arg(long)]
    pub project_id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Service user ID
    pub user_id: String,

    /// Access key of the credential
    pub access_key: String,
}

/// JSON output for a freshly issued credential
#[derive(Serialize)]
struct CreatedOutput<'a> {
    name: &'a str,
    project_id: &'a str,
    access_key: &'a str,
    secret_key: &'a str,
}

/// Execute a credential subcommand
pub async fn execute(cmd: CredentialCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let credentials = client.s3_credentials();
    let ctx = session.ctx();
    let formatter = session.formatter();

    match cmd {
        CredentialCommands::List(args) => match credentials.list(ctx, &args.user_id).await {
            Ok(list) => {
                if formatter.is_json() {
                    formatter.json(&list);
                } else if list.is_empty() {
                    formatter.println("No credentials found.");
                } else {
                    formatter.table(
                        &["NAME", "PROJECT ID", "ACCESS KEY"],
                        list.iter().map(|credential| {
                            vec![
                                credential.name.clone(),
                                credential.project_id.clone(),
                                credential.access_key.clone(),
                            ]
                        }),
                    );
                }
                ExitCode::Success
            }
            Err(e) => session.fail(&e),
        },
        CredentialCommands::Create(args) => {
            let created = match credentials
                .create(ctx, &args.user_id, &args.name, &args.project_id)
                .await
            {
                Ok(created) => created,
                Err(e) => return session.fail(&e),
            };

            let credential = &created.credential;
            if formatter.is_json() {
                formatter.json(&CreatedOutput {
                    name: &credential.name,
                    project_id: &credential.project_id,
                    access_key: &credential.access_key,
                    secret_key: &created.secret_key,
                });
            } else {
                formatter.println(&format!("Access key: {}", credential.access_key));
                formatter.println(&format!("Secret key: {}", created.secret_key));
                formatter.warning("The secret key is shown only once. Store it now.");
            }
            ExitCode::Success
        }
        CredentialCommands::Delete(args) => {
            match credentials
                .delete(ctx, &args.user_id, &args.access_key)
                .await
            {
                Ok(()) => {
                    formatter.success(&format!("Credential '{}' deleted.", args.access_key));
                    ExitCode::Success
                }
                Err(e) => session.fail(&e),
            }
        }
    }
}
