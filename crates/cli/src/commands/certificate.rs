//! Federation certificate commands

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use iam_client::Client;
use iam_core::models::{Certificate, CreateCertificateRequest, UpdateCertificateRequest};

use super::Session;
use crate::exit_code::ExitCode;

/// Certificate subcommands
#[derive(Subcommand, Debug)]
pub enum CertificateCommands {
    /// List certificates of a federation
    List(FederationArgs),

    /// Show a certificate
    Get(CertificateIdArgs),

    /// Upload a PEM certificate
    Create(CreateArgs),

    /// Rename a certificate or change its description
    Update(UpdateArgs),

    /// Delete a certificate
    Delete(CertificateIdArgs),
}

#[derive(clap::Args, Debug)]
pub struct FederationArgs {
    /// Federation ID
    pub federation_id: String,
}

#[derive(clap::Args, Debug)]
pub struct CertificateIdArgs {
    /// Federation ID
    pub federation_id: String,

    /// Certificate ID
    pub certificate_id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Federation ID
    pub federation_id: String,

    /// Certificate name
    pub name: String,

    /// PEM file to upload, `-` reads stdin
    #[arg(long)]
    pub file: PathBuf,

    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Federation ID
    pub federation_id: String,

    /// Certificate ID
    pub certificate_id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

/// Execute a certificate subcommand
pub async fn execute(cmd: CertificateCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let certificates = client.certificates();
    let ctx = session.ctx();

    match cmd {
        CertificateCommands::List(args) => execute_list(args, &client, session).await,
        CertificateCommands::Get(args) => {
            let result = certificates
                .get(ctx, &args.federation_id, &args.certificate_id)
                .await;
            show(result, session)
        }
        CertificateCommands::Create(args) => {
            let data = match read_pem(&args.file) {
                Ok(data) => data,
                Err(e) => {
                    session.formatter().error(&format!("{e:#}"));
                    return ExitCode::UsageError;
                }
            };
            let input = CreateCertificateRequest {
                name: args.name,
                description: args.description,
                data,
            };
            show(certificates.create(ctx, &args.federation_id, input).await, session)
        }
        CertificateCommands::Update(args) => {
            let input = UpdateCertificateRequest {
                name: args.name,
                description: args.description,
            };
            let result = certificates
                .update(ctx, &args.federation_id, &args.certificate_id, input)
                .await;
            show(result, session)
        }
        CertificateCommands::Delete(args) => {
            match certificates
                .delete(ctx, &args.federation_id, &args.certificate_id)
                .await
            {
                Ok(()) => {
                    session
                        .formatter()
                        .success(&format!("Certificate '{}' deleted.", args.certificate_id));
                    ExitCode::Success
                }
                Err(e) => session.fail(&e),
            }
        }
    }
}

/// Read certificate data from a file or stdin
fn read_pem(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut data = String::new();
        std::io::stdin()
            .read_to_string(&mut data)
            .context("Failed to read certificate from stdin")?;
        return Ok(data);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read certificate file '{}'", path.display()))
}

async fn execute_list(args: FederationArgs, client: &Client, session: &Session) -> ExitCode {
    let formatter = session.formatter();
    match client
        .certificates()
        .list(session.ctx(), &args.federation_id)
        .await
    {
        Ok(list) => {
            if formatter.is_json() {
                formatter.json(&list);
            } else if list.certificates.is_empty() {
                formatter.println("No certificates found.");
            } else {
                formatter.table(
                    &["ID", "NAME", "NOT AFTER", "FINGERPRINT"],
                    list.certificates.iter().map(|cert| {
                        vec![
                            cert.id.clone(),
                            cert.name.clone(),
                            cert.not_after.clone(),
                            cert.fingerprint.clone(),
                        ]
                    }),
                );
            }
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn show(result: iam_core::Result<Certificate>, session: &Session) -> ExitCode {
    let cert = match result {
        Ok(cert) => cert,
        Err(e) => return session.fail(&e),
    };

    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(&cert);
        return ExitCode::Success;
    }

    formatter.println(&format!("ID:          {}", formatter.style_name(&cert.id)));
    formatter.println(&format!("Federation:  {}", cert.federation_id));
    formatter.println(&format!("Name:        {}", cert.name));
    formatter.println(&format!("Description: {}", cert.description));
    formatter.println(&format!("Valid:       {} .. {}", cert.not_before, cert.not_after));
    formatter.println(&format!("Fingerprint: {}", cert.fingerprint));
    ExitCode::Success
}
