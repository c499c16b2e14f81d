//! SAML federation commands

use clap::Subcommand;
use iam_client::Client;
use iam_core::models::{CreateFederationRequest, Federation, UpdateFederationRequest};

use super::Session;
use crate::exit_code::ExitCode;

/// Federation subcommands
#[derive(Subcommand, Debug)]
pub enum FederationCommands {
    /// List federations
    List,

    /// Show a federation
    Get(FederationIdArgs),

    /// Create a federation
    Create(CreateArgs),

    /// Update a federation
    Update(UpdateArgs),

    /// Delete a federation
    Delete(FederationIdArgs),

    /// Check that a federation exists
    Check(FederationIdArgs),
}

#[derive(clap::Args, Debug)]
pub struct FederationIdArgs {
    /// Federation ID
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Federation name
    pub name: String,

    /// IdP entity ID
    #[arg(long)]
    pub issuer: String,

    /// IdP single sign-on URL
    #[arg(long)]
    pub sso_url: String,

    /// How long a federated session lives, in hours
    #[arg(long)]
    pub session_max_age_hours: u32,

    #[arg(long)]
    pub description: Option<String>,

    /// Sign SAML authentication requests
    #[arg(long)]
    pub sign_authn_requests: bool,

    /// Force re-authentication at the IdP
    #[arg(long)]
    pub force_authn: bool,
}

impl From<CreateArgs> for CreateFederationRequest {
    fn from(args: CreateArgs) -> Self {
        Self {
            name: args.name,
            description: args.description,
            issuer: args.issuer,
            sso_url: args.sso_url,
            sign_authn_requests: args.sign_authn_requests,
            force_authn: args.force_authn,
            session_max_age_hours: args.session_max_age_hours,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Federation ID
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub issuer: Option<String>,

    #[arg(long)]
    pub sso_url: Option<String>,

    #[arg(long, value_name = "BOOL")]
    pub sign_authn_requests: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub force_authn: Option<bool>,

    #[arg(long)]
    pub session_max_age_hours: Option<u32>,
}

impl UpdateArgs {
    fn split(self) -> (String, UpdateFederationRequest) {
        let request = UpdateFederationRequest {
            name: self.name,
            description: self.description,
            issuer: self.issuer,
            sso_url: self.sso_url,
            sign_authn_requests: self.sign_authn_requests,
            force_authn: self.force_authn,
            session_max_age_hours: self.session_max_age_hours,
        };
        (self.id, request)
    }
}

/// Execute a federation subcommand
pub async fn execute(cmd: FederationCommands, session: &Session) -> ExitCode {
    let client = match session.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let federations = client.federations();
    let ctx = session.ctx();

    match cmd {
        FederationCommands::List => execute_list(&client, session).await,
        FederationCommands::Get(args) => show(federations.get(ctx, &args.id).await, session),
        FederationCommands::Create(args) => {
            show(federations.create(ctx, args.into()).await, session)
        }
        FederationCommands::Update(args) => {
            let (id, input) = args.split();
            match federations.update(ctx, &id, input).await {
                Ok(()) => {
                    session
                        .formatter()
                        .success(&format!("Federation '{id}' updated."));
                    ExitCode::Success
                }
                Err(e) => session.fail(&e),
            }
        }
        FederationCommands::Delete(args) => match federations.delete(ctx, &args.id).await {
            Ok(()) => {
                session
                    .formatter()
                    .success(&format!("Federation '{}' deleted.", args.id));
                ExitCode::Success
            }
            Err(e) => session.fail(&e),
        },
        FederationCommands::Check(args) => match federations.check(ctx, &args.id).await {
            Ok(()) => {
                let formatter = session.formatter();
                if formatter.is_json() {
                    formatter.json(&serde_json::json!({ "id": args.id, "exists": true }));
                } else {
                    formatter.success(&format!("Federation '{}' exists.", args.id));
                }
                ExitCode::Success
            }
            Err(e) if e.status() == Some(404) => {
                session
                    .formatter()
                    .error(&format!("Federation '{}' does not exist.", args.id));
                ExitCode::NotFound
            }
            Err(e) => session.fail(&e),
        },
    }
}

async fn execute_list(client: &Client, session: &Session) -> ExitCode {
    let formatter = session.formatter();
    match client.federations().list(session.ctx()).await {
        Ok(list) => {
            if formatter.is_json() {
                formatter.json(&list);
            } else if list.federations.is_empty() {
                formatter.println("No federations found.");
            } else {
                formatter.table(
                    &["ID", "NAME", "ISSUER", "SESSION HOURS"],
                    list.federations.iter().map(|federation| {
                        vec![
                            federation.id.clone(),
                            federation.name.clone(),
                            federation.issuer.clone(),
                            federation.session_max_age_hours.to_string(),
                        ]
                    }),
                );
            }
            ExitCode::Success
        }
        Err(e) => session.fail(&e),
    }
}

fn show(result: iam_core::Result<Federation>, session: &Session) -> ExitCode {
    let federation = match result {
        Ok(federation) => federation,
        Err(e) => return session.fail(&e),
    };

    let formatter = session.formatter();
    if formatter.is_json() {
        formatter.json(&federation);
        return ExitCode::Success;
    }

    formatter.println(&format!(
        "ID:                  {}",
        formatter.style_name(&federation.id)
    ));
    formatter.println(&format!("Name:                {}", federation.name));
    formatter.println(&format!("Description:         {}", federation.description));
    formatter.println(&format!("Issuer:              {}", federation.issuer));
    formatter.println(&format!("SSO URL:             {}", federation.sso_url));
    formatter.println(&format!(
        "Sign authn requests: {}",
        federation.sign_authn_requests
    ));
    formatter.println(&format!("Force authn:         {}", federation.force_authn));
    formatter.println(&format!(
        "Session max age:     {}h",
        federation.session_max_age_hours
    ));
    ExitCode::Success
}
