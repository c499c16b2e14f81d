//! SAML federations API

use std::sync::Arc;

use iam_core::models::{
    CreateFederationRequest, Federation, FederationList, UpdateFederationRequest,
};
use iam_core::{Error, ErrorKind, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use super::{FEDERATIONS_API, execute, fetch, json_request, require};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `v1/federations/saml`
#[derive(Debug, Clone)]
pub struct Federations {
    base: Arc<BaseClient>,
}

impl Federations {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(&self, ctx: &CancellationToken) -> Result<FederationList> {
        let request = RequestDescriptor::new(Method::GET, FEDERATIONS_API);
        fetch(&self.base, ctx, request).await
    }

    pub async fn get(&self, ctx: &CancellationToken, federation_id: &str) -> Result<Federation> {
        require_federation_id(federation_id)?;

        let request =
            RequestDescriptor::new(Method::GET, format!("{FEDERATIONS_API}/{federation_id}"));
        fetch(&self.base, ctx, request).await
    }

    pub async fn create(
        &self,
        ctx: &CancellationToken,
        input: CreateFederationRequest,
    ) -> Result<Federation> {
        require(
            &input.name,
            ErrorKind::FederationNameRequired,
            "No name for Federation was provided.",
        )?;
        require(
            &input.issuer,
            ErrorKind::FederationIssuerRequired,
            "No issuer for Federation was provided.",
        )?;
        require(
            &input.sso_url,
            ErrorKind::FederationSsoUrlRequired,
            "No sso_url for Federation was provided.",
        )?;
        if input.session_max_age_hours == 0 {
            return Err(Error::new(
                ErrorKind::FederationMaxAgeHoursRequired,
                "No session_max_age_hours for Federation was provided.",
            ));
        }

        let request = json_request(Method::POST, FEDERATIONS_API.to_string(), &input)?;
        fetch(&self.base, ctx, request).await
    }

    /// Check that a federation exists
    ///
    /// Issues a HEAD request. HEAD responses carry no body, so a failing
    /// status surfaces as [`ErrorKind::InternalAppError`] with the status set.
    pub async fn check(&self, ctx: &CancellationToken, federation_id: &str) -> Result<()> {
        require_federation_id(federation_id)?;

        let request =
            RequestDescriptor::new(Method::HEAD, format!("{FEDERATIONS_API}/{federation_id}"));
        execute(&self.base, ctx, request).await
    }

    pub async fn update(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
        input: UpdateFederationRequest,
    ) -> Result<()> {
        require_federation_id(federation_id)?;
        if input.session_max_age_hours == Some(0) {
            return Err(Error::new(
                ErrorKind::FederationMaxAgeHoursRequired,
                "session_max_age_hours must be positive.",
            ));
        }

        let request = json_request(
            Method::PATCH,
            format!("{FEDERATIONS_API}/{federation_id}"),
            &input,
        )?;
        execute(&self.base, ctx, request).await
    }

    pub async fn delete(&self, ctx: &CancellationToken, federation_id: &str) -> Result<()> {
        require_federation_id(federation_id)?;

        let request =
            RequestDescriptor::new(Method::DELETE, format!("{FEDERATIONS_API}/{federation_id}"));
        execute(&self.base, ctx, request).await
    }
}

pub(crate) fn require_federation_id(federation_id: &str) -> Result<()> {
    require(
        federation_id,
        ErrorKind::FederationIdRequired,
        "No federationID was provided.",
    )
}
