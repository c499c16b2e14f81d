//! Federation certificates API

use std::sync::Arc;

use iam_core::models::{
    Certificate, CertificateList, CreateCertificateRequest, UpdateCertificateRequest,
};
use iam_core::{Error, ErrorKind, Result};
use reqwest::Method;
use tokio_util::sync::CancellationToken;

use super::federations::require_federation_id;
use super::{FEDERATIONS_API, execute, fetch, json_request, require};
use crate::client::{BaseClient, RequestDescriptor};

/// Client for `v1/federations/saml/{federation_id}/certificates`
#[derive(Debug, Clone)]
pub struct Certificates {
    base: Arc<BaseClient>,
}

impl Certificates {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn list(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
    ) -> Result<CertificateList> {
        require_federation_id(federation_id)?;

        let request = RequestDescriptor::new(Method::GET, certificates_path(federation_id));
        fetch(&self.base, ctx, request).await
    }

    pub async fn get(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
        certificate_id: &str,
    ) -> Result<Certificate> {
        require_ids(federation_id, certificate_id)?;

        let request = RequestDescriptor::new(
            Method::GET,
            certificate_path(federation_id, certificate_id),
        );
        fetch(&self.base, ctx, request).await
    }

    /// Upload a PEM certificate
    pub async fn create(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
        input: CreateCertificateRequest,
    ) -> Result<Certificate> {
        require_federation_id(federation_id)?;
        if input.data.is_empty() {
            return Err(Error::new(
                ErrorKind::InputDataRequired,
                "No certificate data was provided.",
            ));
        }

        let request = json_request(Method::POST, certificates_path(federation_id), &input)?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn update(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
        certificate_id: &str,
        input: UpdateCertificateRequest,
    ) -> Result<Certificate> {
        require_ids(federation_id, certificate_id)?;

        let request = json_request(
            Method::PATCH,
            certificate_path(federation_id, certificate_id),
            &input,
        )?;
        fetch(&self.base, ctx, request).await
    }

    pub async fn delete(
        &self,
        ctx: &CancellationToken,
        federation_id: &str,
        certificate_id: &str,
    ) -> Result<()> {
        require_ids(federation_id, certificate_id)?;

        let request = RequestDescriptor::new(
            Method::DELETE,
            certificate_path(federation_id, certificate_id),
        );
        execute(&self.base, ctx, request).await
    }
}

fn require_ids(federation_id: &str, certificate_id: &str) -> Result<()> {
    require_federation_id(federation_id)?;
    require(
        certificate_id,
        ErrorKind::FederationCertificateIdRequired,
        "No certificateID was provided.",
    )
}

fn certificates_path(federation_id: &str) -> String {
    format!("{FEDERATIONS_API}/{federation_id}/certificates")
}

fn certificate_path(federation_id: &str, certificate_id: &str) -> String {
    format!("{FEDERATIONS_API}/{federation_id}/certificates/{certificate_id}")
}
