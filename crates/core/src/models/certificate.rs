//! Federation signing certificates

use serde::{Deserialize, Serialize};

/// A certificate attached to a federation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: String,

    #[serde(default)]
    pub account_id: String,

    #[serde(default)]
    pub federation_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub not_before: String,

    #[serde(default)]
    pub not_after: String,

    #[serde(default)]
    pub fingerprint: String,

    /// PEM body
    #[serde(default)]
    pub data: String,
}

/// Response of the certificates list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateList {
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

/// Options for uploading a certificate
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateCertificateRequest {
    pub name: String,
    pub description: String,
    /// PEM body
    pub data: String,
}

/// Options for updating a certificate; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateCertificateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
