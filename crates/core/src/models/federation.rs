//! SAML federations

use serde::{Deserialize, Serialize};

/// A configured SAML federation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Federation {
    pub id: String,

    #[serde(default)]
    pub account_id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    pub issuer: String,

    pub sso_url: String,

    #[serde(default)]
    pub sign_authn_requests: bool,

    #[serde(default)]
    pub force_authn: bool,

    #[serde(default)]
    pub session_max_age_hours: u32,
}

/// Response of the federations list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederationList {
    #[serde(default)]
    pub federations: Vec<Federation>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Options for creating a federation
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateFederationRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// IdP entity ID
    pub issuer: String,

    /// IdP single sign-on endpoint
    pub sso_url: String,

    #[serde(skip_serializing_if = "is_false")]
    pub sign_authn_requests: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub force_authn: bool,

    /// Must be positive
    pub session_max_age_hours: u32,
}

/// Options for updating a federation; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFederationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sso_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_authn_requests: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_authn: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_max_age_hours: Option<u32>,
}
