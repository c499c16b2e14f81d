//! S3 credentials of service users

use std::fmt;

use serde::{Deserialize, Serialize};

/// An S3 credential; the secret is never returned after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,

    #[serde(default)]
    pub project_id: String,

    pub access_key: String,
}

/// Response of the credentials list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialList {
    #[serde(default)]
    pub credentials: Vec<Credential>,
}

/// A freshly created credential, carrying its one-time secret
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedCredential {
    #[serde(flatten)]
    pub credential: Credential,

    pub secret_key: String,
}

impl fmt::Debug for CreatedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreatedCredential")
            .field("credential", &self.credential)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
