//! Service users

use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// A service user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUser {
    pub id: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Response of the service users list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUserList {
    #[serde(default)]
    pub users: Vec<ServiceUser>,
}

/// Options for creating a service user
#[derive(Clone, Default)]
pub struct CreateServiceUserRequest {
    pub enabled: bool,
    pub name: String,
    pub password: String,
    pub roles: Vec<Role>,
}

impl fmt::Debug for CreateServiceUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateServiceUserRequest")
            .field("enabled", &self.enabled)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("roles", &self.roles)
            .finish()
    }
}

/// Options for updating a service user; `None` leaves a field unchanged
#[derive(Clone, Default)]
pub struct UpdateServiceUserRequest {
    pub enabled: Option<bool>,
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateServiceUserRequest {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.enabled.is_none() && self.name.is_none() && self.password.is_none()
    }
}

impl fmt::Debug for UpdateServiceUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateServiceUserRequest")
            .field("enabled", &self.enabled)
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
