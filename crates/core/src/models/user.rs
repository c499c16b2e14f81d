//! Panel users

use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// How a user signs in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthType {
    /// Password login; the default
    #[default]
    Local,
    /// SAML login; requires a federation binding
    Federated,
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthType::Local => f.write_str("local"),
            AuthType::Federated => f.write_str("federated"),
        }
    }
}

/// Federation binding of a federated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFederation {
    /// User identifier on the identity provider side
    pub external_id: String,
    /// Federation ID
    pub id: String,
}

/// A panel user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default)]
    pub keystone_id: String,

    #[serde(default)]
    pub auth_type: AuthType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation: Option<UserFederation>,

    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Response of the users list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Options for creating a user
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub auth_type: AuthType,
    /// Invitation address; required
    pub email: String,
    pub federation: Option<UserFederation>,
    pub roles: Vec<Role>,
    /// Groups the user joins on creation
    pub group_ids: Vec<String>,
}
