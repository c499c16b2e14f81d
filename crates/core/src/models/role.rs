//! Roles and role scopes

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Name of a role that can be assigned to users, service users and groups
///
/// Well-known names are provided as constants; any other string the API
/// accepts can be wrapped with [`RoleName::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(Cow<'static, str>);

impl RoleName {
    /// Account owner
    pub const ACCOUNT_OWNER: RoleName = RoleName(Cow::Borrowed("account_owner"));
    /// User administrator
    pub const IAM_ADMIN: RoleName = RoleName(Cow::Borrowed("iam.admin"));
    /// Account or project administrator
    pub const MEMBER: RoleName = RoleName(Cow::Borrowed("member"));
    /// Account or project reader
    pub const READER: RoleName = RoleName(Cow::Borrowed("reader"));
    /// Billing administrator
    pub const BILLING: RoleName = RoleName(Cow::Borrowed("billing"));
    /// Object storage administrator, service users only
    pub const OBJECT_STORAGE_ADMIN: RoleName = RoleName(Cow::Borrowed("object_storage:admin"));
    /// Object storage user, service users only
    pub const OBJECT_STORAGE_USER: RoleName = RoleName(Cow::Borrowed("object_storage_user"));

    pub fn new(name: impl Into<String>) -> Self {
        RoleName(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleName {
    fn from(name: &str) -> Self {
        RoleName::new(name)
    }
}

impl From<String> for RoleName {
    fn from(name: String) -> Self {
        RoleName::new(name)
    }
}

/// Scope a role applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Account,
    Project,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Scope::Account => "account",
            Scope::Project => "project",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "account" => Ok(Scope::Account),
            "project" => Ok(Scope::Project),
            other => Err(Error::new(
                ErrorKind::RequestValidationFailed,
                format!("Unknown role scope '{other}', expected 'account' or 'project'"),
            )),
        }
    }
}

/// A role assignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// Project the role is bound to; only for project scope
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    pub role_name: RoleName,

    pub scope: Scope,
}

impl Role {
    /// Account-scoped role
    pub fn account(role_name: RoleName) -> Self {
        Self {
            project_id: None,
            role_name,
            scope: Scope::Account,
        }
    }

    /// Project-scoped role
    pub fn project(role_name: RoleName, project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            role_name,
            scope: Scope::Project,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scope, self.role_name)?;
        if let Some(project_id) = &self.project_id {
            write!(f, "@{project_id}")?;
        }
        Ok(())
    }
}

/// Parses `scope:role_name[@project_id]`, e.g. `project:member@a1b2`
impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scope, rest) = s.split_once(':').ok_or_else(|| {
            Error::new(
                ErrorKind::RequestValidationFailed,
                format!("Invalid role '{s}', expected scope:role_name[@project_id]"),
            )
        })?;
        let scope: Scope = scope.parse()?;

        let (role_name, project_id) = match rest.rsplit_once('@') {
            Some((name, project)) => (name, Some(project)),
            None => (rest, None),
        };
        if role_name.is_empty() {
            return Err(Error::new(
                ErrorKind::RequestValidationFailed,
                format!("Invalid role '{s}': empty role name"),
            ));
        }

        match (scope, project_id) {
            (Scope::Account, None) => Ok(Role::account(RoleName::new(role_name))),
            (Scope::Account, Some(_)) => Err(Error::new(
                ErrorKind::RequestValidationFailed,
                format!("Invalid role '{s}': account scope takes no project"),
            )),
            (Scope::Project, Some(project)) if !project.is_empty() => {
                Ok(Role::project(RoleName::new(role_name), project))
            }
            (Scope::Project, _) => Err(Error::new(
                ErrorKind::ProjectIdRequired,
                format!("Invalid role '{s}': project scope needs @project_id"),
            )),
        }
    }
}

/// A role available for assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableRole {
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub scopes: Vec<String>,

    #[serde(default)]
    pub subject_types: Vec<String>,

    #[serde(default)]
    pub available_in_onboarding: bool,

    #[serde(default)]
    pub deprecated: bool,
}

/// Response of the roles list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleList {
    #[serde(default)]
    pub roles: Vec<AvailableRole>,
}
