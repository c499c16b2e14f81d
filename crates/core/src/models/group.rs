//! User groups

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::user::{AuthType, UserFederation};

/// Basic group information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Response of the groups list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupList {
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// A group together with its members
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetails {
    #[serde(flatten)]
    pub group: Group,

    #[serde(default)]
    pub service_users: Vec<GroupServiceUser>,

    #[serde(default)]
    pub users: Vec<GroupUser>,
}

/// Service user as listed in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupServiceUser {
    pub id: String,

    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub name: String,
}

/// Panel user as listed in a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupUser {
    pub id: String,

    #[serde(default)]
    pub keystone_id: String,

    #[serde(default)]
    pub auth_type: AuthType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub federation: Option<UserFederation>,
}

/// Options for creating a group
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateGroupRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Options for updating a group; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `Some("")` clears the description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_details_flattens_group() {
        let json = r#"{
            "id": "g-1",
            "name": "ops",
            "description": "operators",
            "roles": [{"role_name": "reader", "scope": "account"}],
            "service_users": [{"id": "su-1", "enabled": true, "name": "robot"}],
            "users": [{"id": "u-1", "keystone_id": "ks-1", "auth_type": "local"}]
        }"#;
        let details: GroupDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.group.id, "g-1");
        assert_eq!(details.group.roles.len(), 1);
        assert_eq!(details.service_users[0].name, "robot");
        assert_eq!(details.users[0].keystone_id, "ks-1");
    }

    #[test]
    fn test_update_request_clears_description() {
        let req = UpdateGroupRequest {
            name: None,
            description: Some(String::new()),
        };
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"description":""}"#
        );
    }
}
