//! Resource models
//!
//! Records returned by the IAM API and the option structs accepted by the
//! resource services. Wire-only request bodies live in `iam-client`.

mod certificate;
mod credential;
mod federation;
mod group;
mod role;
mod service_user;
mod user;

pub use certificate::{
    Certificate, CertificateList, CreateCertificateRequest, UpdateCertificateRequest,
};
pub use credential::{CreatedCredential, Credential, CredentialList};
pub use federation::{
    CreateFederationRequest, Federation, FederationList, UpdateFederationRequest,
};
pub use group::{
    CreateGroupRequest, Group, GroupDetails, GroupList, GroupServiceUser, GroupUser,
    UpdateGroupRequest,
};
pub use role::{AvailableRole, Role, RoleList, RoleName, Scope};
pub use service_user::{
    CreateServiceUserRequest, ServiceUser, ServiceUserList, UpdateServiceUserRequest,
};
pub use user::{AuthType, CreateUserRequest, User, UserFederation, UserList};
