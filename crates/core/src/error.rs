//! Error types for iam-core
//!
//! Every failure surfaced by the client is an [`Error`]: a fixed
//! [`ErrorKind`] identity plus the description reported for that call.
//! Callers branch on the kind; the description is for logs and humans.

use std::fmt;

use thiserror::Error;

/// Result type alias for IAM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Broad grouping of error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or rejected credentials
    Auth,
    /// Authenticated, but not allowed
    Forbidden,
    /// Referenced resource does not exist
    NotFound,
    /// Required input is missing or invalid
    Validation,
    /// Resource with the same identity already exists
    AlreadyExists,
    /// Server-side failure
    Server,
    /// Local failure: URL building, JSON encoding, transport
    Application,
    /// Code the local catalog does not know
    Unknown,
}

macro_rules! error_kinds {
    ($( $(#[$meta:meta])* $variant:ident => $code:literal, $category:ident; )+) => {
        /// Error kinds of the IAM API, keyed by their wire code
        ///
        /// The mapping is static: [`ErrorKind::from_code`] is the only lookup
        /// and [`ErrorKind::as_str`] its inverse.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ErrorKind {
            $( $(#[$meta])* $variant, )+
        }

        impl ErrorKind {
            /// Every known kind, in catalog order
            pub const ALL: &'static [ErrorKind] = &[ $( ErrorKind::$variant, )+ ];

            /// Wire code of this kind
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( ErrorKind::$variant => $code, )+
                }
            }

            /// Look up a kind by its wire code
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $( $code => Some(ErrorKind::$variant), )+
                    _ => None,
                }
            }

            /// Category this kind belongs to
            pub const fn category(self) -> ErrorCategory {
                match self {
                    $( ErrorKind::$variant => ErrorCategory::$category, )+
                }
            }
        }
    };
}

error_kinds! {
    /// Client was built without an authentication method
    ClientNoAuthMethod => "CLIENT_NO_AUTH_METHOD", Auth;
    /// API rejected the token (HTTP 401)
    AuthTokenUnauthorized => "AUTH_TOKEN_UNAUTHORIZED", Auth;

    UserNotFound => "USER_NOT_FOUND", NotFound;
    DomainNotFound => "DOMAIN_NOT_FOUND", NotFound;
    ProjectNotFound => "PROJECT_NOT_FOUND", NotFound;
    UserAlreadyExists => "USER_ALREADY_EXISTS", AlreadyExists;
    RequestValidationFailed => "REQUEST_VALIDATION_FAILED", Validation;
    Forbidden => "REQUEST_FORBIDDEN", Forbidden;
    UserUnauthorized => "USER_UNAUTHORIZED", Auth;
    InternalServerError => "INTERNAL_SERVER_ERROR", Server;
    CredentialNotFound => "CRED_NOT_FOUND", NotFound;

    UserIdRequired => "USER_ID_REQUIRED", Validation;
    ProjectIdRequired => "PROJECT_ID_REQUIRED", Validation;
    GroupIdRequired => "GROUP_ID_REQUIRED", Validation;

    GroupNameRequired => "GROUP_NAME_REQUIRED", Validation;
    GroupRolesRequired => "GROUP_ROLES_REQUIRED", Validation;
    GroupUserIdsRequired => "GROUP_USER_IDS_REQUIRED", Validation;
    GroupAlreadyExists => "GROUP_ALREADY_EXISTS", AlreadyExists;
    GroupNotFound => "GROUP_NOT_FOUND", NotFound;
    UserOrGroupNotFound => "USER_OR_GROUP_NOT_FOUND", NotFound;

    FederationNameRequired => "FEDERATION_NAME_REQUIRED", Validation;
    FederationIdRequired => "FEDERATION_ID_REQUIRED", Validation;
    FederationIssuerRequired => "FEDERATION_ISSUER_REQUIRED", Validation;
    FederationSsoUrlRequired => "FEDERATION_SSO_URL_REQUIRED", Validation;
    FederationCertificateIdRequired => "FEDERATION_CERTIFICATE_ID_REQUIRED", Validation;
    FederationMaxAgeHoursRequired => "FEDERATION_MAX_AGE_HOURS_REQUIRED", Validation;
    FederationNotFound => "FEDERATION_NOT_FOUND", NotFound;

    CredentialNameRequired => "CREDENTIAL_NAME_REQUIRED", Validation;
    CredentialAccessKeyRequired => "CREDENTIAL_ACCESS_KEY_REQUIRED", Validation;

    ServiceUserNameRequired => "SERVICE_USER_NAME_REQUIRED", Validation;
    ServiceUserPasswordRequired => "SERVICE_USER_PASSWORD_REQUIRED", Validation;
    ServiceUserRolesRequired => "SERVICE_USER_ROLES_REQUIRED", Validation;

    UserRolesRequired => "USER_ROLES_REQUIRED", Validation;
    UserEmailRequired => "USER_EMAIL_REQUIRED", Validation;

    InputDataRequired => "INPUT_DATA_REQUIRED", Validation;

    /// Local failure: URL join, JSON encode/decode, transport
    InternalAppError => "INTERNAL_APP_ERROR", Application;

    /// Server returned a code missing from this catalog
    Unknown => "UNKNOWN_ERROR", Unknown;
}

impl ErrorKind {
    /// CLI exit code for errors of this kind
    pub const fn exit_code(self) -> i32 {
        match self.category() {
            ErrorCategory::Validation => 2,                      // UsageError
            ErrorCategory::Auth | ErrorCategory::Forbidden => 4, // AuthError
            ErrorCategory::NotFound => 5,                        // NotFound
            ErrorCategory::AlreadyExists => 6,                   // Conflict
            _ => 1,                                              // GeneralError
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Look up the error kind for an API error code
///
/// Returns `None` for codes outside the catalog. Repeated lookups of the same
/// code always yield the same kind.
pub fn get_error(code: &str) -> Option<ErrorKind> {
    ErrorKind::from_code(code)
}

/// Where an error was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorOrigin {
    /// Raised locally before or without any HTTP exchange
    Local,
    /// The HTTP exchange itself failed (network, cancellation, body read)
    Transport,
    /// The server answered with an error status
    Server { status: u16 },
}

/// Error returned by every IAM operation
///
/// Rendered as `iam: <CODE>: <description>`, so logs can be grepped by code.
#[derive(Debug, Clone, Error)]
#[error("iam: {kind}: {description}")]
pub struct Error {
    kind: ErrorKind,
    description: String,
    origin: ErrorOrigin,
}

impl Error {
    /// Create a locally raised error
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            origin: ErrorOrigin::Local,
        }
    }

    /// Create an error for a local application failure
    pub fn internal(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalAppError, description)
    }

    /// Create an error for a failed HTTP exchange
    pub fn transport(description: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InternalAppError,
            description: description.into(),
            origin: ErrorOrigin::Transport,
        }
    }

    /// Create an error decoded from a server response
    pub fn server(kind: ErrorKind, description: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            description: description.into(),
            origin: ErrorOrigin::Server { status },
        }
    }

    /// Kind of this error
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Call-specific description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Where this error was produced
    pub const fn origin(&self) -> ErrorOrigin {
        self.origin
    }

    /// Check whether this error is of the given kind
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Whether the HTTP exchange itself failed
    pub fn is_transport(&self) -> bool {
        self.origin == ErrorOrigin::Transport
    }

    /// HTTP status of the failing response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self.origin {
            ErrorOrigin::Server { status } => Some(status),
            _ => None,
        }
    }

    /// Get the appropriate CLI exit code for this error
    pub const fn exit_code(&self) -> i32 {
        if matches!(self.origin, ErrorOrigin::Transport) {
            return 3; // NetworkError
        }
        self.kind.exit_code()
    }
}

impl PartialEq<ErrorKind> for Error {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::internal(format!("JSON error: {error}"))
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::internal(format!("Invalid URL: {error}"))
    }
}

/// Errors raised while loading or saving CLI configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Get the appropriate CLI exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            ConfigError::Config(_) => 2,
            ConfigError::ProfileNotFound(_) => 5,
            _ => 1,
        }
    }
}
