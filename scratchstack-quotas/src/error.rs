use {
    crate::{ApiError, ApiErrorKind},
    scratchstack_arn::ArnError,
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    },
};

/// Errors from resolving a quota.
#[derive(Debug)]
pub enum QuotaError {
    /// The lookup was misconfigured: both or neither of the quota code and quota name were given, or one of them
    /// was malformed. Detected before any remote call.
    Config(String),

    /// No quota matched, in either the applied quotas or the AWS default catalog. `source` is the quota service's
    /// own not-found error when the miss came from a direct get rather than a listing.
    NotFound {
        service_code: String,
        identifier: String,
        source: Option<ApiError>,
    },

    /// The quota service reached the quota but could not evaluate it, e.g. because a service it depends on denied
    /// access (`DEPENDENCY_ACCESS_DENIED_ERROR`).
    Dependency {
        service_code: String,
        identifier: String,
        code: String,
        message: String,
    },

    /// The caller is not allowed to call the quota service.
    Permission(ApiError),

    /// Throttling, network, or service failures from the client.
    Transport(ApiError),

    /// The quota has neither an applied nor a default value.
    MissingValue {
        service_code: String,
        quota_code: String,
    },

    InvalidArn(ArnError),
}

impl QuotaError {
    /// The remote error code behind this error, if there is one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Dependency {
                code,
                ..
            } => Some(code),
            Self::NotFound {
                source: Some(e),
                ..
            }
            | Self::Permission(e)
            | Self::Transport(e) => Some(&e.code),
            _ => None,
        }
    }

    /// Classify a client error raised while looking up `identifier` in `service_code`.
    pub(crate) fn from_api<S: Display>(e: ApiError, service_code: &str, identifier: S) -> Self {
        match e.kind {
            ApiErrorKind::NotFound => Self::NotFound {
                service_code: service_code.to_string(),
                identifier: identifier.to_string(),
                source: Some(e),
            },
            ApiErrorKind::AccessDenied => Self::Permission(e),
            ApiErrorKind::Throttled | ApiErrorKind::Unavailable | ApiErrorKind::Other => Self::Transport(e),
        }
    }
}

impl Display for QuotaError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::NotFound {
                service_code,
                identifier,
                ..
            } => write!(f, "Service ({service_code}) quota ({identifier}) not found"),
            Self::Dependency {
                service_code,
                identifier,
                code,
                message,
            } => {
                if message.is_empty() {
                    write!(f, "Unable to get service ({service_code}) quota ({identifier}): {code}")
                } else {
                    write!(f, "Unable to get service ({service_code}) quota ({identifier}): {code}: {message}")
                }
            }
            Self::Permission(e) => write!(f, "Permission denied: {e}"),
            Self::Transport(e) => write!(f, "Quota service request failed: {e}"),
            Self::MissingValue {
                service_code,
                quota_code,
            } => write!(f, "Service ({service_code}) quota ({quota_code}) has no applied or default value"),
            Self::InvalidArn(e) => write!(f, "Invalid ARN: {e}"),
        }
    }
}

impl Error for QuotaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound {
                source: Some(e),
                ..
            }
            | Self::Permission(e)
            | Self::Transport(e) => Some(e),
            Self::InvalidArn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ArnError> for QuotaError {
    fn from(e: ArnError) -> Self {
        Self::InvalidArn(e)
    }
}
