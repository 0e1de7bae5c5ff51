use {
    crate::{QuotaPage, QuotaRecord},
    async_trait::async_trait,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        sync::Arc,
    },
};

/// Broad classification of a failed quota service call.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ApiErrorKind {
    /// The service, quota, or code does not exist (or is not supported for this call).
    NotFound,
    AccessDenied,
    Throttled,

    /// Network failures, timeouts, and service-side errors.
    Unavailable,
    Other,
}

/// An error returned by a [ServiceQuotasClient]. The remote error code is preserved as-is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new<C: Into<String>, M: Into<String>>(kind: ApiErrorKind, code: C, message: M) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_found<M: Into<String>>(message: M) -> Self {
        Self::new(ApiErrorKind::NotFound, "NoSuchResourceException", message)
    }

    pub fn access_denied<M: Into<String>>(message: M) -> Self {
        Self::new(ApiErrorKind::AccessDenied, "AccessDeniedException", message)
    }

    pub fn throttled<M: Into<String>>(message: M) -> Self {
        Self::new(ApiErrorKind::Throttled, "TooManyRequestsException", message)
    }

    pub fn unavailable<M: Into<String>>(message: M) -> Self {
        Self::new(ApiErrorKind::Unavailable, "ServiceException", message)
    }

    /// Whether the same request might succeed if issued again.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, ApiErrorKind::Throttled | ApiErrorKind::Unavailable)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        if self.message.is_empty() {
            f.write_str(&self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl Error for ApiError {}

/// The quota service API, as consumed by the resolver.
///
/// Implementations own transport, authentication, timeouts, and cancellation. The resolver never issues two calls
/// concurrently for the same lookup.
#[async_trait]
pub trait ServiceQuotasClient: Send + Sync {
    /// Fetch the value applied to a quota in the caller's account.
    async fn get_service_quota(&self, service_code: &str, quota_code: &str) -> Result<QuotaRecord, ApiError>;

    /// Fetch one page of the applied quotas for a service. `next_token` is the continuation token from the previous
    /// page, or `None` for the first page.
    async fn list_service_quotas(&self, service_code: &str, next_token: Option<&str>) -> Result<QuotaPage, ApiError>;

    /// Fetch the AWS default for a quota. The returned record carries `default_value`.
    async fn get_aws_default_service_quota(&self, service_code: &str, quota_code: &str)
    -> Result<QuotaRecord, ApiError>;

    /// Fetch one page of the AWS default quotas for a service.
    async fn list_aws_default_service_quotas(
        &self,
        service_code: &str,
        next_token: Option<&str>,
    ) -> Result<QuotaPage, ApiError>;
}

#[async_trait]
impl<C: ServiceQuotasClient + ?Sized> ServiceQuotasClient for Arc<C> {
    async fn get_service_quota(&self, service_code: &str, quota_code: &str) -> Result<QuotaRecord, ApiError> {
        (**self).get_service_quota(service_code, quota_code).await
    }

    async fn list_service_quotas(&self, service_code: &str, next_token: Option<&str>) -> Result<QuotaPage, ApiError> {
        (**self).list_service_quotas(service_code, next_token).await
    }

    async fn get_aws_default_service_quota(
        &self,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaRecord, ApiError> {
        (**self).get_aws_default_service_quota(service_code, quota_code).await
    }

    async fn list_aws_default_service_quotas(
        &self,
        service_code: &str,
        next_token: Option<&str>,
    ) -> Result<QuotaPage, ApiError> {
        (**self).list_aws_default_service_quotas(service_code, next_token).await
    }
}
