use {
    crate::{
        normalize, ApiError, ApiErrorKind, ArnContext, QuotaCode, QuotaError, QuotaIdentifier, QuotaPage, QuotaRecord,
        ResolvedQuota, ServiceQuotasClient,
    },
    log::{debug, warn},
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        time::Duration,
    },
};

const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Retry behavior for the direct get-by-code call. Listing calls are never retried: continuation tokens are opaque
/// and a failed page cannot be resumed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Retry a throttled or failed get-by-code call once before falling back to listing.
    pub retry_direct_get: bool,

    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_direct_get: true,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Catalog {
    /// Values applied in the caller's account.
    Applied,

    /// AWS default values.
    Default,
}

impl Display for Catalog {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Default => f.write_str("default"),
        }
    }
}

/// Looks up a single quota and reports it in normalized form.
///
/// A resolver holds no per-lookup state; one instance may serve any number of concurrent lookups.
#[derive(Debug)]
pub struct Resolver<C> {
    client: C,
    context: ArnContext,
    retry: RetryPolicy,
}

impl<C> Resolver<C>
where
    C: ServiceQuotasClient,
{
    pub fn new(client: C, context: ArnContext) -> Self {
        Self {
            client,
            context,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn arn_context(&self) -> &ArnContext {
        &self.context
    }

    /// Resolve a quota from the attributes a host supplies: a service code plus exactly one of a quota code or a
    /// quota name. Invalid combinations fail before the quota service is called.
    pub async fn get_resolved_quota(
        &self,
        service_code: &str,
        quota_code: Option<&str>,
        quota_name: Option<&str>,
    ) -> Result<ResolvedQuota, QuotaError> {
        let identifier = QuotaIdentifier::from_parts(quota_code, quota_name)?;
        self.resolve_quota(service_code, &identifier).await
    }

    pub async fn resolve_quota(
        &self,
        service_code: &str,
        identifier: &QuotaIdentifier,
    ) -> Result<ResolvedQuota, QuotaError> {
        let record = self.resolve(service_code, identifier).await?;
        normalize(record, &self.context)
    }

    /// Find the quota record for `identifier`, with its default value filled in where the quota service has one.
    pub async fn resolve(&self, service_code: &str, identifier: &QuotaIdentifier) -> Result<QuotaRecord, QuotaError> {
        if service_code.is_empty() {
            return Err(QuotaError::Config("service_code cannot be empty".to_string()));
        }

        let mut record = match identifier {
            QuotaIdentifier::Code(code) => self.find_by_code(service_code, code).await?,
            QuotaIdentifier::Name(_) => self.find_by_name(service_code, identifier).await?,
        };

        if let Some(reason) = record.error_reason.take() {
            return Err(QuotaError::Dependency {
                service_code: service_code.to_string(),
                identifier: identifier.to_string(),
                code: reason.code,
                message: reason.message,
            });
        }

        if record.default_value.is_none() {
            self.fill_default(service_code, &mut record).await?;
        }

        Ok(record)
    }

    async fn find_by_code(&self, service_code: &str, code: &QuotaCode) -> Result<QuotaRecord, QuotaError> {
        match self.get_direct(service_code, code).await {
            Ok(record) => return Ok(record),
            Err(e) if e.is_not_found() => {
                debug!("Quota {code} not returned directly for service {service_code}; scanning applied quotas")
            }
            Err(e) if e.is_transient() => {
                warn!("Unable to get quota {code} for service {service_code} directly ({e}); scanning applied quotas")
            }
            Err(e) => return Err(QuotaError::from_api(e, service_code, code)),
        }

        let identifier = QuotaIdentifier::Code(code.clone());
        if let Some(record) = self.scan(service_code, Catalog::Applied, &identifier).await? {
            return Ok(record);
        }

        debug!("Quota {code} has no applied value for service {service_code}; checking AWS defaults");
        self.client
            .get_aws_default_service_quota(service_code, code.as_str())
            .await
            .map_err(|e| QuotaError::from_api(e, service_code, code))
    }

    async fn find_by_name(&self, service_code: &str, identifier: &QuotaIdentifier) -> Result<QuotaRecord, QuotaError> {
        if let Some(record) = self.scan(service_code, Catalog::Applied, identifier).await? {
            return Ok(record);
        }

        debug!("Quota {identifier:?} has no applied value for service {service_code}; scanning AWS defaults");
        match self.scan(service_code, Catalog::Default, identifier).await? {
            Some(record) => Ok(record),
            None => Err(QuotaError::NotFound {
                service_code: service_code.to_string(),
                identifier: identifier.to_string(),
                source: None,
            }),
        }
    }

    /// Get a quota by code, retrying a transient failure at most once.
    async fn get_direct(&self, service_code: &str, code: &QuotaCode) -> Result<QuotaRecord, ApiError> {
        match self.client.get_service_quota(service_code, code.as_str()).await {
            Err(e) if e.is_transient() && self.retry.retry_direct_get => {
                warn!("Transient error getting quota {code} for service {service_code}: {e}; retrying");
                tokio::time::sleep(self.retry.backoff).await;
                self.client.get_service_quota(service_code, code.as_str()).await
            }
            result => result,
        }
    }

    async fn list_page(
        &self,
        service_code: &str,
        catalog: Catalog,
        next_token: Option<&str>,
    ) -> Result<QuotaPage, ApiError> {
        match catalog {
            Catalog::Applied => self.client.list_service_quotas(service_code, next_token).await,
            Catalog::Default => self.client.list_aws_default_service_quotas(service_code, next_token).await,
        }
    }

    /// Walk every page of a listing looking for `identifier`.
    ///
    /// Codes are unique, so a code scan stops at the first match. A name scan always visits every page; if more than
    /// one quota carries the name, the first in page order wins. A page that hands back the token it was requested
    /// with ends the scan with a transport error.
    async fn scan(
        &self,
        service_code: &str,
        catalog: Catalog,
        identifier: &QuotaIdentifier,
    ) -> Result<Option<QuotaRecord>, QuotaError> {
        let stop_at_first = matches!(identifier, QuotaIdentifier::Code(_));
        let mut next_token: Option<String> = None;
        let mut found: Option<QuotaRecord> = None;
        let mut n_matches = 0usize;
        let mut n_pages = 0usize;

        loop {
            let page = self
                .list_page(service_code, catalog, next_token.as_deref())
                .await
                .map_err(|e| QuotaError::from_api(e, service_code, identifier))?;
            n_pages += 1;
            debug!("Listed {} {catalog} quotas for service {service_code} (page {n_pages})", page.quotas.len());

            let continuation = page.continuation().map(ToString::to_string);
            if continuation.is_some() && continuation == next_token {
                return Err(QuotaError::Transport(ApiError::new(
                    ApiErrorKind::Other,
                    "RepeatedNextToken",
                    format!("Listing {catalog} quotas for service {service_code} returned the same next token twice"),
                )));
            }

            next_token = continuation;
            for quota in page.quotas {
                if identifier.matches(&quota) {
                    n_matches += 1;
                    if found.is_none() {
                        found = Some(quota);
                    }
                }
            }

            if (stop_at_first && found.is_some()) || next_token.is_none() {
                break;
            }
        }

        if n_matches > 1 {
            warn!("{n_matches} {catalog} quotas in service {service_code} match {identifier:?}; using the first");
        }

        Ok(found)
    }

    async fn fill_default(&self, service_code: &str, record: &mut QuotaRecord) -> Result<(), QuotaError> {
        match self.client.get_aws_default_service_quota(service_code, &record.quota_code).await {
            Ok(default) => {
                record.default_value = default.default_value;
                if record.service_name.is_empty() {
                    record.service_name = default.service_name;
                }
                Ok(())
            }
            Err(e) if e.is_not_found() => {
                debug!("No AWS default for quota {} in service {service_code}", record.quota_code);
                Ok(())
            }
            Err(e) => Err(QuotaError::from_api(e, service_code, &record.quota_code)),
        }
    }
}
