#![allow(dead_code)]

use {
    async_trait::async_trait,
    scratchstack_quotas::{
        ApiError, ApiErrorKind, ArnContext, QuotaErrorReason, QuotaPage, QuotaRecord, Resolver, RetryPolicy,
        ServiceQuotasClient, DEPENDENCY_ACCESS_DENIED_ERROR,
    },
    std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
        time::Duration,
    },
};

pub const ACCOUNT_ID: &str = "123456789012";
pub const REGION: &str = "us-east-1";

/// Call counters for each quota service operation.
#[derive(Debug, Default)]
pub struct Calls {
    pub get: AtomicUsize,
    pub list: AtomicUsize,
    pub get_default: AtomicUsize,
    pub list_default: AtomicUsize,
}

impl Calls {
    pub fn get(&self) -> usize {
        self.get.load(Ordering::SeqCst)
    }

    pub fn list(&self) -> usize {
        self.list.load(Ordering::SeqCst)
    }

    pub fn get_default(&self) -> usize {
        self.get_default.load(Ordering::SeqCst)
    }

    pub fn list_default(&self) -> usize {
        self.list_default.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.get() + self.list() + self.get_default() + self.list_default()
    }
}

/// An in-memory quota service.
///
/// Applied and default quotas are served as fixed pages; page `n` is requested with the token `applied-n` (or
/// `default-n`). `get_service_quota` answers from the applied pages unless a scripted failure is queued.
#[derive(Debug, Default)]
pub struct MockQuotaClient {
    applied_pages: Vec<Vec<QuotaRecord>>,
    default_pages: Vec<Vec<QuotaRecord>>,
    direct_failures: Mutex<VecDeque<ApiError>>,
    default_failures: Mutex<VecDeque<ApiError>>,
    list_failure: Option<(usize, ApiError)>,
    empty_final_token: bool,
    repeat_token: bool,
    pub calls: Calls,
    pub list_tokens: Mutex<Vec<Option<String>>>,
}

impl MockQuotaClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_applied_pages(mut self, pages: Vec<Vec<QuotaRecord>>) -> Self {
        self.applied_pages = pages;
        self
    }

    pub fn with_default_pages(mut self, pages: Vec<Vec<QuotaRecord>>) -> Self {
        self.default_pages = pages;
        self
    }

    /// Fail the next `get_service_quota` calls with these errors, in order.
    pub fn with_direct_failures(self, failures: Vec<ApiError>) -> Self {
        self.direct_failures.lock().unwrap().extend(failures);
        self
    }

    /// Fail the next `get_aws_default_service_quota` calls with these errors, in order.
    pub fn with_default_failures(self, failures: Vec<ApiError>) -> Self {
        self.default_failures.lock().unwrap().extend(failures);
        self
    }

    /// Fail the applied listing when page `page` (zero-based) is requested.
    pub fn with_list_failure(mut self, page: usize, error: ApiError) -> Self {
        self.list_failure = Some((page, error));
        self
    }

    /// Return `Some("")` instead of `None` as the last page's token.
    pub fn with_empty_final_token(mut self) -> Self {
        self.empty_final_token = true;
        self
    }

    /// Hand back the same non-empty token from every page.
    pub fn with_repeating_token(mut self) -> Self {
        self.repeat_token = true;
        self
    }

    fn page(&self, pages: &[Vec<QuotaRecord>], prefix: &str, next_token: Option<&str>) -> Result<QuotaPage, ApiError> {
        let index = match next_token {
            None => 0,
            Some(token) => match token.strip_prefix(prefix).and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => n,
                None => return Err(ApiError::new(ApiErrorKind::Other, "InvalidPaginationTokenException", token)),
            },
        };

        let quotas = pages.get(index).cloned().unwrap_or_default();
        let next_token = if self.repeat_token {
            Some(format!("{prefix}0"))
        } else if index + 1 < pages.len() {
            Some(format!("{prefix}{}", index + 1))
        } else if self.empty_final_token {
            Some(String::new())
        } else {
            None
        };

        Ok(QuotaPage::new(quotas, next_token))
    }
}

#[async_trait]
impl ServiceQuotasClient for MockQuotaClient {
    async fn get_service_quota(&self, service_code: &str, quota_code: &str) -> Result<QuotaRecord, ApiError> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.direct_failures.lock().unwrap().pop_front() {
            return Err(e);
        }

        self.applied_pages
            .iter()
            .flatten()
            .find(|q| q.service_code == service_code && q.quota_code == quota_code)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("The specified service quota {quota_code} does not exist")))
    }

    async fn list_service_quotas(&self, _service_code: &str, next_token: Option<&str>) -> Result<QuotaPage, ApiError> {
        let n = self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.list_tokens.lock().unwrap().push(next_token.map(ToString::to_string));
        if let Some((page, e)) = &self.list_failure {
            if *page == n {
                return Err(e.clone());
            }
        }

        self.page(&self.applied_pages, "applied-", next_token)
    }

    async fn get_aws_default_service_quota(
        &self,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaRecord, ApiError> {
        self.calls.get_default.fetch_add(1, Ordering::SeqCst);
        if let Some(e) = self.default_failures.lock().unwrap().pop_front() {
            return Err(e);
        }

        self.default_pages
            .iter()
            .flatten()
            .find(|q| q.service_code == service_code && q.quota_code == quota_code)
            .cloned()
            .ok_or_else(|| ApiError::not_found(format!("No default for {quota_code}")))
    }

    async fn list_aws_default_service_quotas(
        &self,
        _service_code: &str,
        next_token: Option<&str>,
    ) -> Result<QuotaPage, ApiError> {
        self.calls.list_default.fetch_add(1, Ordering::SeqCst);
        self.page(&self.default_pages, "default-", next_token)
    }
}

pub fn resolver<C: ServiceQuotasClient>(client: C) -> Resolver<C> {
    Resolver::new(client, ArnContext::new("aws", REGION, ACCOUNT_ID)).with_retry_policy(RetryPolicy {
        retry_direct_get: true,
        backoff: Duration::ZERO,
    })
}

fn quota(service_code: &str, service_name: &str, quota_code: &str, quota_name: &str) -> QuotaRecord {
    QuotaRecord::builder()
        .service_code(service_code)
        .service_name(service_name)
        .quota_code(quota_code)
        .quota_name(quota_name)
        .adjustable(true)
        .unit("None")
        .build()
        .unwrap()
}

pub const VPC_SERVICE_NAME: &str = "Amazon Virtual Private Cloud (Amazon VPC)";
pub const S3_SERVICE_NAME: &str = "Amazon Simple Storage Service (Amazon S3)";

/// An applied quota with filler name and code.
pub fn filler(service_code: &str, n: usize) -> QuotaRecord {
    let mut q = quota(service_code, "", &format!("L-{n:08X}"), &format!("Filler quota {n}"));
    q.value = Some(n as f64);
    q
}

pub fn vpcs_per_region_applied() -> QuotaRecord {
    let mut q = quota("vpc", VPC_SERVICE_NAME, "L-F678F1CE", "VPCs per Region");
    q.value = Some(10.0);
    q
}

pub fn vpcs_per_region_default() -> QuotaRecord {
    let mut q = quota("vpc", VPC_SERVICE_NAME, "L-F678F1CE", "VPCs per Region");
    q.default_value = Some(5.0);
    q
}

pub fn buckets_default() -> QuotaRecord {
    let mut q = quota("s3", S3_SERVICE_NAME, "L-DC2B2D3D", "Buckets");
    q.default_value = Some(100.0);
    q
}

pub fn albs_denied() -> QuotaRecord {
    let mut q = quota(
        "elasticloadbalancing",
        "Elastic Load Balancing (ELB)",
        "L-53DA6B97",
        "Application Load Balancers per Region",
    );
    q.error_reason = Some(QuotaErrorReason {
        code: DEPENDENCY_ACCESS_DENIED_ERROR.to_string(),
        message: "Access denied while calling elasticloadbalancing".to_string(),
    });
    q
}
