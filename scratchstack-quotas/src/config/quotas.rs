use {
    super::{ConfigError, ResolvedQuotasConfig},
    crate::{ArnContext, RetryPolicy},
    lazy_static::lazy_static,
    regex::Regex,
    serde::Deserialize,
    std::{fmt::Debug, time::Duration},
};

lazy_static! {
    static ref ACCOUNT_ID: Regex = Regex::new(r"^[0-9]{12}$").unwrap();
}

fn get_default_partition() -> String {
    "aws".into()
}

#[inline]
const fn get_default_retry_direct_get() -> bool {
    true
}

#[inline]
const fn get_default_retry_backoff() -> Duration {
    Duration::from_millis(250)
}

/// Settings for quota lookups, as specified by the user.
#[derive(Debug, Deserialize)]
pub struct QuotasConfig {
    #[serde(default = "get_default_partition")]
    pub partition: String,

    pub region: String,

    /// The account quota ARNs are issued under.
    pub account_id: String,

    #[serde(default = "get_default_retry_direct_get")]
    pub retry_direct_get: bool,

    #[serde(with = "humantime_serde", default = "get_default_retry_backoff")]
    pub retry_backoff: Duration,
}

impl QuotasConfig {
    pub fn resolve(&self) -> Result<ResolvedQuotasConfig, ConfigError> {
        if self.partition.is_empty() {
            return Err(ConfigError::InvalidPartition);
        }

        if self.region.is_empty() {
            return Err(ConfigError::InvalidRegion);
        }

        if !ACCOUNT_ID.is_match(&self.account_id) {
            return Err(ConfigError::InvalidAccountId(self.account_id.clone()));
        }

        Ok(ResolvedQuotasConfig {
            arn_context: ArnContext::new(&self.partition, &self.region, &self.account_id),
            retry: RetryPolicy {
                retry_direct_get: self.retry_direct_get,
                backoff: self.retry_backoff,
            },
        })
    }
}
