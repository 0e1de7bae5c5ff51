use {
    crate::{QuotaError, QuotaRecord, ResolvedQuota},
    scratchstack_arn::Arn,
};

/// Service name used in quota ARNs.
pub const SERVICEQUOTAS: &str = "servicequotas";

/// Where quota ARNs are rooted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArnContext {
    pub partition: String,
    pub region: String,
    pub account_id: String,
}

impl ArnContext {
    pub fn new<P, R, A>(partition: P, region: R, account_id: A) -> Self
    where
        P: Into<String>,
        R: Into<String>,
        A: Into<String>,
    {
        Self {
            partition: partition.into(),
            region: region.into(),
            account_id: account_id.into(),
        }
    }

    /// The ARN of a quota.
    ///
    /// Account-independent quotas (global quotas, and quotas that only exist in the AWS default catalog) have an empty
    /// account segment: `arn:aws:servicequotas:us-east-1::s3/L-DC2B2D3D`.
    pub fn quota_arn(&self, record: &QuotaRecord) -> Result<Arn, QuotaError> {
        let account_id = if record.global_quota || record.value.is_none() {
            ""
        } else {
            self.account_id.as_str()
        };

        let resource = format!("{}/{}", record.service_code, record.quota_code);
        Ok(Arn::new(&self.partition, SERVICEQUOTAS, &self.region, account_id, &resource)?)
    }
}

/// Produce the externally reported form of a quota record.
///
/// The reported value is the applied value when there is one and the default otherwise. A record with neither is an
/// error rather than a zero.
pub fn normalize(record: QuotaRecord, context: &ArnContext) -> Result<ResolvedQuota, QuotaError> {
    let value = match record.value.or(record.default_value) {
        Some(value) => value,
        None => {
            return Err(QuotaError::MissingValue {
                service_code: record.service_code,
                quota_code: record.quota_code,
            });
        }
    };

    let arn = context.quota_arn(&record)?;

    Ok(ResolvedQuota {
        arn: arn.to_string(),
        adjustable: record.adjustable,
        default_value: record.default_value,
        global_quota: record.global_quota,
        quota_code: record.quota_code,
        quota_name: record.quota_name,
        service_code: record.service_code,
        service_name: record.service_name,
        unit: record.unit,
        value,
    })
}
