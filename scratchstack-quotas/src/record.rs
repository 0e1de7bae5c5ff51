use {
    derive_builder::Builder,
    serde::Serialize,
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// The error code the quota service attaches to a quota whose value depends on a service the caller cannot access.
pub const DEPENDENCY_ACCESS_DENIED_ERROR: &str = "DEPENDENCY_ACCESS_DENIED_ERROR";

/// Why the quota service could not evaluate a quota.
#[derive(Builder, Clone, Debug, Eq, PartialEq)]
pub struct QuotaErrorReason {
    #[builder(setter(into))]
    pub code: String,

    #[builder(setter(into), default)]
    pub message: String,
}

impl QuotaErrorReason {
    pub fn builder() -> QuotaErrorReasonBuilder {
        QuotaErrorReasonBuilder::default()
    }
}

impl Display for QuotaErrorReason {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        if self.message.is_empty() {
            f.write_str(&self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// The service a quota belongs to. The name is learned from the quota service during lookup.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceDescriptor {
    pub service_code: String,
    pub service_name: String,
}

/// A quota as reported by the quota service.
///
/// Records from the applied-quota APIs carry `value`; records from the AWS default catalog carry `default_value`.
/// The resolver may merge both into a single record.
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct QuotaRecord {
    #[builder(setter(into))]
    pub service_code: String,

    #[builder(setter(into), default)]
    pub service_name: String,

    #[builder(setter(into))]
    pub quota_code: String,

    #[builder(setter(into))]
    pub quota_name: String,

    #[builder(default)]
    pub adjustable: bool,

    #[builder(default)]
    pub global_quota: bool,

    #[builder(setter(into), default)]
    pub unit: String,

    #[builder(setter(strip_option), default)]
    pub value: Option<f64>,

    #[builder(setter(strip_option), default)]
    pub default_value: Option<f64>,

    #[builder(setter(strip_option), default)]
    pub error_reason: Option<QuotaErrorReason>,
}

impl QuotaRecord {
    pub fn builder() -> QuotaRecordBuilder {
        QuotaRecordBuilder::default()
    }
}

/// One page of a quota listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuotaPage {
    pub quotas: Vec<QuotaRecord>,

    /// Opaque continuation token. `None` (or an empty string) marks the last page.
    pub next_token: Option<String>,
}

impl QuotaPage {
    pub fn new(quotas: Vec<QuotaRecord>, next_token: Option<String>) -> Self {
        Self {
            quotas,
            next_token,
        }
    }

    /// The token to request the following page with, if there is one.
    pub fn continuation(&self) -> Option<&str> {
        self.next_token.as_deref().filter(|token| !token.is_empty())
    }
}

/// The externally reported form of a quota.
#[derive(Builder, Clone, Debug, PartialEq, Serialize)]
pub struct ResolvedQuota {
    #[builder(setter(into))]
    pub arn: String,

    pub adjustable: bool,

    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,

    pub global_quota: bool,

    #[builder(setter(into))]
    pub quota_code: String,

    #[builder(setter(into))]
    pub quota_name: String,

    #[builder(setter(into))]
    pub service_code: String,

    #[builder(setter(into), default)]
    pub service_name: String,

    #[builder(setter(into), default)]
    pub unit: String,

    pub value: f64,
}

impl ResolvedQuota {
    pub fn builder() -> ResolvedQuotaBuilder {
        ResolvedQuotaBuilder::default()
    }

    pub fn service(&self) -> ServiceDescriptor {
        ServiceDescriptor {
            service_code: self.service_code.clone(),
            service_name: self.service_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            QuotaErrorReason, QuotaPage, QuotaRecord, ResolvedQuota, ServiceDescriptor, DEPENDENCY_ACCESS_DENIED_ERROR,
        },
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_continuation() {
        assert_eq!(QuotaPage::new(vec![], None).continuation(), None);
        assert_eq!(QuotaPage::new(vec![], Some(String::new())).continuation(), None);
        assert_eq!(QuotaPage::new(vec![], Some("abc".to_string())).continuation(), Some("abc"));
    }

    #[test_log::test]
    fn test_record_builder_defaults() {
        let record = QuotaRecord::builder()
            .service_code("vpc")
            .quota_code("L-F678F1CE")
            .quota_name("VPCs per Region")
            .build()
            .unwrap();
        assert_eq!(record.service_name, "");
        assert!(!record.adjustable);
        assert!(!record.global_quota);
        assert_eq!(record.value, None);
        assert_eq!(record.default_value, None);
        assert_eq!(record.error_reason, None);

        assert!(QuotaRecord::builder().service_code("vpc").build().is_err());
    }

    #[test_log::test]
    fn test_error_reason_display() {
        let reason = QuotaErrorReason::builder()
            .code(DEPENDENCY_ACCESS_DENIED_ERROR)
            .message("Access denied to elasticloadbalancing")
            .build()
            .unwrap();
        assert_eq!(reason.to_string(), "DEPENDENCY_ACCESS_DENIED_ERROR: Access denied to elasticloadbalancing");

        let reason = QuotaErrorReason::builder().code("DEPENDENCY_THROTTLING_ERROR").build().unwrap();
        assert_eq!(reason.to_string(), "DEPENDENCY_THROTTLING_ERROR");
    }

    #[test_log::test]
    fn test_resolved_quota_json() {
        let quota = ResolvedQuota::builder()
            .arn("arn:aws:servicequotas:us-east-1::s3/L-DC2B2D3D")
            .adjustable(true)
            .global_quota(false)
            .quota_code("L-DC2B2D3D")
            .quota_name("Buckets")
            .service_code("s3")
            .service_name("Amazon Simple Storage Service (Amazon S3)")
            .value(100.0)
            .build()
            .unwrap();

        let json = serde_json::to_value(&quota).unwrap();
        assert_eq!(json["arn"], "arn:aws:servicequotas:us-east-1::s3/L-DC2B2D3D");
        assert_eq!(json["value"], 100.0);
        assert!(json.get("default_value").is_none());

        assert_eq!(
            quota.service(),
            ServiceDescriptor {
                service_code: "s3".to_string(),
                service_name: "Amazon Simple Storage Service (Amazon S3)".to_string(),
            }
        );
    }
}
