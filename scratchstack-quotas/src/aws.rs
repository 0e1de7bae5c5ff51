//! [ServiceQuotasClient] implementation backed by the AWS SDK for Rust.

use {
    crate::{ApiError, ApiErrorKind, QuotaErrorReason, QuotaPage, QuotaRecord, ServiceQuotasClient},
    async_trait::async_trait,
    aws_sdk_servicequotas::{
        error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
        types::ServiceQuota,
        Client,
    },
    log::debug,
    std::{error::Error, fmt::Debug},
};

#[derive(Clone, Debug)]
pub struct AwsServiceQuotasClient {
    client: Client,
}

impl AwsServiceQuotasClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
        }
    }
}

/// Convert an SDK quota shape. The AWS default APIs report the default in `Value`; it is moved to `default_value`.
fn to_record(quota: &ServiceQuota, is_default: bool) -> QuotaRecord {
    let error_reason = quota.error_reason().map(|reason| QuotaErrorReason {
        code: reason.error_code().map(|code| code.as_str()).unwrap_or("UNKNOWN").to_string(),
        message: reason.error_message().unwrap_or_default().to_string(),
    });

    let (value, default_value) = if is_default {
        (None, quota.value())
    } else {
        (quota.value(), None)
    };

    QuotaRecord {
        service_code: quota.service_code().unwrap_or_default().to_string(),
        service_name: quota.service_name().unwrap_or_default().to_string(),
        quota_code: quota.quota_code().unwrap_or_default().to_string(),
        quota_name: quota.quota_name().unwrap_or_default().to_string(),
        adjustable: quota.adjustable(),
        global_quota: quota.global_quota(),
        unit: quota.unit().unwrap_or_default().to_string(),
        value,
        default_value,
        error_reason,
    }
}

fn kind_for_code(code: &str) -> ApiErrorKind {
    match code {
        "NoSuchResourceException" => ApiErrorKind::NotFound,
        "AccessDeniedException" => ApiErrorKind::AccessDenied,
        "TooManyRequestsException" | "ThrottlingException" => ApiErrorKind::Throttled,
        "ServiceException" => ApiErrorKind::Unavailable,
        _ => ApiErrorKind::Other,
    }
}

fn api_error<E, R>(e: SdkError<E, R>) -> ApiError
where
    E: ProvideErrorMetadata + Error + 'static,
    R: Debug,
{
    let context = DisplayErrorContext(&e).to_string();
    match &e {
        SdkError::TimeoutError(_) => ApiError::new(ApiErrorKind::Unavailable, "TimeoutError", context),
        SdkError::DispatchFailure(_) => ApiError::new(ApiErrorKind::Unavailable, "DispatchFailure", context),
        _ => match e.as_service_error() {
            Some(service_error) => {
                let code = service_error.code().unwrap_or("Unknown");
                let message = service_error.message().map(ToString::to_string).unwrap_or(context);
                ApiError::new(kind_for_code(code), code, message)
            }
            None => ApiError::new(ApiErrorKind::Other, "Unknown", context),
        },
    }
}

#[async_trait]
impl ServiceQuotasClient for AwsServiceQuotasClient {
    async fn get_service_quota(&self, service_code: &str, quota_code: &str) -> Result<QuotaRecord, ApiError> {
        debug!("GetServiceQuota service_code={service_code} quota_code={quota_code}");
        let output = self
            .client
            .get_service_quota()
            .service_code(service_code)
            .quota_code(quota_code)
            .send()
            .await
            .map_err(api_error)?;

        match output.quota() {
            Some(quota) => Ok(to_record(quota, false)),
            None => Err(ApiError::not_found(format!("No quota {quota_code} returned for service {service_code}"))),
        }
    }

    async fn list_service_quotas(&self, service_code: &str, next_token: Option<&str>) -> Result<QuotaPage, ApiError> {
        debug!("ListServiceQuotas service_code={service_code} next_token={next_token:?}");
        let output = self
            .client
            .list_service_quotas()
            .service_code(service_code)
            .set_next_token(next_token.map(ToString::to_string))
            .send()
            .await
            .map_err(api_error)?;

        Ok(QuotaPage::new(
            output.quotas().iter().map(|quota| to_record(quota, false)).collect(),
            output.next_token().map(ToString::to_string),
        ))
    }

    async fn get_aws_default_service_quota(
        &self,
        service_code: &str,
        quota_code: &str,
    ) -> Result<QuotaRecord, ApiError> {
        debug!("GetAWSDefaultServiceQuota service_code={service_code} quota_code={quota_code}");
        let output = self
            .client
            .get_aws_default_service_quota()
            .service_code(service_code)
            .quota_code(quota_code)
            .send()
            .await
            .map_err(api_error)?;

        match output.quota() {
            Some(quota) => Ok(to_record(quota, true)),
            None => Err(ApiError::not_found(format!("No default for quota {quota_code} in service {service_code}"))),
        }
    }

    async fn list_aws_default_service_quotas(
        &self,
        service_code: &str,
        next_token: Option<&str>,
    ) -> Result<QuotaPage, ApiError> {
        debug!("ListAWSDefaultServiceQuotas service_code={service_code} next_token={next_token:?}");
        let output = self
            .client
            .list_aws_default_service_quotas()
            .service_code(service_code)
            .set_next_token(next_token.map(ToString::to_string))
            .send()
            .await
            .map_err(api_error)?;

        Ok(QuotaPage::new(
            output.quotas().iter().map(|quota| to_record(quota, true)).collect(),
            output.next_token().map(ToString::to_string),
        ))
    }
}
