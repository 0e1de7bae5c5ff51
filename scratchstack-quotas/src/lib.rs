//! Service quota lookup.
//!
//! A [Resolver] finds a single quota for a service, by quota code or by exact quota name, through a
//! [ServiceQuotasClient], and reports it as a [ResolvedQuota]: the applied value (falling back to the AWS default when
//! the quota was never applied in the account), the default value, adjustability, scope, and ARN.
#![warn(clippy::all)]

#[cfg(feature = "aws-sdk")]
pub mod aws;
mod client;
pub mod config;
mod error;
mod identifier;
mod normalize;
mod record;
mod resolver;

pub use self::{
    client::{ApiError, ApiErrorKind, ServiceQuotasClient},
    error::QuotaError,
    identifier::{QuotaCode, QuotaIdentifier},
    normalize::{normalize, ArnContext, SERVICEQUOTAS},
    record::{
        QuotaErrorReason, QuotaErrorReasonBuilder, QuotaPage, QuotaRecord, QuotaRecordBuilder, ResolvedQuota,
        ResolvedQuotaBuilder, ServiceDescriptor, DEPENDENCY_ACCESS_DENIED_ERROR,
    },
    resolver::{Resolver, RetryPolicy},
};
