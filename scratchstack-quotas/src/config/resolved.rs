use crate::{ArnContext, RetryPolicy};

/// The resolved configuration: defaults have been applied and values validated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedQuotasConfig {
    pub arn_context: ArnContext,
    pub retry: RetryPolicy,
}
