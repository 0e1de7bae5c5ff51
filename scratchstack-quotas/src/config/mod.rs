mod error;
mod file;
mod quotas;
mod resolved;

pub use self::{error::ConfigError, file::Config, quotas::QuotasConfig, resolved::ResolvedQuotasConfig};
