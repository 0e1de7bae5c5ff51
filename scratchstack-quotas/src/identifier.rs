use {
    crate::{QuotaError, QuotaRecord},
    lazy_static::lazy_static,
    regex::Regex,
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

lazy_static! {
    static ref QUOTA_CODE: Regex = Regex::new(r"^L-[0-9A-F]{8}$").unwrap();
}

/// A quota code such as `L-F678F1CE`. Codes are stable across regions and partitions, unlike quota names.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QuotaCode(String);

impl QuotaCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for QuotaCode {
    type Err = QuotaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if QUOTA_CODE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(QuotaError::Config(format!("Invalid quota code: {s:?}")))
        }
    }
}

impl Display for QuotaCode {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.write_str(&self.0)
    }
}

/// How the caller identifies a quota within a service.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum QuotaIdentifier {
    Code(QuotaCode),

    /// Exact, case-sensitive quota name, e.g. `VPCs per Region`.
    Name(String),
}

impl QuotaIdentifier {
    pub fn code(code: &str) -> Result<Self, QuotaError> {
        Ok(Self::Code(code.parse()?))
    }

    pub fn name<S: Into<String>>(name: S) -> Result<Self, QuotaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(QuotaError::Config("Quota name cannot be empty".to_string()));
        }

        Ok(Self::Name(name))
    }

    /// Build an identifier from the pair of optional attributes a host configuration supplies. Exactly one of them
    /// must be set.
    pub fn from_parts(quota_code: Option<&str>, quota_name: Option<&str>) -> Result<Self, QuotaError> {
        match (quota_code, quota_name) {
            (Some(code), None) => Self::code(code),
            (None, Some(name)) => Self::name(name),
            (Some(_), Some(_)) => {
                Err(QuotaError::Config("Only one of quota_code or quota_name may be specified".to_string()))
            }
            (None, None) => Err(QuotaError::Config("One of quota_code or quota_name must be specified".to_string())),
        }
    }

    /// Whether a listed quota is the one identified. Names are compared exactly, including case.
    pub fn matches(&self, record: &QuotaRecord) -> bool {
        match self {
            Self::Code(code) => record.quota_code == code.as_str(),
            Self::Name(name) => record.quota_name == *name,
        }
    }
}

impl Display for QuotaIdentifier {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Code(code) => Display::fmt(code, f),
            Self::Name(name) => f.write_str(name),
        }
    }
}
