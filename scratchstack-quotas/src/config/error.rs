use {
    std::{
        error::Error,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        io::Error as IOError,
    },
    toml::de::Error as TomlDeError,
};

#[derive(Debug)]
pub enum ConfigError {
    DeserError(TomlDeError),
    IO(IOError),
    InvalidAccountId(String),
    InvalidPartition,
    InvalidRegion,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match &self {
            Self::DeserError(e) => write!(f, "Deserialization error: {}", e),
            Self::IO(e) => write!(f, "I/O error: {}", e),
            Self::InvalidAccountId(account_id) => write!(f, "Invalid account id: {:?}", account_id),
            Self::InvalidPartition => write!(f, "Invalid partition"),
            Self::InvalidRegion => write!(f, "Invalid region"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IO(e) => Some(e),
            Self::DeserError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> Self {
        ConfigError::IO(e)
    }
}

impl From<TomlDeError> for ConfigError {
    fn from(e: TomlDeError) -> Self {
        ConfigError::DeserError(e)
    }
}
