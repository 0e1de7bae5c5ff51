use {
    super::{ConfigError, QuotasConfig},
    serde::Deserialize,
    std::{fmt::Debug, fs::File, io::Read, path::Path, str::FromStr},
};

/// The configuration file, as written by the user.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub quotas: QuotasConfig,
}

impl Config {
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match File::open(path) {
            Err(e) => Err(ConfigError::IO(e)),
            Ok(mut file) => {
                let mut raw = String::new();
                file.read_to_string(&mut raw)?;
                raw.parse()
            }
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(Into::into)
    }
}
