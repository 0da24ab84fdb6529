use core::{
    error::Error,
    fmt,
    fmt::{Display, Formatter},
};
use std::{io, path::PathBuf};
use url::ParseError;

/// A configuration error.
#[derive(Debug)]
pub enum ConfigError {
    /// A CA bundle combined with disabled certificate verification.
    ConflictingTrust(PathBuf),
    /// An invalid duration.
    InvalidDuration(String),
    /// An I/O error while reading configuration.
    Io(io::Error),
    /// A TOML deserialization error.
    TomlDeserialize(::toml::de::Error),
    /// A URL parse error.
    UrlParse(ParseError),
}

impl Display for ConfigError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConflictingTrust(path) => {
                write!(
                    formatter,
                    "CA bundle {} cannot be used with certificate verification disabled",
                    path.display()
                )
            }
            Self::InvalidDuration(error) => {
                write!(formatter, "invalid duration: {error}")
            }
            Self::Io(error) => {
                write!(formatter, "{error}")
            }
            Self::TomlDeserialize(error) => {
                write!(formatter, "{error}")
            }
            Self::UrlParse(error) => {
                write!(formatter, "{error}")
            }
        }
    }
}

impl Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<::toml::de::Error> for ConfigError {
    fn from(error: ::toml::de::Error) -> Self {
        Self::TomlDeserialize(error)
    }
}

impl From<ParseError> for ConfigError {
    fn from(error: ParseError) -> Self {
        Self::UrlParse(error)
    }
}
