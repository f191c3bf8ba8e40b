//! Typed configuration values read from environment variables.
//!
//! Every accessor takes a variable name and a default. The default is
//! returned when the variable is unset, and also when it is set but cannot
//! be parsed for the requested type (a warning is logged in that case).
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let port = oprc_env::parse::<u16>("HTTP_PORT", 8080);
//! let retries = oprc_env::int("RETRY_ATTEMPTS", 3);
//! let timeout = oprc_env::duration("REQUEST_TIMEOUT", Duration::from_secs(30));
//! ```
//!
//! Use [`EnvReader`] with a [`MapEnv`] or a closure to resolve values from
//! something other than the process environment.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub mod duration;
pub mod error;
pub mod reader;
pub mod source;

pub use error::{EnvError, ParseDurationError};
pub use reader::EnvReader;
pub use source::{EnvSource, MapEnv, SystemEnv};

/// Value of `name` in the process environment, or `default` when unset.
pub fn string(name: &str, default: impl Into<String>) -> String {
    EnvReader::system().string(name, default)
}

/// Integer value of `name` in the process environment, or `default` when
/// unset or malformed.
pub fn int(name: &str, default: i64) -> i64 {
    EnvReader::system().int(name, default)
}

/// Duration value of `name` in the process environment, or `default` when
/// unset or malformed.
pub fn duration(name: &str, default: Duration) -> Duration {
    EnvReader::system().duration(name, default)
}

pub fn parse<T>(name: &str, default: T) -> T
where
    T: FromStr,
    <T as FromStr>::Err: Display,
{
    EnvReader::system().parse(name, default)
}
