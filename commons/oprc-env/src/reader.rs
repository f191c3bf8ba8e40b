use std::env::VarError;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::duration::parse_duration;
use crate::error::EnvError;
use crate::source::{EnvSource, SystemEnv};

/// Typed accessors over an [`EnvSource`].
///
/// Permissive accessors (`string`, `int`, `duration`, `parse`) never fail:
/// an absent variable and a malformed one both resolve to the default, the
/// latter with a warning. The `try_*` accessors surface malformed values as
/// [`EnvError`] instead.
#[derive(Debug, Default, Clone)]
pub struct EnvReader<S = SystemEnv> {
    source: S,
}

impl EnvReader<SystemEnv> {
    pub fn system() -> Self {
        Self { source: SystemEnv }
    }
}

impl<S: EnvSource> EnvReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Raw value of `name`, or `default` when unset.
    pub fn string(&self, name: &str, default: impl Into<String>) -> String {
        self.or_default(name, self.try_string(name), default.into())
    }

    /// Base-10 integer value of `name`, or `default` when unset or malformed.
    pub fn int(&self, name: &str, default: i64) -> i64 {
        self.or_default(name, self.try_int(name), default)
    }

    /// Duration value of `name` (e.g. `"5m30s"`), or `default` when unset or
    /// malformed.
    pub fn duration(&self, name: &str, default: Duration) -> Duration {
        self.or_default(name, self.try_duration(name), default)
    }

    pub fn parse<T>(&self, name: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Display,
    {
        self.or_default(name, self.try_parse(name), default)
    }

    pub fn try_string(&self, name: &str) -> Result<Option<String>, EnvError> {
        self.try_with(name, |v| Ok::<_, std::convert::Infallible>(v.to_string()))
    }

    pub fn try_int(&self, name: &str) -> Result<Option<i64>, EnvError> {
        self.try_parse::<i64>(name)
    }

    pub fn try_duration(
        &self,
        name: &str,
    ) -> Result<Option<Duration>, EnvError> {
        self.try_with(name, parse_duration)
    }

    pub fn try_parse<T>(&self, name: &str) -> Result<Option<T>, EnvError>
    where
        T: FromStr,
        <T as FromStr>::Err: Display,
    {
        self.try_with(name, |v| v.parse::<T>())
    }

    fn lookup(&self, name: &str) -> Result<Option<String>, EnvError> {
        match self.source.var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
                name: name.to_string(),
            }),
        }
    }

    fn try_with<T, E, F>(
        &self,
        name: &str,
        parse: F,
    ) -> Result<Option<T>, EnvError>
    where
        E: Display,
        F: FnOnce(&str) -> Result<T, E>,
    {
        let Some(value) = self.lookup(name)? else {
            return Ok(None);
        };
        match parse(&value) {
            Ok(parsed) => {
                debug!(name, "resolved from environment");
                Ok(Some(parsed))
            }
            Err(e) => Err(EnvError::Parse {
                name: name.to_string(),
                reason: e.to_string(),
                value,
            }),
        }
    }

    fn or_default<T>(
        &self,
        name: &str,
        resolved: Result<Option<T>, EnvError>,
        default: T,
    ) -> T {
        match resolved {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(name, error = %e, "invalid env var, using default");
                default
            }
        }
    }
}
