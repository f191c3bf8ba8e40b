use std::collections::BTreeMap;
use std::env::VarError;
use std::sync::Arc;

/// Read-only lookup of environment variables by exact name.
pub trait EnvSource {
    fn var(&self, name: &str) -> Result<String, VarError>;
}

/// Reads from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemEnv;

impl EnvSource for SystemEnv {
    #[inline]
    fn var(&self, name: &str) -> Result<String, VarError> {
        std::env::var(name)
    }
}

/// In-memory variable table, used in place of the process environment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: &str) -> Option<String> {
        self.vars.insert(name.to_string(), value.to_string())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.vars.remove(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Result<String, VarError> {
        self.vars.get(name).cloned().ok_or(VarError::NotPresent)
    }
}

impl<F> EnvSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Result<String, VarError> {
        self(name).ok_or(VarError::NotPresent)
    }
}

impl<S: EnvSource + ?Sized> EnvSource for Arc<S> {
    fn var(&self, name: &str) -> Result<String, VarError> {
        (**self).var(name)
    }
}
