//! Scoped mutation of the process environment for tests.
//!
//! Every mutation returns a guard that puts the variable back the way it
//! was on drop. Tests that mutate the environment should still run
//! `#[serial]`, since the table is shared by every thread in the process.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Restores (or unsets) a variable's original value when dropped.
#[must_use = "the variable is restored as soon as the guard is dropped"]
pub struct EnvGuard {
    key: String,
    prev: Option<String>,
}

impl EnvGuard {
    fn capture(key: &str) -> Self {
        EnvGuard {
            key: key.to_string(),
            prev: std::env::var(key).ok(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match self.prev.take() {
                Some(v) => std::env::set_var(&self.key, v),
                None => std::env::remove_var(&self.key),
            }
        }
    }
}

/// `<prefix>_<10 random alphanumerics>`, a name no other test will collide with.
pub fn unique_name(prefix: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(10)
        .map(char::from)
        .collect();
    format!("{prefix}_{suffix}")
}

pub fn set_env_guarded(key: &str, val: &str) -> EnvGuard {
    let guard = EnvGuard::capture(key);
    unsafe {
        std::env::set_var(key, val);
    }
    guard
}

pub fn unset_env_guarded(key: &str) -> EnvGuard {
    let guard = EnvGuard::capture(key);
    unsafe {
        std::env::remove_var(key);
    }
    guard
}

/// Builder-style collection of guards. Dropping restores every key in
/// reverse order, so a key touched twice ends up at its first value.
#[derive(Default)]
pub struct Env {
    guards: Vec<EnvGuard>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: &str, val: &str) -> Self {
        self.guards.push(set_env_guarded(key, val));
        self
    }

    pub fn unset(mut self, key: &str) -> Self {
        self.guards.push(unset_env_guarded(key));
        self
    }

    /// Sets `val` under a fresh [`unique_name`] and returns the name.
    pub fn set_unique(&mut self, prefix: &str, val: &str) -> String {
        let key = unique_name(prefix);
        self.guards.push(set_env_guarded(&key, val));
        key
    }
}

impl Drop for Env {
    fn drop(&mut self) {
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}
