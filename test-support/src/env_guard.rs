//! Scoped environment overrides for configuration tests.
//!
//! `EnvGuard` applies a batch of variable changes and restores every
//! variable to its previous state on drop, in reverse order. Tests using it
//! must run under `#[serial]` because the process environment is shared.

use std::ffi::{OsStr, OsString};

#[derive(Debug, Default)]
pub struct EnvGuard {
    saved: Vec<(OsString, Option<OsString>)>,
}

impl EnvGuard {
    /// Start an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value` until the guard is dropped.
    #[must_use]
    pub fn set(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref();
        self.save(key);
        // SAFETY: callers hold the serial test lock; no other thread reads
        // the environment concurrently.
        unsafe { std::env::set_var(key, value) };
        self
    }

    /// Unset `key` until the guard is dropped.
    #[must_use]
    pub fn unset(mut self, key: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref();
        self.save(key);
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(key) };
        self
    }

    fn save(&mut self, key: &OsStr) {
        self.saved.push((key.to_os_string(), std::env::var_os(key)));
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, original) in self.saved.drain(..).rev() {
            // SAFETY: see `EnvGuard::set`.
            match original {
                Some(v) => unsafe { std::env::set_var(&key, v) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}
