//! Serialised mutation of process environment variables.
//!
//! Every mutation takes a global re-entrant lock and returns an
//! [`EnvVarGuard`] restoring the prior value when dropped. Guards for one key
//! restore in LIFO order. [`EnvScope`] keeps the lock for its whole lifetime,
//! which tests reading the environment through `figment` need so that no
//! other test mutates it between set-up and extraction.
//!
//! ```
//! use test_helpers::env;
//!
//! let _g = env::set_var("CONSTRUCT_SYNTH_OUTDIR", "build");
//! assert_eq!(std::env::var("CONSTRUCT_SYNTH_OUTDIR").as_deref(), Ok("build"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

/// Prefix of the variables read by the core crate's configuration loader.
pub const CONFIG_PREFIX: &str = "CONSTRUCT_SYNTH_";

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Restores one environment variable when dropped.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: ENV_MUTEX is held.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: ENV_MUTEX is held.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

fn mutate<F>(key: String, mutation: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutation(&key);
    EnvVarGuard { key, original }
}

/// Sets `key` to `value` until the guard is dropped.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds ENV_MUTEX while the closure runs.
    mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
}

/// Removes `key` until the guard is dropped.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds ENV_MUTEX while the closure runs.
    mutate(key.into(), |k| unsafe { env::remove_var(k) })
}

/// Holds the environment lock and a set of guards.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: ReentrantMutexGuard<'static, ()>,
}

impl EnvScope {
    /// Scope retaining `guards`.
    pub fn new(guards: Vec<EnvVarGuard>) -> Self {
        Self {
            _lock: ENV_MUTEX.lock(),
            guards,
        }
    }

    /// Add a guard created while the scope is alive.
    pub fn push(&mut self, guard: EnvVarGuard) {
        self.guards.push(guard);
    }

    /// Set `key` for the rest of the scope.
    pub fn set_var<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        self.push(set_var(key, value));
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        // Restore in reverse creation order while the lock is still held.
        while let Some(guard) = self.guards.pop() {
            drop(guard);
        }
    }
}

impl fmt::Debug for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvScope")
            .field("guards", &self.guards)
            .finish_non_exhaustive()
    }
}

/// Scope with every variable starting with `prefix` removed.
///
/// ```
/// use test_helpers::env;
///
/// let _outer = env::set_var("CONSTRUCT_SYNTH_PRETTY", "false");
/// {
///     let _scope = env::clear_prefixed(env::CONFIG_PREFIX);
///     assert!(std::env::var("CONSTRUCT_SYNTH_PRETTY").is_err());
/// }
/// assert_eq!(std::env::var("CONSTRUCT_SYNTH_PRETTY").as_deref(), Ok("false"));
/// ```
pub fn clear_prefixed(prefix: &str) -> EnvScope {
    let mut scope = EnvScope::new(Vec::new());
    let keys: Vec<String> = env::vars_os()
        .filter_map(|(key, _)| key.into_string().ok())
        .filter(|key| key.starts_with(prefix))
        .collect();
    for key in keys {
        scope.push(remove_var(key));
    }
    scope
}

/// Run `f` while holding the environment lock.
pub fn with_lock<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_MUTEX.lock();
    f()
}
