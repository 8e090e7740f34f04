//! Global settings store.
//!
//! [`Settings`] holds string-keyed configuration values shared across a
//! process: any component may set a value and every other component observes
//! it.  The process-wide instance is owned by the global registry; create
//! independent stores with [`Settings::new`] to keep tests isolated.
//!
//! Thread safety: the map is stored behind an `RwLock`, so values can be
//! read and written from any thread.  Tests that change process-wide
//! settings should use keys of their own (or a dedicated store).

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use singlet_core::instance;

/// A thread-safe, string-keyed settings store.
///
/// # Example
/// ```
/// use singlet_settings::Settings;
///
/// struct Application {
///     name: &'static str,
/// }
///
/// impl Application {
///     fn configure(&self, key: &str, value: &str) {
///         Settings::instance().set(key, value);
///     }
///
///     fn theme(&self) -> Option<String> {
///         Settings::instance().get("theme")
///     }
/// }
///
/// // Both applications share the same store.
/// let app1 = Application { name: "app1" };
/// let app2 = Application { name: "app2" };
/// app1.configure("theme", "dark");
/// assert_eq!(app2.theme().as_deref(), Some("dark"));
/// # let _ = (app1.name, app2.name);
/// ```
pub struct Settings {
    values: RwLock<HashMap<String, String>>,
}

impl Settings {
    /// Create an empty, independent store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Return the process-wide settings store, creating it on first access.
    ///
    /// Constructed through the global registry, so every caller in the
    /// process shares one store.
    pub fn instance() -> Arc<Settings> {
        instance(Settings::new)
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.write().insert(key.into(), value.into());
    }

    /// Return the value for `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    /// Remove `key`, returning the value it held.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.write().remove(key)
    }

    /// Return `true` if `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Return `true` if the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Ordered copy of the current contents, for display or diffing.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.read()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.values.read().expect("settings lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.values.write().expect("settings lock poisoned")
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.snapshot()).finish()
    }
}
