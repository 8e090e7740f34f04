//! Type-keyed instance registry.
//!
//! A [`Registry`] maps a type (its [`TypeId`]) to the single live instance
//! of that type, constructing the instance on first request and handing out
//! shared [`Arc`] handles thereafter.  The registry owns each instance; no
//! instance is ever replaced or dropped while the registry lives.
//!
//! Registries are plain values: create a fresh one per test to keep call
//! sites isolated, or use [`Registry::global`] (or the [`instance`] /
//! [`try_instance`] shorthands) for the process-wide registry.
//!
//! The map lock is held only while looking up or inserting a slot, never
//! across a factory invocation, so constructing one type never blocks
//! requests for a different type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, RwLock, RwLockReadGuard};

use crate::cell::SingletonCell;
use crate::errors::{Error, Result};

/// The type-erased payload stored in each slot.
type Instance = Arc<dyn Any + Send + Sync>;

/// A registry of singleton instances keyed by type.
///
/// For any type `T`, at most one instance is ever constructed per registry,
/// no matter how many threads race to request it first.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use singlet_core::registry::Registry;
///
/// struct Config { retries: u32 }
///
/// let registry = Registry::new();
/// let first = registry.get_or_init(|| Config { retries: 3 });
/// let second = registry.get_or_init(|| Config { retries: 99 });
///
/// // The second factory never ran.
/// assert_eq!(second.retries, 3);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct Registry {
    slots: RwLock<HashMap<TypeId, Arc<SingletonCell<Instance>>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Return the process-wide registry.
    ///
    /// Created lazily on first access and never torn down; instances it owns
    /// live until process exit.
    pub fn global() -> &'static Registry {
        static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::new);
        &GLOBAL
    }

    /// Return the instance of `T`, running `factory` to construct it if no
    /// instance exists yet.
    ///
    /// Exactly one of any number of concurrent calls for the same type runs
    /// the factory; every call receives a handle to the same instance.  On
    /// factory error the slot stays empty: the error is reported to the
    /// calling thread as [`Error::Construction`] and a later call retries.
    ///
    /// # Example
    /// ```
    /// use singlet_core::registry::Registry;
    ///
    /// struct Pool { size: usize }
    ///
    /// fn open_pool() -> Result<Pool, String> {
    ///     Ok(Pool { size: 4 })
    /// }
    ///
    /// let registry = Registry::new();
    /// let pool = registry.get_or_create(open_pool)?;
    /// assert_eq!(pool.size, 4);
    /// # Ok::<(), singlet_core::Error>(())
    /// ```
    pub fn get_or_create<T, E>(&self, factory: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        E: fmt::Display,
    {
        let slot = self.slot_for(TypeId::of::<T>());
        let instance = slot.get_or_try_init(|| {
            log::debug!("constructing singleton `{}`", std::any::type_name::<T>());
            match factory() {
                Ok(value) => Ok(Arc::new(value) as Instance),
                Err(err) => {
                    log::warn!(
                        "construction of `{}` failed: {err}",
                        std::any::type_name::<T>()
                    );
                    Err(Error::construction::<T>(err))
                }
            }
        })?;
        Ok(Self::downcast::<T>(instance))
    }

    /// Infallible variant of [`get_or_create`][Self::get_or_create].
    pub fn get_or_init<T>(&self, factory: impl FnOnce() -> T) -> Arc<T>
    where
        T: Send + Sync + 'static,
    {
        let slot = self.slot_for(TypeId::of::<T>());
        let instance = slot.get_or_init(|| {
            log::debug!("constructing singleton `{}`", std::any::type_name::<T>());
            Arc::new(factory()) as Instance
        });
        Self::downcast::<T>(instance)
    }

    /// Return the instance of `T` if one has been constructed.
    ///
    /// Never invokes a factory.
    pub fn get<T>(&self) -> Option<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let slots = self.read_slots();
        let slot = slots.get(&TypeId::of::<T>())?;
        let instance = slot.get()?;
        Some(Self::downcast::<T>(instance))
    }

    /// Return `true` if an instance of `T` has been constructed.
    pub fn contains<T: 'static>(&self) -> bool {
        self.read_slots()
            .get(&TypeId::of::<T>())
            .is_some_and(|slot| slot.is_constructed())
    }

    /// Number of constructed instances.
    pub fn len(&self) -> usize {
        self.read_slots()
            .values()
            .filter(|slot| slot.is_constructed())
            .count()
    }

    /// Return `true` if no instance has been constructed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch the slot for `key`, inserting an empty one if needed.
    ///
    /// The returned `Arc` keeps the slot alive after the map lock is
    /// released; construction happens on the slot's own gate.
    fn slot_for(&self, key: TypeId) -> Arc<SingletonCell<Instance>> {
        if let Some(slot) = self.read_slots().get(&key) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write().expect("slot map lock poisoned");
        Arc::clone(slots.entry(key).or_insert_with(|| Arc::new(SingletonCell::new())))
    }

    fn read_slots(&self) -> RwLockReadGuard<'_, HashMap<TypeId, Arc<SingletonCell<Instance>>>> {
        self.slots.read().expect("slot map lock poisoned")
    }

    /// Recover the concrete type from a slot payload.
    fn downcast<T: Send + Sync + 'static>(instance: &Instance) -> Arc<T> {
        Arc::clone(instance)
            .downcast::<T>()
            .ok()
            .expect("slot keyed by TypeId holds a value of that type")
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Registry({} constructed)", self.len())
    }
}

/// Return the shared instance of `T` from the process-wide registry,
/// constructing it with `factory` if needed.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use singlet_core::instance;
///
/// struct Clock { ticks: u64 }
///
/// let a = instance(|| Clock { ticks: 0 });
/// let b = instance(|| Clock { ticks: 0 });
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub fn instance<T>(factory: impl FnOnce() -> T) -> Arc<T>
where
    T: Send + Sync + 'static,
{
    Registry::global().get_or_init(factory)
}

/// Fallible variant of [`instance`], delegating to the process-wide registry.
pub fn try_instance<T, E>(factory: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>>
where
    T: Send + Sync + 'static,
    E: fmt::Display,
{
    Registry::global().get_or_create(factory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_construct() {
        struct Widget;

        let registry = Registry::new();
        assert!(registry.get::<Widget>().is_none());
        assert!(!registry.contains::<Widget>());
        assert!(registry.is_empty());
    }

    #[test]
    fn constructed_instance_is_reused() {
        struct Widget {
            id: u32,
        }

        let registry = Registry::new();
        let first = registry.get_or_init(|| Widget { id: 1 });
        let again = registry.get_or_init(|| Widget { id: 2 });
        assert_eq!(again.id, 1);
        assert!(Arc::ptr_eq(&first, &again));
        assert!(registry.contains::<Widget>());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_types_get_distinct_instances() {
        struct Left(u8);
        struct Right(u8);

        let registry = Registry::new();
        let left = registry.get_or_init(|| Left(1));
        let right = registry.get_or_init(|| Right(2));
        assert_eq!(left.0, 1);
        assert_eq!(right.0, 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn factory_error_is_wrapped_and_slot_stays_empty() {
        #[derive(Debug)]
        struct Db;

        let registry = Registry::new();
        let err = registry
            .get_or_create(|| -> Result<Db, &str> { Err("no backend") })
            .unwrap_err();
        assert_eq!(
            err,
            Error::Construction {
                type_name: std::any::type_name::<Db>(),
                message: "no backend".to_owned(),
            }
        );
        assert!(!registry.contains::<Db>());

        let db = registry.get_or_create(|| -> Result<Db, &str> { Ok(Db) });
        assert!(db.is_ok());
        assert!(registry.contains::<Db>());
    }

    #[test]
    fn global_registry_is_shared() {
        struct ProcessWide;

        let a = instance(|| ProcessWide);
        let b = instance(|| ProcessWide);
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Registry::global().contains::<ProcessWide>());
    }

    #[test]
    fn debug_reports_constructed_count() {
        struct Widget;

        let registry = Registry::new();
        assert_eq!(format!("{registry:?}"), "Registry(0 constructed)");
        registry.get_or_init(|| Widget);
        assert_eq!(format!("{registry:?}"), "Registry(1 constructed)");
    }
}
