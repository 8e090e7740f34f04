//! Static singleton declarations.
//!
//! [`Singleton`] binds a factory to a [`SingletonCell`] so a singleton can be
//! declared as a `static` item and dereferenced like the value itself, with
//! no per-type wiring beyond the declaration.  [`define_singleton!`] is the
//! declaration shorthand.

use std::fmt;
use std::ops::Deref;

use crate::cell::SingletonCell;

/// A `static`-friendly singleton: a factory plus the cell it fills.
///
/// The wrapped value is constructed on first access via the double-checked
/// construction protocol and shared by every caller thereafter.
///
/// # Example
/// ```
/// use singlet_core::singleton::Singleton;
///
/// static LIMITS: Singleton<Vec<u32>> = Singleton::new(|| vec![16, 64, 256]);
///
/// assert_eq!(LIMITS.len(), 3);
/// assert_eq!(LIMITS.get()[0], 16);
/// ```
pub struct Singleton<T> {
    cell: SingletonCell<T>,
    init: fn() -> T,
}

impl<T> Singleton<T> {
    /// Create an unconstructed singleton with the given factory.
    pub const fn new(init: fn() -> T) -> Self {
        Self {
            cell: SingletonCell::new(),
            init,
        }
    }

    /// Return the instance, constructing it on first call.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| {
            log::debug!("constructing singleton `{}`", std::any::type_name::<T>());
            (self.init)()
        })
    }

    /// Return `true` once the instance has been constructed.
    pub fn is_constructed(&self) -> bool {
        self.cell.is_constructed()
    }
}

impl<T> Deref for Singleton<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: fmt::Debug> fmt::Debug for Singleton<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell.get() {
            Some(value) => write!(f, "Singleton({value:?})"),
            None => write!(f, "Singleton(<unconstructed>)"),
        }
    }
}

/// Define a static singleton of type `$ty`.
///
/// The instance is constructed on first access and shared process-wide.
///
/// # Example
/// ```
/// use singlet_core::define_singleton;
///
/// struct Palette { colors: Vec<&'static str> }
/// define_singleton!(PALETTE, Palette, Palette { colors: vec!["red", "teal"] });
///
/// assert_eq!(PALETTE.colors.len(), 2);
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($name:ident, $ty:ty, $init:expr) => {
        /// Lazily-constructed global singleton.
        pub static $name: $crate::singleton::Singleton<$ty> =
            $crate::singleton::Singleton::new(|| $init);
    };
}
