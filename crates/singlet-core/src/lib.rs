//! # singlet-core
//!
//! Core primitives for singlet: process-wide, thread-safe, lazily
//! constructed singleton instances.
//!
//! The guarantee, everywhere: for any type, at most one instance is ever
//! constructed per registry (and per process, through the global registry),
//! no matter how many threads race to request it first.  Warm cell reads are
//! lock-free, a warm registry lookup costs a shared map lock plus one atomic
//! load, and the per-type gate is only ever taken during the
//! first-construction race.
//!
//! Three layers, smallest first:
//! * [`cell::SingletonCell`]: one slot, one value, double-checked
//!   construction;
//! * [`singleton::Singleton`] and [`define_singleton!`]: `static`
//!   declarations bound to a factory;
//! * [`registry::Registry`]: a type-keyed map of slots, injectable for
//!   tests, with a process-wide instance behind [`registry::Registry::global`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Double-checked lazy construction cell.
pub mod cell;

/// Error types and the crate-wide `Result` alias.
pub mod errors;

/// Type-keyed instance registry.
pub mod registry;

/// Static singleton wrapper and the `define_singleton!` macro.
pub mod singleton;

// ── Re-exports for convenience ───────────────────────────────────────────────

pub use cell::SingletonCell;
pub use errors::{Error, Result};
pub use registry::{instance, try_instance, Registry};
pub use singleton::Singleton;
