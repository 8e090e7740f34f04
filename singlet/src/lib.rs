//! # singlet
//!
//! Process-wide, thread-safe, lazily constructed singleton instances.
//!
//! This crate is a **façade** that re-exports the public items from the
//! underlying workspace crates.  Application code should depend on this
//! crate rather than the individual `singlet-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! singlet = "0.1"
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//! use singlet::core::Registry;
//!
//! struct AppState { launches: u32 }
//!
//! let registry = Registry::new();
//! let state = registry.get_or_init(|| AppState { launches: 1 });
//! let again = registry.get_or_init(|| AppState { launches: 99 });
//!
//! assert_eq!(again.launches, 1);
//! assert!(Arc::ptr_eq(&state, &again));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Construction cell, instance registry, static singletons, and errors.
pub use singlet_core as core;

/// Process-wide key-value settings.
pub use singlet_settings as settings;
