//! Cartoon generation settings
//!
//! This crate provides the configuration record the cartoon builder reads
//! and a thread-safe store for live tuning.
//!
//! # Architecture
//!
//! [`CartoonSettings`] is a plain value. A build takes one by reference and
//! never looks at it again, so edits only take effect on the next rebuild.
//! [`SettingsStore`] holds the "current" record that interactive tooling
//! edits; builds take a [`snapshot`](SettingsStore::snapshot) of it.
//!
//! # Example
//!
//! ```rust
//! use ribbon_settings::{CartoonSettings, SettingsStore};
//!
//! let store = SettingsStore::new();
//! store.update(|s| s.sampling = 10).unwrap();
//!
//! let snapshot: CartoonSettings = store.snapshot();
//! assert_eq!(snapshot.sampling, 10);
//!
//! // Out-of-range edits are rejected and leave the store untouched
//! assert!(store.update(|s| s.profile_quality = 3).is_err());
//! assert_eq!(store.snapshot().profile_quality, 16);
//! ```

mod cartoon;
mod error;
mod store;

pub use cartoon::{CartoonSettings, MIN_PROFILE_QUALITY};
pub use error::SettingError;
pub use store::SettingsStore;
