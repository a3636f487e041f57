//! Core library modules.
//!
//! - **Shifts**: punch parsing ([`punch`]) and shift reconstruction ([`shift`])
//! - **Fetching**: page loops over the attendance service ([`fetch`])
//! - **Infrastructure**: configuration, data storage, secrets, errors, messages
//! - **Output**: formatting, console tables and file export
//!
//! ```rust
//! use cxshift::libs::shift::reconstruct;
//!
//! let result = reconstruct(Vec::new());
//! assert!(result.is_empty());
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod fetch;
pub mod formatter;
pub mod messages;
pub mod punch;
pub mod secret;
pub mod shift;
pub mod view;
