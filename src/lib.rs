//! # cxshift - CrossChex Shift Reconstruction
//!
//! A command-line utility that pulls attendance punches from CrossChex Cloud
//! and rebuilds them into work shifts.
//!
//! ## Features
//!
//! - **Shift Reconstruction**: Rolling-window pairing of entry and exit punches
//! - **Missing Punch Detection**: Punches without a partner are reported
//! - **CrossChex Client**: Token handshake, session caching and paged listings
//! - **Data Export**: Shift reports to CSV, raw punches to JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cxshift::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod libs;
