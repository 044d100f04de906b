//! # dinstar-sms - operator console for Dinstar SMS gateways
//!
//! Stores the connection record of a Dinstar SMS gateway, composes outbound SMS
//! requests and keeps a local message history. Sending is simulated: a submitted
//! message is recorded with status `sent` and the equivalent gateway call is shown
//! as a `curl` command the operator can run by hand.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dinstar_sms::console::{landing, MessageView, Route};
//! use dinstar_sms::storage::Storage;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Storage::new("./data").await?;
//!     if landing(&storage).await? == Route::Messages {
//!         let mut view = MessageView::open(storage).await?;
//!         view.form.recipient = "0697040852".into();
//!         view.form.message = "Hello".into();
//!         view.send().await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`console`] - landing route, configuration editor, message view, interactive session
//! - [`gateway`] - gateway connection record and the documented HTTP contract
//! - [`sms`] - message log records
//! - [`storage`] - JSON document persistence
//! - [`config`] - console settings (TOML)
//! - [`i18n`] - Albanian and English strings
//! - [`validation`] - presence checks and document parsing guards

pub mod config;
pub mod console;
pub mod errors;
pub mod gateway;
pub mod i18n;
pub mod logutil;
pub mod sms;
pub mod storage;
pub mod validation;
