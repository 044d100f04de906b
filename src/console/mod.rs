//! # Console - operator screens
//!
//! Two screens share one data directory:
//!
//! - [`ConfigEditor`] edits the gateway connection record and renders test commands.
//! - [`MessageView`] composes simulated sends and lists the message log.
//!
//! [`landing`] picks the first screen: the editor until a record has been saved,
//! the message view afterwards. [`session::ConsoleSession`] drives both screens
//! interactively over any line-oriented reader/writer pair.

pub mod config_editor;
pub mod message_view;
pub mod render;
pub mod session;

pub use config_editor::{ConfigEditor, ConnectionTest};
pub use message_view::{MessageView, SendForm};

use anyhow::Result;
use log::debug;

use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Config,
    Messages,
}

impl Route {
    pub fn as_str(self) -> &'static str {
        match self {
            Route::Config => "config",
            Route::Messages => "messages",
        }
    }
}

/// Route by presence of the stored gateway record alone; its contents are not parsed.
pub async fn landing(storage: &Storage) -> Result<Route> {
    let route = if storage.has_gateway_config().await? {
        Route::Messages
    } else {
        Route::Config
    };
    debug!("landing route: {}", route.as_str());
    Ok(route)
}
