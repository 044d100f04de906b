//! # Gateway Module
//!
//! The connection record for a Dinstar SMS gateway and the documented HTTP contract
//! used to talk to it.
//!
//! Nothing in this crate calls the gateway. The contract is rendered as copyable
//! `curl` invocations (see [`curl`]) so an operator can test the appliance by hand:
//!
//! ```text
//! POST {baseUrl}:{port}/api/send_sms
//! Authorization: basic (username:password)
//! {"text":"..","port":[simPort],"param":[{"number":"..","user_id":1234,"sn":".."}]}
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use dinstar_sms::gateway::GatewayConfig;
//!
//! let cfg = GatewayConfig {
//!     base_url: "http://192.168.1.50".into(),
//!     port: 8081,
//!     username: "admin".into(),
//!     password: "secret".into(),
//!     serial_number: "dbd2-0325-0044-0088".into(),
//!     sim_port: 0,
//! };
//! assert!(cfg.is_configured());
//! assert_eq!(cfg.endpoint(), "http://192.168.1.50:8081");
//! ```

pub mod curl;

use serde::{Deserialize, Serialize};

use crate::errors::{SmsError, SmsResult};
use crate::validation::is_present;

/// Default HTTP port of the gateway's API.
pub const DEFAULT_GATEWAY_PORT: u16 = 8081;

/// Highest SIM slot index on the gateway.
pub const MAX_SIM_PORT: u8 = 15;

/// Singleton connection record. Field names on disk match the browser record
/// the console replaced, so existing exports load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub username: String,
    pub password: String,
    pub serial_number: String,
    /// Default SIM slot (0-15), changeable per message.
    #[serde(default)]
    pub sim_port: u8,
}

fn default_port() -> u16 {
    DEFAULT_GATEWAY_PORT
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: DEFAULT_GATEWAY_PORT,
            username: String::new(),
            password: String::new(),
            serial_number: String::new(),
            sim_port: 0,
        }
    }
}

impl GatewayConfig {
    /// Names of the required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_present(&self.base_url) {
            missing.push("baseUrl");
        }
        if self.port == 0 {
            missing.push("port");
        }
        if !is_present(&self.username) {
            missing.push("username");
        }
        if !is_present(&self.password) {
            missing.push("password");
        }
        if !is_present(&self.serial_number) {
            missing.push("serialNumber");
        }
        missing
    }

    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Presence check run before the record may be persisted.
    pub fn ensure_complete(&self) -> SmsResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SmsError::MissingConfigFields(missing))
        }
    }

    /// `baseUrl:port`, as shown in view headers and used as the request prefix.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.base_url, self.port)
    }

    /// Full URL of the send endpoint.
    pub fn send_sms_url(&self) -> String {
        format!("{}/api/send_sms", self.endpoint())
    }

    /// Same endpoint forced onto TLS. Only a literal `http://` prefix is rewritten.
    pub fn send_sms_url_https(&self) -> String {
        let base = match self.base_url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => self.base_url.clone(),
        };
        format!("{}:{}/api/send_sms", base, self.port)
    }
}

/// Editor badge: whether a record has been saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Offline,
    Configured,
}

impl GatewayStatus {
    pub fn from_stored(stored: Option<&GatewayConfig>) -> Self {
        match stored {
            Some(_) => GatewayStatus::Configured,
            None => GatewayStatus::Offline,
        }
    }
}
