use log::{error, info, warn};

use crate::errors::{SmsError, SmsResult};
use crate::gateway::curl::{curl_command, Scheme, SendSmsRequest};
use crate::gateway::{GatewayConfig, GatewayStatus};
use crate::logutil::{escape_log, mask_secret};
use crate::storage::Storage;

/// Configuration screen state.
///
/// `form` holds the fields being edited; it is pre-filled from storage on open and
/// only reaches storage through [`ConfigEditor::save`].
#[derive(Debug)]
pub struct ConfigEditor {
    storage: Storage,
    pub form: GatewayConfig,
    status: GatewayStatus,
}

/// What the "connection test" action shows. No request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTest {
    pub endpoint: String,
    pub username: String,
    pub serial_number: String,
    pub http_command: String,
    pub https_command: String,
}

impl ConfigEditor {
    pub async fn open(storage: Storage) -> SmsResult<Self> {
        let stored = storage.load_gateway_config().await?;
        let status = GatewayStatus::from_stored(stored.as_ref());
        Ok(Self {
            storage,
            form: stored.unwrap_or_default(),
            status,
        })
    }

    pub fn status(&self) -> GatewayStatus {
        self.status
    }

    /// Persist the form, replacing any previous record.
    ///
    /// With a required field empty nothing is written and the stored record stays as it was.
    pub async fn save(&mut self) -> SmsResult<()> {
        if let Err(e) = self.form.ensure_complete() {
            warn!("configuration not saved: {}", e);
            return Err(e);
        }
        if let Err(e) = self.storage.save_gateway_config(&self.form).await {
            error!("failed to save gateway configuration: {:#}", e);
            return Err(SmsError::Storage(e));
        }
        self.status = GatewayStatus::Configured;
        info!(
            "gateway configuration saved: endpoint={} user={} password={} sn={} sim={}",
            escape_log(&self.form.endpoint()),
            escape_log(&self.form.username),
            mask_secret(&self.form.password),
            escape_log(&self.form.serial_number),
            self.form.sim_port
        );
        Ok(())
    }

    /// Connection summary plus the HTTP and HTTPS test commands for the current form.
    pub fn test_connection(&self, sample_number: &str, sample_user_id: u32) -> ConnectionTest {
        let cfg = &self.form;
        let http = SendSmsRequest::single(cfg, "Test SMS", cfg.sim_port, sample_number, sample_user_id);
        let https = SendSmsRequest::single(cfg, "Test HTTPS", cfg.sim_port, sample_number, sample_user_id);
        ConnectionTest {
            endpoint: cfg.endpoint(),
            username: cfg.username.clone(),
            serial_number: cfg.serial_number.clone(),
            http_command: curl_command(cfg, &http, Scheme::Http),
            https_command: curl_command(cfg, &https, Scheme::Https),
        }
    }
}
