use chrono::{DateTime, Utc};
use log::{error, info, warn};

use crate::errors::{SmsError, SmsResult};
use crate::gateway::curl::{curl_command, Scheme, SendSmsRequest};
use crate::gateway::GatewayConfig;
use crate::logutil::escape_log;
use crate::sms::{next_id, prepend, MessageRecord};
use crate::storage::Storage;
use crate::validation::{is_present, sanitize_message_text};

/// Compose form. `sending` is set only while a submit is in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendForm {
    pub recipient: String,
    pub message: String,
    pub sim_port: u8,
    pub sending: bool,
}

/// Message screen state: the gateway record it was opened with, the in-memory log
/// and the compose form.
#[derive(Debug)]
pub struct MessageView {
    storage: Storage,
    config: Option<GatewayConfig>,
    messages: Vec<MessageRecord>,
    pub form: SendForm,
}

impl MessageView {
    pub async fn open(storage: Storage) -> SmsResult<Self> {
        let config = storage.load_gateway_config().await?;
        let messages = storage.load_messages().await?;
        let sim_port = config.as_ref().map(|c| c.sim_port).unwrap_or(0);
        Ok(Self {
            storage,
            config,
            messages,
            form: SendForm {
                sim_port,
                ..SendForm::default()
            },
        })
    }

    /// `None` means the screen only offers the way back to configuration.
    pub fn config(&self) -> Option<&GatewayConfig> {
        self.config.as_ref()
    }

    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }

    /// Re-read the persisted log. The in-memory list is kept if the read fails.
    pub async fn reload(&mut self) -> SmsResult<usize> {
        match self.storage.load_messages().await {
            Ok(messages) => {
                self.messages = messages;
                Ok(self.messages.len())
            }
            Err(e) => {
                error!("failed to reload messages: {:#}", e);
                Err(SmsError::Storage(e))
            }
        }
    }

    /// Simulated send using the current wall clock.
    pub async fn send(&mut self) -> SmsResult<MessageRecord> {
        self.send_at(Utc::now()).await
    }

    /// Record the drafted message as sent at `now` and persist the log.
    ///
    /// The log is written before the in-memory list changes, so a failed write leaves
    /// both untouched. On success recipient and text are cleared; the SIM port stays.
    pub async fn send_at(&mut self, now: DateTime<Utc>) -> SmsResult<MessageRecord> {
        let text = sanitize_message_text(&self.form.message);
        if !is_present(&self.form.recipient) || !is_present(&text) {
            return Err(SmsError::MissingRecipientOrMessage);
        }
        if self.config.is_none() {
            warn!("send refused: gateway not configured");
            return Err(SmsError::NotConfigured);
        }

        self.form.sending = true;
        let record = MessageRecord::outbound_sent(
            next_id(now, self.messages.first()),
            self.form.recipient.trim(),
            &text,
            self.form.sim_port,
            now,
        );
        let updated = prepend(&self.messages, record.clone());
        let persisted = self.storage.save_messages(&updated).await;
        self.form.sending = false;

        if let Err(e) = persisted {
            error!("failed to persist message log: {:#}", e);
            return Err(SmsError::Storage(e));
        }
        self.messages = updated;
        self.form.recipient.clear();
        self.form.message.clear();
        info!(
            "SMS recorded (demo) id={} to={} sim={} text={}",
            record.id,
            escape_log(record.counterpart()),
            record.sim_port,
            escape_log(&record.message)
        );
        Ok(record)
    }

    /// Test command for the current draft; `sample_number` stands in for an empty recipient.
    pub fn draft_command(&self, sample_number: &str, sample_user_id: u32) -> Option<String> {
        let cfg = self.config.as_ref()?;
        let number = if self.form.recipient.is_empty() {
            sample_number
        } else {
            self.form.recipient.as_str()
        };
        let request = SendSmsRequest::single(cfg, "Test", self.form.sim_port, number, sample_user_id);
        Some(curl_command(cfg, &request, Scheme::Http))
    }
}
