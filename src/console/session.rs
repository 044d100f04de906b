//! Interactive console session.
//!
//! Reads single-letter commands and form answers line by line. The session starts at
//! the landing route and ends on quit or end of input. English and Albanian menu
//! letters are both accepted:
//!
//! | action        | keys  |
//! |---------------|-------|
//! | edit config   | `E`   |
//! | test commands | `T`   |
//! | messages      | `M`   |
//! | send          | `S`   |
//! | reload        | `R`   |
//! | configuration | `C`/`K` |
//! | quit          | `Q`/`D` |

use anyhow::Result;
use log::{debug, error};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::render::{render_config_view, render_connection_test, render_message_view, render_not_configured};
use super::{landing, ConfigEditor, MessageView, Route};
use crate::config::UiConfig;
use crate::errors::SmsError;
use crate::gateway::MAX_SIM_PORT;
use crate::i18n::{Language, Msg};
use crate::storage::Storage;

/// Alert text for a failed action. `storage_msg` names the action for storage failures.
pub fn alert_text(lang: Language, err: &SmsError, storage_msg: Msg) -> &'static str {
    match err {
        SmsError::MissingConfigFields(_) => lang.t(Msg::FillRequiredFields),
        SmsError::MissingRecipientOrMessage => lang.t(Msg::FillRecipientAndMessage),
        SmsError::NotConfigured => lang.t(Msg::NotConfiguredAlert),
        SmsError::Storage(_) => lang.t(storage_msg),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Edit,
    Test,
    Messages,
    Send,
    Reload,
    Config,
    Quit,
    Unknown,
}

fn parse_command(line: &str) -> Command {
    match line.trim().to_ascii_lowercase().as_str() {
        "e" | "edit" => Command::Edit,
        "t" | "test" => Command::Test,
        "m" | "messages" => Command::Messages,
        "s" | "send" => Command::Send,
        "r" | "reload" => Command::Reload,
        "c" | "k" | "config" => Command::Config,
        "q" | "d" | "quit" => Command::Quit,
        _ => Command::Unknown,
    }
}

pub struct ConsoleSession<R, W> {
    reader: R,
    writer: W,
    storage: Storage,
    lang: Language,
    sample_number: String,
    sample_user_id: u32,
}

impl<R, W> ConsoleSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(storage: Storage, ui: &UiConfig, reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            storage,
            lang: ui.language,
            sample_number: ui.sample_number.clone(),
            sample_user_id: ui.sample_user_id,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Run from the landing route until the operator quits or input ends.
    pub async fn run(&mut self) -> Result<()> {
        self.write(self.lang.t(Msg::Loading)).await?;
        self.write("\n").await?;
        let mut route = landing(&self.storage).await?;
        loop {
            debug!("console screen: {}", route.as_str());
            let next = match route {
                Route::Config => self.config_screen().await?,
                Route::Messages => self.messages_screen().await?,
            };
            match next {
                Some(r) => route = r,
                None => return Ok(()),
            }
        }
    }

    async fn config_screen(&mut self) -> Result<Option<Route>> {
        let mut editor = match ConfigEditor::open(self.storage.clone()).await {
            Ok(editor) => editor,
            Err(e) => {
                error!("cannot open configuration: {}", e);
                self.alert(alert_text(self.lang, &e, Msg::ConfigSaveError)).await?;
                return Ok(None);
            }
        };
        loop {
            let view = render_config_view(self.lang, &editor);
            self.write(&view).await?;
            self.write_menu(Msg::ConfigMenu).await?;
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            match parse_command(&line) {
                Command::Edit => {
                    if !self.edit_form(&mut editor).await? {
                        return Ok(None);
                    }
                    match editor.save().await {
                        Ok(()) => self.alert(self.lang.t(Msg::ConfigSaved)).await?,
                        Err(e) => self.alert(alert_text(self.lang, &e, Msg::ConfigSaveError)).await?,
                    }
                }
                Command::Test => {
                    let test = editor.test_connection(&self.sample_number, self.sample_user_id);
                    let text = render_connection_test(self.lang, &test);
                    self.write(&text).await?;
                }
                Command::Messages => return Ok(Some(Route::Messages)),
                Command::Quit => return Ok(None),
                _ => self.alert(self.lang.t(Msg::UnknownCommand)).await?,
            }
        }
    }

    /// Prompt for every field; an empty answer keeps the current value.
    /// Returns false when input ended mid-form.
    async fn edit_form(&mut self, editor: &mut ConfigEditor) -> Result<bool> {
        let lang = self.lang;
        let form = &mut editor.form;

        let Some(v) = self.prompt(lang.t(Msg::PromptBaseUrl), &form.base_url).await? else {
            return Ok(false);
        };
        form.base_url = v;

        let Some(v) = self.prompt(lang.t(Msg::PromptPort), &form.port.to_string()).await? else {
            return Ok(false);
        };
        match v.trim().parse::<u16>() {
            Ok(port) => form.port = port,
            Err(_) => self.alert(lang.t(Msg::InvalidNumber)).await?,
        }

        let Some(v) = self.prompt(lang.t(Msg::PromptUsername), &form.username).await? else {
            return Ok(false);
        };
        form.username = v;

        let Some(v) = self.prompt_secret(lang.t(Msg::PromptPassword), &form.password).await? else {
            return Ok(false);
        };
        form.password = v;

        let Some(v) = self.prompt(lang.t(Msg::PromptSerial), &form.serial_number).await? else {
            return Ok(false);
        };
        form.serial_number = v;

        let Some(v) = self.prompt(lang.t(Msg::PromptDefaultSim), &form.sim_port.to_string()).await? else {
            return Ok(false);
        };
        match parse_sim_port(&v) {
            Some(sim) => form.sim_port = sim,
            None => self.alert(lang.t(Msg::InvalidNumber)).await?,
        }
        Ok(true)
    }

    async fn messages_screen(&mut self) -> Result<Option<Route>> {
        let mut view = match MessageView::open(self.storage.clone()).await {
            Ok(view) => view,
            Err(e) => {
                error!("cannot open message view: {}", e);
                self.alert(alert_text(self.lang, &e, Msg::MessagesLoadError)).await?;
                return Ok(None);
            }
        };
        loop {
            if view.config().is_none() {
                let text = render_not_configured(self.lang);
                self.write(&text).await?;
            } else {
                let text = render_message_view(self.lang, &view, &self.sample_number, self.sample_user_id);
                self.write(&text).await?;
                self.write_menu(Msg::MessagesMenu).await?;
            }
            let Some(line) = self.read_line().await? else {
                return Ok(None);
            };
            match parse_command(&line) {
                Command::Config => return Ok(Some(Route::Config)),
                Command::Quit => return Ok(None),
                _ if view.config().is_none() => {}
                Command::Send => {
                    if !self.compose(&mut view).await? {
                        return Ok(None);
                    }
                    match view.send().await {
                        Ok(_) => self.alert(self.lang.t(Msg::SmsSent)).await?,
                        Err(e) => self.alert(alert_text(self.lang, &e, Msg::SmsSendError)).await?,
                    }
                }
                Command::Reload => {
                    if let Err(e) = view.reload().await {
                        self.alert(alert_text(self.lang, &e, Msg::MessagesLoadError)).await?;
                    }
                }
                _ => self.alert(self.lang.t(Msg::UnknownCommand)).await?,
            }
        }
    }

    async fn compose(&mut self, view: &mut MessageView) -> Result<bool> {
        let lang = self.lang;
        let Some(v) = self.prompt(lang.t(Msg::PromptRecipient), &view.form.recipient).await? else {
            return Ok(false);
        };
        view.form.recipient = v;

        let Some(v) = self.prompt(lang.t(Msg::PromptSimPort), &view.form.sim_port.to_string()).await? else {
            return Ok(false);
        };
        match parse_sim_port(&v) {
            Some(sim) => view.form.sim_port = sim,
            None => self.alert(lang.t(Msg::InvalidNumber)).await?,
        }

        let Some(v) = self.prompt(lang.t(Msg::PromptMessage), &view.form.message).await? else {
            return Ok(false);
        };
        view.form.message = v;
        let counter = lang.char_counter(view.form.message.chars().count());
        self.write(&counter).await?;
        self.write("\n").await?;
        Ok(true)
    }

    async fn prompt(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        self.ask(label, current, current).await
    }

    /// Password prompt: the stored value is never echoed.
    async fn prompt_secret(&mut self, label: &str, current: &str) -> Result<Option<String>> {
        self.ask(label, "********", current).await
    }

    /// Only an empty answer keeps `current`; any typed text, `shown` included, replaces it.
    async fn ask(&mut self, label: &str, shown: &str, current: &str) -> Result<Option<String>> {
        let text = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{shown}] ({}): ", self.lang.t(Msg::KeepCurrent))
        };
        self.write(&text).await?;
        Ok(self.read_line().await?.map(|answer| {
            if answer.is_empty() {
                current.to_string()
            } else {
                answer
            }
        }))
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).await?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn write_menu(&mut self, menu: Msg) -> Result<()> {
        let text = format!("{}\n> ", self.lang.t(menu));
        self.write(&text).await
    }

    async fn alert(&mut self, text: &str) -> Result<()> {
        let line = format!("! {text}\n");
        self.write(&line).await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// SIM slot index 0-15; anything else is rejected.
pub fn parse_sim_port(value: &str) -> Option<u8> {
    value.trim().parse::<u8>().ok().filter(|p| *p <= MAX_SIM_PORT)
}
