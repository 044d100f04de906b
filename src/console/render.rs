//! Plain-text rendering of the console screens.

use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

use super::{ConfigEditor, ConnectionTest, MessageView};
use crate::gateway::GatewayStatus;
use crate::i18n::{Language, Msg};
use crate::sms::{Direction, MessageRecord, MessageStatus};

/// Local date-time in the day.month.year order used by the Albanian locale.
pub fn format_datetime(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y, %H:%M:%S").to_string()
}

pub fn status_label(lang: Language, status: MessageStatus) -> &'static str {
    match status {
        MessageStatus::Sent => lang.t(Msg::StatusSent),
        MessageStatus::Delivered => lang.t(Msg::StatusDelivered),
        MessageStatus::Error => lang.t(Msg::StatusError),
    }
}

pub fn status_badge(lang: Language, status: GatewayStatus) -> &'static str {
    match status {
        GatewayStatus::Configured => lang.t(Msg::StatusConfigured),
        GatewayStatus::Offline => lang.t(Msg::StatusOffline),
    }
}

fn or_not_set(lang: Language, value: &str) -> String {
    if value.is_empty() {
        lang.t(Msg::NotSet).to_string()
    } else {
        value.to_string()
    }
}

pub fn render_config_view(lang: Language, editor: &ConfigEditor) -> String {
    let cfg = &editor.form;
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", lang.t(Msg::ConfigTitle));
    let _ = writeln!(out, "{}", lang.t(Msg::ConfigSubtitle));
    let _ = writeln!(out, "Status: {}", status_badge(lang, editor.status()));
    let _ = writeln!(out);
    let _ = writeln!(out, "URL: {}", cfg.endpoint());
    let _ = writeln!(out, "Username: {}", or_not_set(lang, &cfg.username));
    let _ = writeln!(out, "Serial Number: {}", or_not_set(lang, &cfg.serial_number));
    let _ = writeln!(out, "SIM Port Default: {}", cfg.sim_port);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}:", lang.t(Msg::QuickGuideTitle));
    for (n, step) in [Msg::Guide1, Msg::Guide2, Msg::Guide3, Msg::Guide4].into_iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", n + 1, lang.t(step));
    }
    out
}

pub fn render_connection_test(lang: Language, test: &ConnectionTest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Test Connection:");
    let _ = writeln!(out, "URL: {}", test.endpoint);
    let _ = writeln!(out, "Username: {}", test.username);
    let _ = writeln!(out, "SN: {}", test.serial_number);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", lang.t(Msg::TestHint));
    let _ = writeln!(out);
    let _ = writeln!(out, "HTTP Test:");
    let _ = writeln!(out, "{}", test.http_command);
    let _ = writeln!(out);
    let _ = writeln!(out, "HTTPS Test:");
    let _ = writeln!(out, "{}", test.https_command);
    out
}

/// Placeholder shown by the message screen when no gateway record exists.
pub fn render_not_configured(lang: Language) -> String {
    format!(
        "== {} ==\n{}\n-> {}\n",
        lang.t(Msg::NotConfiguredTitle),
        lang.t(Msg::NotConfiguredHint),
        lang.t(Msg::GoToConfig)
    )
}

pub fn render_message(lang: Language, record: &MessageRecord) -> String {
    let party = match record.direction {
        Direction::Outbound => format!("{}: {}", lang.t(Msg::To), record.counterpart()),
        Direction::Inbound => format!("{}: {}", lang.t(Msg::From), record.counterpart()),
    };
    let marker = match record.direction {
        Direction::Outbound => '>',
        Direction::Inbound => '<',
    };
    format!(
        "{} {} [{}]\n  {} • {}: {}\n  | {}\n",
        marker,
        party,
        status_label(lang, record.status),
        format_datetime(&record.timestamp),
        lang.t(Msg::SimPort),
        record.sim_port,
        record.message.replace('\n', "\n  | ")
    )
}

/// History panel: header line with the count, then each record in list order.
pub fn render_message_list(lang: Language, messages: &[MessageRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "-- {} --", lang.t(Msg::HistoryTitle));
    if messages.is_empty() {
        let _ = writeln!(out, "{}", lang.t(Msg::NoMessages));
        let _ = writeln!(out, "{}", lang.t(Msg::NoMessagesHint));
        return out;
    }
    let _ = writeln!(out, "{}", lang.messages_total(messages.len()));
    for record in messages {
        out.push_str(&render_message(lang, record));
    }
    out
}

pub fn render_message_view(
    lang: Language,
    view: &MessageView,
    sample_number: &str,
    sample_user_id: u32,
) -> String {
    let Some(cfg) = view.config() else {
        return render_not_configured(lang);
    };
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==  [{}]", lang.t(Msg::MessagesTitle), cfg.endpoint());
    let _ = writeln!(out, "{}", lang.t(Msg::MessagesSubtitle));
    let _ = writeln!(out, "{}", lang.default_sim_hint(cfg.sim_port));
    if let Some(cmd) = view.draft_command(sample_number, sample_user_id) {
        let _ = writeln!(out, "Curl Command:");
        let _ = writeln!(out, "{}", cmd);
    }
    let _ = writeln!(out);
    out.push_str(&render_message_list(lang, view.messages()));
    out
}
