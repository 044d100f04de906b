//! Operator-facing strings in Albanian (default) and English.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "sq")]
    Albanian,
    #[serde(rename = "en")]
    English,
}

/// Catalog keys. Parameterised strings live in the helper methods on [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Loading,
    // alerts
    FillRequiredFields,
    ConfigSaved,
    ConfigSaveError,
    FillRecipientAndMessage,
    NotConfiguredAlert,
    SmsSent,
    SmsSendError,
    MessagesLoadError,
    // config view
    ConfigTitle,
    ConfigSubtitle,
    StatusConfigured,
    StatusOffline,
    NotSet,
    TestHint,
    QuickGuideTitle,
    Guide1,
    Guide2,
    Guide3,
    Guide4,
    // messages view
    MessagesTitle,
    MessagesSubtitle,
    NotConfiguredTitle,
    NotConfiguredHint,
    GoToConfig,
    HistoryTitle,
    NoMessages,
    NoMessagesHint,
    StatusSent,
    StatusDelivered,
    StatusError,
    To,
    From,
    SimPort,
    // prompts
    PromptBaseUrl,
    PromptPort,
    PromptUsername,
    PromptPassword,
    PromptSerial,
    PromptDefaultSim,
    PromptRecipient,
    PromptSimPort,
    PromptMessage,
    KeepCurrent,
    // menus
    ConfigMenu,
    MessagesMenu,
    UnknownCommand,
    InvalidNumber,
}

impl Language {
    pub fn t(self, msg: Msg) -> &'static str {
        let (sq, en) = match msg {
            Msg::Loading => ("Duke ngarkuar Dinstar SMS Module...", "Loading Dinstar SMS Module..."),
            Msg::FillRequiredFields => (
                "Ju lutem plotësoni të gjitha fushat e kërkuara",
                "Please fill in all required fields",
            ),
            Msg::ConfigSaved => ("Konfigurimi u ruajt me sukses!", "Configuration saved successfully!"),
            Msg::ConfigSaveError => ("Gabim në ruajtjen e konfigurimit", "Error saving the configuration"),
            Msg::FillRecipientAndMessage => (
                "Ju lutem plotësoni numrin dhe mesazhin",
                "Please fill in the number and the message",
            ),
            Msg::NotConfiguredAlert => (
                "Gateway nuk është i konfiguruar. Shkoni tek konfigurimi.",
                "Gateway is not configured. Go to the configuration.",
            ),
            Msg::SmsSent => ("SMS u dërgua me sukses! (Demo mode)", "SMS sent successfully! (Demo mode)"),
            Msg::SmsSendError => ("Gabim në dërgimin e SMS", "Error sending the SMS"),
            Msg::MessagesLoadError => ("Gabim në ngarkimin e mesazheve", "Error loading the messages"),
            Msg::ConfigTitle => ("Konfigurimi i Dinstar Gateway", "Dinstar Gateway Configuration"),
            Msg::ConfigSubtitle => (
                "Konfiguro lidhjen me gateway Dinstar për SMS",
                "Configure the connection to the Dinstar SMS gateway",
            ),
            Msg::StatusConfigured => ("I Konfiguruar", "Configured"),
            Msg::StatusOffline => ("Jo i Konfiguruar", "Not configured"),
            Msg::NotSet => ("Jo i caktuar", "Not set"),
            Msg::TestHint => (
                "Përdorni curl command nga CMD për të testuar gateway tuaj.",
                "Use the curl command from a terminal to test your gateway.",
            ),
            Msg::QuickGuideTitle => ("Udhëzues i Shpejtë", "Quick Guide"),
            Msg::Guide1 => ("Plotësoni URL-në (http:// ose https://)", "Fill in the URL (http:// or https://)"),
            Msg::Guide2 => ("Vendosni port, username, password dhe SN", "Set port, username, password and SN"),
            Msg::Guide3 => ("Kopjoni curl command dhe testoni në CMD", "Copy the curl command and test it in a terminal"),
            Msg::Guide4 => (
                "Ruani konfigurimin dhe shkoni tek SMS Messages",
                "Save the configuration and go to SMS Messages",
            ),
            Msg::MessagesTitle => ("Dinstar SMS Messages", "Dinstar SMS Messages"),
            Msg::MessagesSubtitle => (
                "Dërgoni dhe merrni SMS përmes gateway Dinstar",
                "Send and receive SMS through the Dinstar gateway",
            ),
            Msg::NotConfiguredTitle => ("Gateway nuk është i konfiguruar", "Gateway is not configured"),
            Msg::NotConfiguredHint => (
                "Shkoni tek konfigurimi për të vendosur gateway",
                "Go to the configuration to set up the gateway",
            ),
            Msg::GoToConfig => ("Shko tek Konfigurimi", "Go to Configuration"),
            Msg::HistoryTitle => ("Historiku i Mesazheve", "Message History"),
            Msg::NoMessages => ("Nuk ka mesazhe", "No messages"),
            Msg::NoMessagesHint => (
                "Dërgoni SMS-in e parë tuaj për të filluar",
                "Send your first SMS to get started",
            ),
            Msg::StatusSent => ("Dërguar", "Sent"),
            Msg::StatusDelivered => ("Dorëzuar", "Delivered"),
            Msg::StatusError => ("Gabim", "Error"),
            Msg::To => ("Tek", "To"),
            Msg::From => ("Nga", "From"),
            Msg::SimPort => ("Porta SIM", "SIM port"),
            Msg::PromptBaseUrl => ("Base URL", "Base URL"),
            Msg::PromptPort => ("Port", "Port"),
            Msg::PromptUsername => ("Username", "Username"),
            Msg::PromptPassword => ("Password", "Password"),
            Msg::PromptSerial => ("Serial Number (SN)", "Serial Number (SN)"),
            Msg::PromptDefaultSim => ("Porta SIM Default (0-15)", "Default SIM port (0-15)"),
            Msg::PromptRecipient => ("Numri Marrës", "Recipient number"),
            Msg::PromptSimPort => ("Porta SIM (0-15)", "SIM port (0-15)"),
            Msg::PromptMessage => ("Mesazhi", "Message"),
            Msg::KeepCurrent => ("bosh = mbaj vlerën", "empty = keep value"),
            Msg::ConfigMenu => (
                "[E]dito  [T]est  [M]esazhet  [D]il",
                "[E]dit  [T]est  [M]essages  [Q]uit",
            ),
            Msg::MessagesMenu => (
                "[S] Dërgo  [R]ifresko  [K]onfigurimi  [D]il",
                "[S]end  [R]eload  [C]onfiguration  [Q]uit",
            ),
            Msg::UnknownCommand => ("Komandë e panjohur", "Unknown command"),
            Msg::InvalidNumber => ("Numër i pavlefshëm", "Invalid number"),
        };
        match self {
            Language::Albanian => sq,
            Language::English => en,
        }
    }

    pub fn messages_total(self, n: usize) -> String {
        match self {
            Language::Albanian => format!("{n} mesazhe gjithsej"),
            Language::English => format!("{n} messages total"),
        }
    }

    /// Character counter under the compose field; 160 is one GSM-7 segment.
    pub fn char_counter(self, n: usize) -> String {
        match self {
            Language::Albanian => format!("{n}/160 karaktere"),
            Language::English => format!("{n}/160 characters"),
        }
    }

    pub fn default_sim_hint(self, sim_port: u8) -> String {
        match self {
            Language::Albanian => format!("Porta SIM (0-15). Default: {sim_port}"),
            Language::English => format!("SIM port (0-15). Default: {sim_port}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn albanian_is_default() {
        assert_eq!(Language::default(), Language::Albanian);
        assert_eq!(Language::default().t(Msg::StatusSent), "Dërguar");
    }

    #[test]
    fn english_strings() {
        assert_eq!(Language::English.t(Msg::StatusDelivered), "Delivered");
        assert_eq!(Language::English.messages_total(3), "3 messages total");
        assert_eq!(Language::Albanian.char_counter(12), "12/160 karaktere");
    }
}
