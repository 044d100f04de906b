//! Request body of the gateway's `send_sms` call and its rendering as a `curl` command line.

use serde::{Deserialize, Serialize};

use super::GatewayConfig;

/// Recipient entry inside a send request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsParam {
    pub number: String,
    pub user_id: u32,
    pub sn: String,
}

/// JSON body accepted by `POST /api/send_sms`.
///
/// Field order is significant for the rendered command: `text`, `port`, `param`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendSmsRequest {
    pub text: String,
    pub port: Vec<u8>,
    pub param: Vec<SmsParam>,
}

impl SendSmsRequest {
    /// Single-recipient request on one SIM slot, tagged with the gateway serial number.
    pub fn single(
        cfg: &GatewayConfig,
        text: &str,
        sim_port: u8,
        number: &str,
        user_id: u32,
    ) -> Self {
        Self {
            text: text.to_string(),
            port: vec![sim_port],
            param: vec![SmsParam {
                number: number.to_string(),
                user_id,
                sn: cfg.serial_number.clone(),
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    /// TLS variant; adds `-k` because gateways ship self-signed certificates.
    Https,
}

/// Render the command an operator can paste into a shell to send `request`.
pub fn curl_command(cfg: &GatewayConfig, request: &SendSmsRequest, scheme: Scheme) -> String {
    // Serializing a struct of strings and integers cannot fail.
    let body = serde_json::to_string(request).unwrap_or_default();
    let credentials = format!("{}:{}", cfg.username, cfg.password);
    let mut cmd = format!(
        "curl --anyauth -u \"{}\" -X POST -H \"Content-Type: application/json\" -d '{}' ",
        escape_double_quoted(&credentials),
        escape_single_quoted(&body),
    );
    match scheme {
        Scheme::Http => cmd.push_str(&cfg.send_sms_url()),
        Scheme::Https => {
            cmd.push_str(&cfg.send_sms_url_https());
            cmd.push_str(" -k");
        }
    }
    cmd
}

fn escape_double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn escape_single_quoted(s: &str) -> String {
    s.replace('\'', "'\\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GatewayConfig {
        GatewayConfig {
            base_url: "http://10.0.0.2".into(),
            port: 8081,
            username: "admin".into(),
            password: "pa$$".into(),
            serial_number: "SN-1".into(),
            sim_port: 2,
        }
    }

    #[test]
    fn body_has_documented_shape() {
        let req = SendSmsRequest::single(&cfg(), "Test SMS", 2, "0697040852", 1234);
        assert_eq!(
            serde_json::to_string(&req).unwrap(),
            r#"{"text":"Test SMS","port":[2],"param":[{"number":"0697040852","user_id":1234,"sn":"SN-1"}]}"#
        );
    }

    #[test]
    fn single_quotes_in_text_survive_the_shell() {
        let req = SendSmsRequest::single(&cfg(), "it's", 0, "1", 1);
        let cmd = curl_command(&cfg(), &req, Scheme::Http);
        assert!(cmd.contains(r#"{"text":"it'\''s""#));
    }

    #[test]
    fn credentials_are_escaped() {
        let req = SendSmsRequest::single(&cfg(), "x", 0, "1", 1);
        let cmd = curl_command(&cfg(), &req, Scheme::Http);
        assert!(cmd.starts_with(r#"curl --anyauth -u "admin:pa\$\$" -X POST"#));
    }
}
