use chrono::{TimeZone, Utc};
use dinstar_sms::console::{ConfigEditor, MessageView};
use dinstar_sms::errors::SmsError;
use dinstar_sms::gateway::GatewayConfig;
use dinstar_sms::sms::{Direction, MessageStatus};
use dinstar_sms::storage::Storage;

async fn configured_storage(sim_port: u8) -> (tempfile::TempDir, Storage) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let storage = Storage::new(tmp.path().to_str().unwrap())
        .await
        .expect("storage new");
    let mut editor = ConfigEditor::open(storage.clone()).await.unwrap();
    editor.form = GatewayConfig {
        base_url: "http://10.0.0.9".into(),
        port: 8081,
        username: "admin".into(),
        password: "pw".into(),
        serial_number: "SN-42".into(),
        sim_port,
    };
    editor.save().await.unwrap();
    (tmp, storage)
}

#[tokio::test]
async fn send_prepends_one_sent_record_and_persists() {
    let (_tmp, storage) = configured_storage(3).await;
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    assert_eq!(view.form.sim_port, 3);
    view.form.recipient = "0697040852".into();
    view.form.message = "Përshëndetje".into();

    let record = view.send().await.unwrap();
    assert_eq!(record.status, MessageStatus::Sent);
    assert_eq!(record.direction, Direction::Outbound);
    assert_eq!(record.recipient.as_deref(), Some("0697040852"));
    assert_eq!(record.message, "Përshëndetje");
    assert_eq!(record.sim_port, 3);

    assert_eq!(view.messages().len(), 1);
    let persisted = storage.load_messages().await.unwrap();
    assert_eq!(persisted, vec![record]);
}

#[tokio::test]
async fn send_clears_draft_but_keeps_sim_port() {
    let (_tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage).await.unwrap();
    view.form.recipient = "111".into();
    view.form.message = "hi".into();
    view.form.sim_port = 7;
    view.send().await.unwrap();
    assert!(view.form.recipient.is_empty());
    assert!(view.form.message.is_empty());
    assert_eq!(view.form.sim_port, 7);
    assert!(!view.form.sending);
}

#[tokio::test]
async fn empty_recipient_or_message_leaves_log_unchanged() {
    let (_tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    view.form.recipient = "111".into();
    view.form.message = "first".into();
    view.send().await.unwrap();

    for (recipient, message) in [("", "text"), ("222", ""), ("  ", "text")] {
        view.form.recipient = recipient.into();
        view.form.message = message.into();
        assert!(matches!(
            view.send().await,
            Err(SmsError::MissingRecipientOrMessage)
        ));
        // Draft is kept so the operator can fix it
        assert_eq!(view.form.recipient, recipient);
        assert_eq!(view.messages().len(), 1);
        assert_eq!(storage.load_messages().await.unwrap().len(), 1);
    }
}

#[tokio::test]
async fn unconfigured_view_refuses_to_send() {
    let tmp = tempfile::tempdir().unwrap();
    let storage = Storage::new(tmp.path().to_str().unwrap()).await.unwrap();
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    assert!(view.config().is_none());
    view.form.recipient = "111".into();
    view.form.message = "hi".into();
    assert!(matches!(view.send().await, Err(SmsError::NotConfigured)));
    assert!(view.messages().is_empty());
    assert!(!tmp.path().join("dinstar_messages.json").exists());
    assert!(view.draft_command("0697040852", 1234).is_none());
}

#[tokio::test]
async fn newest_first_after_two_sends() {
    let (_tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    let t = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();

    view.form.recipient = "111".into();
    view.form.message = "first".into();
    let first = view.send_at(t).await.unwrap();
    view.form.recipient = "222".into();
    view.form.message = "second".into();
    let second = view.send_at(t).await.unwrap();

    // Same millisecond still yields distinct, increasing ids
    assert_eq!(second.id, first.id + 1);
    let persisted = storage.load_messages().await.unwrap();
    assert_eq!(persisted, vec![second.clone(), first.clone()]);
    assert_eq!(view.messages(), &[second, first][..]);
}

#[tokio::test]
async fn reload_picks_up_external_writes() {
    let (_tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    let mut other = MessageView::open(storage.clone()).await.unwrap();
    other.form.recipient = "333".into();
    other.form.message = "from another console".into();
    other.send().await.unwrap();

    assert!(view.messages().is_empty());
    assert_eq!(view.reload().await.unwrap(), 1);
    assert_eq!(view.messages()[0].recipient.as_deref(), Some("333"));
}

#[tokio::test]
async fn corrupt_log_fails_reload_without_losing_list() {
    let (tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage).await.unwrap();
    view.form.recipient = "111".into();
    view.form.message = "kept".into();
    view.send().await.unwrap();

    std::fs::write(tmp.path().join("dinstar_messages.json"), "not json").unwrap();
    assert!(matches!(view.reload().await, Err(SmsError::Storage(_))));
    assert_eq!(view.messages().len(), 1);
}

#[tokio::test]
async fn draft_command_falls_back_to_sample_number() {
    let (_tmp, storage) = configured_storage(2).await;
    let mut view = MessageView::open(storage).await.unwrap();
    let cmd = view.draft_command("0697040852", 1234).unwrap();
    assert!(cmd.contains(r#""number":"0697040852""#));
    assert!(cmd.contains(r#""port":[2]"#));
    assert!(cmd.ends_with("http://10.0.0.9:8081/api/send_sms"));
    view.form.recipient = "0681234567".into();
    let cmd = view.draft_command("0697040852", 1234).unwrap();
    assert!(cmd.contains(r#""number":"0681234567""#));
}

#[tokio::test]
async fn control_only_message_is_rejected() {
    let (_tmp, storage) = configured_storage(0).await;
    let mut view = MessageView::open(storage.clone()).await.unwrap();
    view.form.recipient = "111".into();
    view.form.message = "first".into();
    view.send().await.unwrap();

    // Sanitizing strips both characters, leaving nothing to send
    view.form.recipient = "111".into();
    view.form.message = "\u{7}\u{1b}".into();
    assert!(matches!(
        view.send().await,
        Err(SmsError::MissingRecipientOrMessage)
    ));
    assert_eq!(view.messages().len(), 1);
    let persisted = storage.load_messages().await.unwrap();
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].message, "first");
}
