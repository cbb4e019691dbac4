use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::fs;
use std::sync::Mutex;
use teloxide::types::{ChatId, MessageId};
use tempfile::TempDir;

use modules_bot::bot::callback_handler::{handle_callback, Origin};
use modules_bot::bot::message_handler::handle_text;
use modules_bot::bot::ui_builder::{
    back_only_menu, main_menu, Markup, BACK_BUTTON, MENU_PROMPT, START_PROMPT, TRIGGER_CLEARED,
    TRIGGER_LABEL, UNKNOWN_SELECTION_NOTICE,
};
use modules_bot::catalog::Catalog;
use modules_bot::gateway::Gateway;
use modules_bot::images::{ImageStore, Photo};
use modules_bot::navigation::NavigationEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Text {
        chat_id: ChatId,
        text: String,
        markup: Option<Markup>,
    },
    Photo {
        chat_id: ChatId,
        file_name: String,
        caption: String,
        markup: Option<Markup>,
    },
    Delete {
        chat_id: ChatId,
        message_id: MessageId,
    },
    Answer(String),
}

/// Records every call instead of talking to Telegram
#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<Call>>,
    fail_deletes: bool,
    fail_answers: bool,
}

impl FakeGateway {
    fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    fn failing_answers() -> Self {
        Self {
            fail_answers: true,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn send_text(&self, chat_id: ChatId, text: &str, markup: Option<Markup>) -> Result<()> {
        self.record(Call::Text {
            chat_id,
            text: text.to_string(),
            markup,
        });
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: ChatId,
        photo: Photo,
        caption: &str,
        markup: Option<Markup>,
    ) -> Result<()> {
        self.record(Call::Photo {
            chat_id,
            file_name: photo.file_name,
            caption: caption.to_string(),
            markup,
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.record(Call::Delete {
            chat_id,
            message_id,
        });
        if self.fail_deletes {
            Err(anyhow!("Bad Request: message can't be deleted"))
        } else {
            Ok(())
        }
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.record(Call::Answer(callback_id.to_string()));
        if self.fail_answers {
            Err(anyhow!("Bad Request: query is too old and response timeout expired"))
        } else {
            Ok(())
        }
    }
}

const CHAT: ChatId = ChatId(42);

fn origin() -> Option<Origin> {
    Some(Origin {
        chat_id: CHAT,
        message_id: MessageId(7),
    })
}

fn main_menu_text(catalog: &Catalog, text: &str) -> Call {
    Call::Text {
        chat_id: CHAT,
        text: text.to_string(),
        markup: Some(Markup::Menu(main_menu(catalog))),
    }
}

fn setup() -> (FakeGateway, Catalog, TempDir) {
    let dir = TempDir::new().unwrap();
    (FakeGateway::default(), Catalog::builtin().unwrap(), dir)
}

#[tokio::test]
async fn test_start_command_sends_trigger_prompt() -> Result<()> {
    let (gateway, catalog, _dir) = setup();

    let event = handle_text(&gateway, &catalog, CHAT, "/start").await?;

    assert_eq!(event, Some(NavigationEvent::StartCommand));
    assert_eq!(
        gateway.calls(),
        vec![Call::Text {
            chat_id: CHAT,
            text: START_PROMPT.to_string(),
            markup: Some(Markup::TriggerPrompt(TRIGGER_LABEL.to_string())),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_start_command_repeats() -> Result<()> {
    let (gateway, catalog, _dir) = setup();

    handle_text(&gateway, &catalog, CHAT, "/start").await?;
    handle_text(&gateway, &catalog, CHAT, "Boshlash 🚀").await?;
    handle_text(&gateway, &catalog, CHAT, "/start").await?;

    let calls = gateway.calls();
    assert_eq!(calls.first(), calls.last());
    Ok(())
}

#[tokio::test]
async fn test_trigger_label_any_case_shows_main_menu() -> Result<()> {
    for label in ["Boshlash 🚀", "boshlash 🚀", "BOSHLASH 🚀"] {
        let (gateway, catalog, _dir) = setup();

        let event = handle_text(&gateway, &catalog, CHAT, label).await?;

        assert_eq!(event, Some(NavigationEvent::StartButtonPress));
        assert_eq!(
            gateway.calls(),
            vec![
                main_menu_text(&catalog, MENU_PROMPT),
                Call::Text {
                    chat_id: CHAT,
                    text: TRIGGER_CLEARED.to_string(),
                    markup: Some(Markup::RemoveTrigger),
                },
            ]
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_free_text_is_ignored() -> Result<()> {
    let (gateway, catalog, _dir) = setup();

    let event = handle_text(&gateway, &catalog, CHAT, "salom").await?;

    assert_eq!(event, None);
    assert!(gateway.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_module_with_image_sends_photo() -> Result<()> {
    let (gateway, catalog, dir) = setup();
    fs::write(dir.path().join("arduino.png"), b"\x89PNG\r\n\x1a\n")?;
    let images = ImageStore::new(dir.path());

    let event = handle_callback(&gateway, &catalog, &images, "cb-1", origin(), "Arduino").await?;

    assert_eq!(event, NavigationEvent::ModuleSelected("Arduino".to_string()));
    let arduino = catalog.lookup("Arduino").unwrap();
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Answer("cb-1".to_string()),
            Call::Delete {
                chat_id: CHAT,
                message_id: MessageId(7),
            },
            Call::Photo {
                chat_id: CHAT,
                file_name: "arduino.png".to_string(),
                caption: arduino.text.clone(),
                markup: Some(Markup::Menu(back_only_menu())),
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_module_without_image_sends_text() -> Result<()> {
    let (gateway, catalog, dir) = setup();
    let images = ImageStore::new(dir.path());

    handle_callback(&gateway, &catalog, &images, "cb-2", origin(), "Arduino").await?;

    let arduino = catalog.lookup("Arduino").unwrap();
    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[2],
        Call::Text {
            chat_id: CHAT,
            text: arduino.text.clone(),
            markup: Some(Markup::Menu(back_only_menu())),
        }
    );
    assert!(arduino.text.starts_with("🔵 Arduino haqida:"));
    Ok(())
}

#[tokio::test]
async fn test_back_shows_main_menu() -> Result<()> {
    let (gateway, catalog, dir) = setup();
    let images = ImageStore::new(dir.path());

    let event = handle_callback(&gateway, &catalog, &images, "cb-3", origin(), BACK_BUTTON).await?;

    assert_eq!(event, NavigationEvent::BackSelected);
    let calls = gateway.calls();
    assert_eq!(calls[0], Call::Answer("cb-3".to_string()));
    assert!(matches!(calls[1], Call::Delete { .. }));
    assert_eq!(calls[2], main_menu_text(&catalog, MENU_PROMPT));

    if let Call::Text {
        markup: Some(Markup::Menu(menu)),
        ..
    } = &calls[2]
    {
        assert!(!menu.has_back());
        assert!(menu.callback_ids().eq(catalog.names()));
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_selection_shows_notice_and_menu() -> Result<()> {
    let (gateway, catalog, dir) = setup();
    let images = ImageStore::new(dir.path());

    for data in ["", "arduino", "edit_0", "Orqaga", "IR  control"] {
        let gateway = FakeGateway::default();
        let event = handle_callback(&gateway, &catalog, &images, "cb", origin(), data).await?;

        assert_eq!(event, NavigationEvent::UnknownSelection(data.to_string()));
        assert_eq!(
            gateway.calls(),
            vec![
                Call::Answer("cb".to_string()),
                main_menu_text(&catalog, UNKNOWN_SELECTION_NOTICE),
            ]
        );
    }
    assert!(gateway.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_delete_failure_is_swallowed() -> Result<()> {
    let gateway = FakeGateway::failing_deletes();
    let catalog = Catalog::builtin()?;
    let images = ImageStore::new("/nonexistent");

    let event = handle_callback(&gateway, &catalog, &images, "cb", origin(), "LED").await?;

    assert_eq!(event, NavigationEvent::ModuleSelected("LED".to_string()));
    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[2], Call::Text { text, .. } if text.contains("Anod→220Ω→D13")));
    Ok(())
}

#[tokio::test]
async fn test_callback_without_message_is_only_answered() -> Result<()> {
    let (gateway, catalog, dir) = setup();
    let images = ImageStore::new(dir.path());

    let event = handle_callback(&gateway, &catalog, &images, "cb", None, "Servo").await?;

    assert_eq!(event, NavigationEvent::ModuleSelected("Servo".to_string()));
    assert_eq!(gateway.calls(), vec![Call::Answer("cb".to_string())]);
    Ok(())
}

#[tokio::test]
async fn test_expired_callback_still_gets_response() -> Result<()> {
    let catalog = Catalog::builtin()?;
    let images = ImageStore::new("/nonexistent");

    let gateway = FakeGateway::failing_answers();
    let event = handle_callback(&gateway, &catalog, &images, "cb", origin(), "old_v1_data").await?;
    assert_eq!(event, NavigationEvent::UnknownSelection("old_v1_data".to_string()));
    assert_eq!(
        gateway.calls(),
        vec![
            Call::Answer("cb".to_string()),
            main_menu_text(&catalog, UNKNOWN_SELECTION_NOTICE),
        ]
    );

    let gateway = FakeGateway::failing_answers();
    let event = handle_callback(&gateway, &catalog, &images, "cb", origin(), "LED").await?;
    assert_eq!(event, NavigationEvent::ModuleSelected("LED".to_string()));
    let calls = gateway.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[2], Call::Text { text, .. } if text.contains("Anod→220Ω→D13")));
    Ok(())
}
