// Serialization tests for the transport-facing event and message DTOs

use std::path::PathBuf;

use voxscribe::{AudioUpload, NextAction, OutboundMessage, UserEvent};

#[test]
fn user_event_round_trips() {
    let event = UserEvent::SubmitAudio {
        upload: AudioUpload {
            path: PathBuf::from("/tmp/audio_42.ogg"),
            mime_type: Some("audio/ogg".to_string()),
            file_name: None,
            message_id: Some("42".to_string()),
        },
    };

    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"submit_audio\""));
    assert!(json.contains("audio/ogg"));

    let parsed: UserEvent = serde_json::from_str(&json).unwrap();
    match parsed {
        UserEvent::SubmitAudio { upload } => {
            assert_eq!(upload.message_id.as_deref(), Some("42"));
            assert_eq!(upload.mime_type.as_deref(), Some("audio/ogg"));
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn choose_language_carries_code() {
    let json = r#"{"type":"choose_language","code":"en-US"}"#;
    let event: UserEvent = serde_json::from_str(json).unwrap();
    assert!(matches!(event, UserEvent::ChooseLanguage { code } if code == "en-US"));
}

#[test]
fn outbound_message_serializes_next_action() {
    let msg = OutboundMessage::with_action("Recognized text:\nhello", NextAction::Enhance);

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("\"next_action\":\"enhance\""));

    let plain = OutboundMessage::plain("Couldn't recognize the text");
    let json = serde_json::to_string(&plain).unwrap();
    assert!(json.contains("\"next_action\":null"));
}
