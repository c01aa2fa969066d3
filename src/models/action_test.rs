use super::*;

#[test]
fn test_parse_plain_text() {
    assert_eq!(Action::parse(""), None);
    assert_eq!(Action::parse("   "), None);
    assert_eq!(
        Action::parse("  hello there "),
        Some(Action::Send("hello there".to_string()))
    );
}

#[test]
fn test_parse_conversation_commands() {
    assert_eq!(Action::parse("/new"), Some(Action::NewConversation(None)));
    assert_eq!(
        Action::parse("/new Trip plans"),
        Some(Action::NewConversation(Some("Trip plans".to_string())))
    );
    assert_eq!(Action::parse("/list"), Some(Action::ListConversations));
    assert_eq!(
        Action::parse("/switch abc"),
        Some(Action::SwitchConversation("abc".to_string()))
    );
    assert_eq!(
        Action::parse("/rename New title"),
        Some(Action::RenameConversation("New title".to_string()))
    );
    assert_eq!(Action::parse("/delete"), Some(Action::DeleteConversation(None)));
    assert_eq!(
        Action::parse("/rm abc"),
        Some(Action::DeleteConversation(Some("abc".to_string())))
    );
    assert_eq!(Action::parse("/show"), Some(Action::ShowConversation));
    assert_eq!(Action::parse("/quit"), Some(Action::Quit));
}

#[test]
fn test_parse_missing_arguments() {
    assert_eq!(
        Action::parse("/switch"),
        Some(Action::Unknown("/switch".to_string()))
    );
    assert_eq!(
        Action::parse("/attach -- hi"),
        Some(Action::Unknown("/attach -- hi".to_string()))
    );
    assert_eq!(
        Action::parse("/unknown"),
        Some(Action::Unknown("/unknown".to_string()))
    );
}

#[test]
fn test_parse_attach() {
    assert_eq!(
        Action::parse("/attach a.txt ./docs/b.pdf -- summarize these"),
        Some(Action::Attach {
            paths: vec!["a.txt".to_string(), "./docs/b.pdf".to_string()],
            text: "summarize these".to_string(),
        })
    );
    assert_eq!(
        Action::parse("/attach a.txt"),
        Some(Action::Attach {
            paths: vec!["a.txt".to_string()],
            text: String::new(),
        })
    );
}

#[test]
fn test_parse_attach_keeps_dashes_inside_names() {
    assert_eq!(
        Action::parse("/attach my--notes.txt -- hi -- there"),
        Some(Action::Attach {
            paths: vec!["my--notes.txt".to_string()],
            text: "hi -- there".to_string(),
        })
    );
    assert_eq!(
        Action::parse("/attach a--b.txt c.txt"),
        Some(Action::Attach {
            paths: vec!["a--b.txt".to_string(), "c.txt".to_string()],
            text: String::new(),
        })
    );
}
