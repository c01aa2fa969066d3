use super::*;
use crate::models::{CardBlock, MessageBlock};

#[test]
fn test_conversation_defaults() {
    let convo = Conversation::default();
    assert_eq!(convo.title(), "New Chat");
    assert!(convo.is_empty());
    assert!(!convo.id().is_empty());

    let convo = Conversation::new("Chat 2");
    assert_eq!(convo.title(), "Chat 2");
    assert_ne!(convo.id(), Conversation::default().id());
}

#[test]
fn test_append_message_keeps_order() {
    let mut convo = Conversation::default();
    convo.append_message(Message::new_user("first"));
    convo.append_message(Message::new_system("second"));
    convo.append_message(Message::new_user("third"));

    let texts = convo.messages().iter().map(|m| m.text()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(convo.last_message().map(|m| m.text()), Some("third"));
    assert_eq!(convo.len(), 3);
}

#[test]
fn test_conversation_file_blocks() {
    let block = |id: &str| FileBlock {
        id: id.to_string(),
        name: "a.txt".to_string(),
        mime: "text/plain".to_string(),
        url: format!("blob:parley/{id}"),
    };

    let convo = Conversation::default().with_messages(vec![
        Message::new_user("one").with_blocks(vec![block("1").into()]),
        Message::new_system("no blocks"),
        Message::new_user("two").with_blocks(vec![
            MessageBlock::Card(CardBlock::new("card")),
            block("2").into(),
            block("3").into(),
        ]),
    ]);

    let ids = convo.file_blocks().map(|b| b.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["1", "2", "3"]);
}
