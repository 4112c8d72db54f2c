//! Decides which incoming messages are addressed to the bot.

use strum::Display;

/// Kind of chat a message arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ChatKind {
    /// One-to-one conversation with the bot
    Direct,
    /// Shared channel where the bot must be mentioned
    Group,
}

/// Text message as seen by the router, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: u64,
    pub kind: ChatKind,
    pub text: String,
}

/// Routing decision for an incoming message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Ignore silently
    Drop,
    /// Forward the cleaned text to the prompt builder
    Forward(String),
}

/// Routes a message given the mention tokens that address the bot.
///
/// Group messages must contain one of the mentions; the first occurrence of
/// the first token found is removed and the rest trimmed. The result may be
/// empty and is forwarded anyway.
pub fn route<S: AsRef<str>>(message: &IncomingMessage, mentions: &[S]) -> Route {
    match message.kind {
        ChatKind::Group => {
            let found = mentions
                .iter()
                .map(AsRef::<str>::as_ref)
                .find(|mention| !mention.is_empty() && message.text.contains(*mention));
            match found {
                Some(mention) => {
                    let stripped = message.text.replacen(mention, "", 1);
                    Route::Forward(stripped.trim().to_string())
                }
                None => Route::Drop,
            }
        }
        ChatKind::Direct => {
            if message.text.is_empty() {
                Route::Drop
            } else {
                Route::Forward(message.text.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(kind: ChatKind, text: &str) -> IncomingMessage {
        IncomingMessage {
            chat_id: 42,
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn group_without_mention_is_dropped() {
        assert_eq!(
            route(&message(ChatKind::Group, "hello all"), &["@bot"]),
            Route::Drop
        );
    }

    #[test]
    fn group_mention_is_stripped_and_trimmed() {
        assert_eq!(
            route(&message(ChatKind::Group, "@bot hello"), &["@bot"]),
            Route::Forward("hello".to_string())
        );
    }

    #[test]
    fn group_mention_only_strips_first_occurrence() {
        assert_eq!(
            route(&message(ChatKind::Group, "hey @bot who is @bot?"), &["@bot"]),
            Route::Forward("hey  who is @bot?".to_string())
        );
    }

    #[test]
    fn group_bare_mention_forwards_empty_text() {
        assert_eq!(
            route(&message(ChatKind::Group, "  @bot  "), &["@bot"]),
            Route::Forward(String::new())
        );
    }

    #[test]
    fn group_with_empty_mention_token_is_dropped() {
        assert_eq!(route(&message(ChatKind::Group, "hello"), &[""]), Route::Drop);
    }

    #[test]
    fn direct_text_is_forwarded_verbatim() {
        assert_eq!(
            route(&message(ChatKind::Direct, " Qual é a capital? "), &["@bot"]),
            Route::Forward(" Qual é a capital? ".to_string())
        );
    }

    #[test]
    fn direct_empty_text_is_dropped() {
        assert_eq!(route(&message(ChatKind::Direct, ""), &["@bot"]), Route::Drop);
    }

    #[test]
    fn nickname_mention_form_is_also_stripped() {
        let mentions = ["<@123>", "<@!123>"];
        assert_eq!(
            route(&message(ChatKind::Group, "<@!123> oi"), &mentions),
            Route::Forward("oi".to_string())
        );
        assert_eq!(
            route(&message(ChatKind::Group, "<@123> oi"), &mentions),
            Route::Forward("oi".to_string())
        );
        assert_eq!(
            route(&message(ChatKind::Group, "<@456> oi"), &mentions),
            Route::Drop
        );
    }
}
