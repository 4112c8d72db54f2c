//! Message pipeline: pick command or chat, build the prompt, generate the reply.

use log::{debug, info};

use crate::commands::BotCommand;
use crate::generation::{TextGenerator, generate_reply};
use crate::prompt::build_prompt;
use crate::router::{IncomingMessage, Route, route};
use crate::tone::ToneStore;

/// What to do with an incoming text message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run a text command; never reaches the generator
    Command(BotCommand),
    /// Send this cleaned text to the generator
    Generate(String),
    /// Not addressed to the bot
    Drop,
}

/// Decides between command dispatch, generation and silence.
///
/// Commands are only recognised by their `/` prefix at the start of the
/// text, so a mention followed by a command name is ordinary chat.
pub fn decide<S: AsRef<str>>(message: &IncomingMessage, mentions: &[S]) -> Action {
    if let Some(command) = BotCommand::parse(&message.text) {
        return Action::Command(command);
    }

    match route(message, mentions) {
        Route::Forward(text) => Action::Generate(text),
        Route::Drop => {
            debug!(
                "Dropping {} message in chat {}",
                message.kind, message.chat_id
            );
            Action::Drop
        }
    }
}

/// Generates the reply for text already accepted by [`decide`].
pub async fn respond(
    message: &IncomingMessage,
    text: &str,
    tones: &ToneStore,
    generator: &dyn TextGenerator,
) -> String {
    info!(
        "User ({}) in {}: {}",
        message.chat_id, message.kind, message.text
    );

    let tone = tones.tone(message.chat_id);
    let prompt = build_prompt(tone, text);
    debug!("Built {tone} prompt: {prompt}");

    let reply = generate_reply(generator, &prompt).await;
    info!("Bot response: {reply}");
    reply
}
