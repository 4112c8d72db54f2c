//! Discord bot setup and event handling.

use log::{debug, error, info};
use poise::{
    Framework, FrameworkError, FrameworkOptions, PrefixFrameworkOptions, builtins,
    serenity_prelude::{
        ClientBuilder, Context, FullEvent, GatewayIntents, Message as SerenityMessage,
    },
};

use crate::chat::{Action, decide, respond};
use crate::commands::bot_commands;
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::gemini::GeminiClient;
use crate::generation::TextGenerator;
use crate::router::{ChatKind, IncomingMessage};
use crate::tone::ToneStore;

/// State shared by every command and event handler.
pub struct Data {
    pub tones: ToneStore,
    generator: Box<dyn TextGenerator>,
    mentions: Vec<String>,
}

/// Run the Discord bot.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing Gemini client");
    let generator = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.generation_timeout,
    )?;
    let tones = ToneStore::new(config.tone_scope);
    info!("Tone scope: {}", tones.scope());
    let configured_mention = config.bot_mention.clone();

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: bot_commands(),
            // Text commands are parsed by the event handler
            prefix_options: PrefixFrameworkOptions {
                prefix: None,
                mention_as_prefix: false,
                ..Default::default()
            },
            event_handler: |ctx, event, _framework, data| {
                Box::pin(event_handler(ctx, event, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot is ready and connected to Discord as {}", ready.user.name);
                debug!("Registering commands globally");
                builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully");

                let mentions = match configured_mention {
                    Some(mention) => vec![mention],
                    None => vec![
                        format!("<@{}>", ready.user.id),
                        format!("<@!{}>", ready.user.id),
                    ],
                };
                info!("Answering group messages that mention {mentions:?}");

                Ok(Data {
                    tones,
                    generator: Box::new(generator),
                    mentions,
                })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Connecting to Discord gateway");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

fn to_incoming(message: &SerenityMessage) -> IncomingMessage {
    let kind = if message.guild_id.is_some() {
        ChatKind::Group
    } else {
        ChatKind::Direct
    };

    IncomingMessage {
        chat_id: message.channel_id.get(),
        kind,
        text: message.content.clone(),
    }
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> Result<()> {
    let FullEvent::Message { new_message } = event else {
        return Ok(());
    };

    if new_message.author.bot {
        return Ok(());
    }

    let incoming = to_incoming(new_message);
    let reply = match decide(&incoming, &data.mentions) {
        Action::Command(command) => command
            .execute(&data.tones, incoming.chat_id)
            .to_string(),
        Action::Generate(text) => {
            if let Err(e) = new_message.channel_id.broadcast_typing(&ctx.http).await {
                debug!("Failed to broadcast typing indicator: {e}");
            }
            respond(&incoming, &text, &data.tones, data.generator.as_ref()).await
        }
        Action::Drop => return Ok(()),
    };

    new_message.reply(&ctx.http, &reply).await?;
    info!(
        "Replied to {} in channel {}",
        new_message.author.tag(),
        new_message.channel_id
    );

    Ok(())
}

/// Logs framework failures. Nothing is sent back to the chat.
async fn on_error(error: FrameworkError<'_, Data, BotError>) {
    match error {
        FrameworkError::Setup { error, .. } => {
            error!("Failed to set up the bot: {error}");
        }
        FrameworkError::EventHandler { error, event, .. } => {
            error!("Event {} caused error {error}", event.snake_case_name());
        }
        FrameworkError::Command { error, ctx, .. } => {
            error!("Command /{} caused error {error}", ctx.command().name);
        }
        other => {
            error!("Framework error: {other}");
        }
    }
}
