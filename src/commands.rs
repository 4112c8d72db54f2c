//! Bot commands: help texts and tone switches.

use crate::bot::Data;
use crate::error::{BotError, Result};
use crate::tone::{Tone, ToneStore};

/// Context type for bot commands.
type Context<'a> = poise::Context<'a, Data, BotError>;

/// Prefix for text commands.
pub const COMMAND_PREFIX: &str = "/";

pub const START_TEXT: &str = "Olá! Sou seu assistente virtual. Aqui estão os comandos disponíveis:

/start - Iniciar o bot e ver lista de comandos
/help - Obter ajuda sobre como usar o bot
/serio - Mudar para um tom de resposta mais formal e direto
/divertido - Mudar para um tom de resposta mais leve e bem-humorado
/balanceado - Mudar para um tom de resposta equilibrado (padrão)

Basta digitar sua pergunta a qualquer momento para receber uma resposta!";

pub const HELP_TEXT: &str = "Use /start para ver todos os comandos disponíveis. Para fazer uma pergunta, apenas digite-a diretamente!";

/// A bot command, whether typed as text or invoked as a slash command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    SetTone(Tone),
}

impl BotCommand {
    /// Parses a `/name` text command. Anything after the name is ignored.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim_start().strip_prefix(COMMAND_PREFIX)?;
        let name = rest.split(char::is_whitespace).next().unwrap_or_default();
        if name.eq_ignore_ascii_case("start") {
            Some(BotCommand::Start)
        } else if name.eq_ignore_ascii_case("help") {
            Some(BotCommand::Help)
        } else {
            name.parse::<Tone>().ok().map(BotCommand::SetTone)
        }
    }

    /// Runs the command for `chat_id` and returns the reply text.
    pub fn execute(self, tones: &ToneStore, chat_id: u64) -> &'static str {
        match self {
            BotCommand::Start => START_TEXT,
            BotCommand::Help => HELP_TEXT,
            BotCommand::SetTone(tone) => {
                tones.set_tone(chat_id, tone);
                tone.confirmation()
            }
        }
    }
}

async fn run_command(ctx: Context<'_>, command: BotCommand) -> Result<()> {
    let reply = command.execute(&ctx.data().tones, ctx.channel_id().get());
    ctx.say(reply).await?;
    Ok(())
}

/// Start the bot and list the available commands.
#[poise::command(slash_command)]
pub async fn start(ctx: Context<'_>) -> Result<()> {
    run_command(ctx, BotCommand::Start).await
}

/// Get help on how to use the bot.
#[poise::command(slash_command)]
pub async fn help(ctx: Context<'_>) -> Result<()> {
    run_command(ctx, BotCommand::Help).await
}

/// Switch to a formal and direct tone.
#[poise::command(slash_command)]
pub async fn serio(ctx: Context<'_>) -> Result<()> {
    run_command(ctx, BotCommand::SetTone(Tone::Serious)).await
}

/// Switch to a light and humorous tone.
#[poise::command(slash_command)]
pub async fn divertido(ctx: Context<'_>) -> Result<()> {
    run_command(ctx, BotCommand::SetTone(Tone::Playful)).await
}

/// Switch to a balanced tone (default).
#[poise::command(slash_command)]
pub async fn balanceado(ctx: Context<'_>) -> Result<()> {
    run_command(ctx, BotCommand::SetTone(Tone::Balanced)).await
}

/// Get all bot commands.
#[must_use]
pub fn bot_commands() -> Vec<poise::Command<Data, BotError>> {
    vec![start(), help(), serio(), divertido(), balanceado()]
}
