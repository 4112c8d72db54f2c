use std::env::{self, VarError};
use std::time::Duration;

use log::{debug, error, info};

use crate::error::{BotError, Result};
use crate::tone::ToneScope;

const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Mention token required in group chats. `None` means the bot's own
    /// `<@id>` mention, resolved once the gateway reports ready.
    pub bot_mention: Option<String>,
    pub generation_timeout: Duration,
    pub tone_scope: ToneScope,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| env::var(name))
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&'static str) -> std::result::Result<String, VarError>,
    {
        let required = |name: &'static str| -> Result<String> {
            let value = lookup(name).map_err(|source| {
                error!("Failed to load {name} from environment: {source}");
                BotError::EnvVar { name, source }
            })?;
            if value.trim().is_empty() {
                error!("{name} is set but empty");
                return Err(BotError::Config(format!("{name} must not be empty")));
            }
            Ok(value)
        };
        let optional = |name: &'static str| {
            lookup(name)
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let discord_token = required("DISCORD_TOKEN")?;
        let gemini_api_key = required("GEMINI_API_KEY")?;
        let gemini_model = required("GEMINI_MODEL")?;
        let bot_mention = optional("BOT_MENTION");

        let generation_timeout = match optional("GENERATION_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    BotError::Config(format!(
                        "GENERATION_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"
                    ))
                })?;
                if secs == 0 {
                    return Err(BotError::Config(
                        "GENERATION_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
        };

        let tone_scope = match optional("TONE_SCOPE") {
            Some(raw) => raw.parse::<ToneScope>().map_err(|_| {
                BotError::Config(format!(
                    "TONE_SCOPE must be 'global' or 'chat', got '{raw}'"
                ))
            })?,
            None => ToneScope::default(),
        };

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!(
            "Gemini API key length: {} characters",
            gemini_api_key.len()
        );
        debug!("Gemini model: {gemini_model}");
        debug!("Bot mention: {bot_mention:?}");
        debug!("Generation timeout: {generation_timeout:?}");
        debug!("Tone scope: {tone_scope}");

        Ok(Self {
            discord_token,
            gemini_api_key,
            gemini_model,
            bot_mention,
            generation_timeout,
            tone_scope,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        vars: &[(&'static str, &'static str)],
    ) -> impl Fn(&'static str) -> std::result::Result<String, VarError> {
        let vars: HashMap<&'static str, &'static str> = vars.iter().copied().collect();
        move |name| {
            vars.get(name)
                .map(|value| (*value).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DISCORD_TOKEN", "discord-token"),
        ("GEMINI_API_KEY", "gemini-key"),
        ("GEMINI_MODEL", "gemini-2.0-flash"),
    ];

    #[test]
    fn loads_required_values_with_defaults() -> Result<()> {
        let config = Config::from_lookup(lookup_from(&REQUIRED))?;
        assert_eq!(config.discord_token, "discord-token");
        assert_eq!(config.gemini_api_key, "gemini-key");
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.bot_mention, None);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.tone_scope, ToneScope::Global);
        Ok(())
    }

    #[test]
    fn reads_optional_values() -> Result<()> {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("BOT_MENTION", " @tonebot "),
            ("GENERATION_TIMEOUT_SECS", "5"),
            ("TONE_SCOPE", "chat"),
        ]);
        let config = Config::from_lookup(lookup_from(&vars))?;
        assert_eq!(config.bot_mention.as_deref(), Some("@tonebot"));
        assert_eq!(config.generation_timeout, Duration::from_secs(5));
        assert_eq!(config.tone_scope, ToneScope::PerChat);
        Ok(())
    }

    #[test]
    fn missing_required_value_fails_fast() {
        let err = Config::from_lookup(lookup_from(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(
            err,
            BotError::EnvVar {
                name: "GEMINI_MODEL",
                ..
            }
        ));
    }

    #[test]
    fn empty_required_value_is_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars[0] = ("DISCORD_TOKEN", "   ");
        let err = Config::from_lookup(lookup_from(&vars)).unwrap_err();
        assert!(matches!(err, BotError::Config(_)));
    }

    #[test]
    fn invalid_optional_values_are_rejected() {
        let invalid = [
            ("GENERATION_TIMEOUT_SECS", "soon"),
            ("GENERATION_TIMEOUT_SECS", "0"),
            ("TONE_SCOPE", "server"),
        ];
        for bad in invalid {
            let mut vars = REQUIRED.to_vec();
            vars.push(bad);
            assert!(
                matches!(
                    Config::from_lookup(lookup_from(&vars)),
                    Err(BotError::Config(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
