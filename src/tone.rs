//! Response tones and the store holding the active one.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;
use strum::{Display, EnumIter, EnumString};

/// Style modifier prepended to every generated prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    /// Professional and friendly (default)
    #[default]
    #[strum(serialize = "balanceado")]
    Balanced,
    /// Formal and direct
    #[strum(serialize = "serio")]
    Serious,
    /// Light and humorous
    #[strum(serialize = "divertido")]
    Playful,
}

impl Tone {
    /// Instruction text sent ahead of the user's question.
    pub fn instruction(self) -> &'static str {
        match self {
            Tone::Balanced => {
                "Responda de forma equilibrada, combinando profissionalismo e cordialidade."
            }
            Tone::Serious => {
                "Responda de forma séria, formal e direta, sem brincadeiras ou linguagem casual."
            }
            Tone::Playful => {
                "Responda de forma divertida e bem-humorada, usando um tom leve e descontraído."
            }
        }
    }

    /// Reply sent after switching to this tone.
    pub fn confirmation(self) -> &'static str {
        match self {
            Tone::Balanced => "Modo balanceado ativado. Responderei de forma equilibrada.",
            Tone::Serious => "Modo sério ativado. Responderei de forma formal e direta.",
            Tone::Playful => {
                "Modo divertido ativado! Vou responder com mais humor e descontração! 😄"
            }
        }
    }
}

/// Whether a tone change applies to every chat or only the chat it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ToneScope {
    #[default]
    #[strum(serialize = "global")]
    Global,
    #[strum(serialize = "chat")]
    PerChat,
}

/// Holds the active tone, either process-wide or keyed by chat id.
#[derive(Debug, Default)]
pub struct ToneStore {
    scope: ToneScope,
    global: RwLock<Tone>,
    per_chat: RwLock<HashMap<u64, Tone>>,
}

impl ToneStore {
    pub fn new(scope: ToneScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    pub fn scope(&self) -> ToneScope {
        self.scope
    }

    pub fn set_tone(&self, chat_id: u64, tone: Tone) {
        debug!("Setting tone to {tone} (scope {}, chat {chat_id})", self.scope);
        match self.scope {
            ToneScope::Global => {
                *self.global.write().unwrap_or_else(PoisonError::into_inner) = tone;
            }
            ToneScope::PerChat => {
                self.per_chat
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(chat_id, tone);
            }
        }
    }

    pub fn tone(&self, chat_id: u64) -> Tone {
        match self.scope {
            ToneScope::Global => *self.global.read().unwrap_or_else(PoisonError::into_inner),
            ToneScope::PerChat => self
                .per_chat
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&chat_id)
                .copied()
                .unwrap_or_default(),
        }
    }

    pub fn instruction(&self, chat_id: u64) -> &'static str {
        self.tone(chat_id).instruction()
    }
}
