//! Prompt construction for the generation API.

use crate::tone::Tone;

/// Phrase separating the tone instruction from the user's text.
pub const QUESTION_SEPARATOR: &str = " Pergunta do usuário: ";

/// Combines the tone instruction with the user's text.
pub fn build_prompt(tone: Tone, text: &str) -> String {
    format!("{}{QUESTION_SEPARATOR}{text}", tone.instruction())
}
