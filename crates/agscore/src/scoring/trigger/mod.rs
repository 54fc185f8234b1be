//! Free-text `harvest score ...` commands.
//!
//! The grammar is a tokenizer followed by the ordered strategies in
//! [`rules::TRIGGER_RULES`]; every field of the result is optional.

mod rules;
mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rules::{ParseState, TRIGGER_RULES};
use tokenizer::tokenize;

const COMMAND: [&str; 2] = ["harvest", "score"];

/// Fields recovered from a trigger command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarvestTrigger {
    pub crop_type: Option<String>,
    pub province: Option<String>,
    pub projected_yield_per_ha: Option<f64>,
    pub area_size_ha: Option<f64>,
    pub system_or_variety: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerParseError {
    #[error("text is not a harvest score command")]
    NotATrigger,
    #[error("harvest score command has no arguments")]
    Empty,
}

/// Parser bound to the farming systems of a benchmark table.
#[derive(Debug, Clone, Default)]
pub struct TriggerParser {
    systems: Vec<String>,
}

impl TriggerParser {
    pub fn new<I, S>(systems: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut systems: Vec<String> = systems
            .into_iter()
            .map(Into::into)
            .filter(|system| !system.trim().is_empty())
            .collect();
        systems.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { systems }
    }

    pub fn parse(&self, text: &str) -> Result<HarvestTrigger, TriggerParseError> {
        let mut words = text.split_whitespace();
        for expected in COMMAND {
            match words.next() {
                Some(word) if word.eq_ignore_ascii_case(expected) => {}
                _ => return Err(TriggerParseError::NotATrigger),
            }
        }

        let arguments = words.collect::<Vec<_>>().join(" ");
        let tokens = tokenize(&arguments);
        if tokens.is_empty() {
            return Err(TriggerParseError::Empty);
        }

        let mut state = ParseState::new(tokens, &self.systems);
        for rule in TRIGGER_RULES {
            (rule.apply)(&mut state);
            debug!(rule = rule.name, "trigger rule applied");
        }

        Ok(state.trigger)
    }
}
