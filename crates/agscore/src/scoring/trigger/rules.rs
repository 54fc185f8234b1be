//! Extraction strategies applied in order to a tokenized trigger. Each rule
//! only fills fields that are still empty and only reads unclaimed tokens.

use super::tokenizer::{Token, TokenKind, TriggerKey, AREA_UNITS};
use super::HarvestTrigger;
use crate::scoring::crops::{canonical_crop_name, is_crop_alias, normalize_key};

/// Words that never belong to a crop or province name.
const STOP_WORDS: &[&str] = &["score", "for", "in", "at", "of", "with", "area", "harvest"];

pub(crate) struct ParseState<'a> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) claimed: Vec<bool>,
    pub(crate) systems: &'a [String],
    pub(crate) trigger: HarvestTrigger,
}

impl<'a> ParseState<'a> {
    pub(crate) fn new(tokens: Vec<Token>, systems: &'a [String]) -> Self {
        let claimed = vec![false; tokens.len()];
        Self {
            tokens,
            claimed,
            systems,
            trigger: HarvestTrigger::default(),
        }
    }

    fn is_free(&self, index: usize) -> bool {
        !self.claimed.get(index).copied().unwrap_or(true)
    }

    fn claim(&mut self, index: usize) {
        if let Some(slot) = self.claimed.get_mut(index) {
            *slot = true;
        }
    }

    /// Claims unit tokens directly after `index`.
    fn claim_units_after(&mut self, index: usize) {
        let mut next = index + 1;
        while next < self.tokens.len() && self.tokens[next].kind == TokenKind::Unit {
            self.claim(next);
            next += 1;
        }
    }

    fn preceded_by_area(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|previous| self.tokens.get(previous))
            .map(|token| token.is_word() && token.lower() == "area")
            .unwrap_or(false)
    }

    fn followed_by_hectares(&self, index: usize) -> bool {
        self.tokens
            .get(index + 1)
            .map(|token| AREA_UNITS.contains(&token.lower().as_str()))
            .unwrap_or(false)
    }

    fn free_numbers(&self) -> Vec<(usize, f64)> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(index, _)| self.is_free(*index))
            .filter_map(|(index, token)| token.number().map(|value| (index, value)))
            .collect()
    }
}

pub(crate) struct TriggerRule {
    pub(crate) name: &'static str,
    pub(crate) apply: fn(&mut ParseState<'_>),
}

pub(crate) const TRIGGER_RULES: &[TriggerRule] = &[
    TriggerRule {
        name: "explicit keys",
        apply: explicit_keys,
    },
    TriggerRule {
        name: "known system",
        apply: known_system,
    },
    TriggerRule {
        name: "projected yield",
        apply: projected_yield,
    },
    TriggerRule {
        name: "area size",
        apply: area_size,
    },
    TriggerRule {
        name: "crop and province",
        apply: crop_and_province,
    },
];

/// `crop: palay`, `province: nueva ecija`, `system: irrigated`, `yield: 5.2`, `area: 2`.
fn explicit_keys(state: &mut ParseState<'_>) {
    let mut index = 0;
    while index < state.tokens.len() {
        let TokenKind::Key(key) = state.tokens[index].kind else {
            index += 1;
            continue;
        };
        state.claim(index);
        let mut next = index + 1;

        match key {
            TriggerKey::Yield | TriggerKey::Area => {
                if let Some(value) = state.tokens.get(next).and_then(Token::number) {
                    state.claim(next);
                    state.claim_units_after(next);
                    let slot = if key == TriggerKey::Yield {
                        &mut state.trigger.projected_yield_per_ha
                    } else {
                        &mut state.trigger.area_size_ha
                    };
                    slot.get_or_insert(value);
                    next += 1;
                }
            }
            TriggerKey::Crop | TriggerKey::Province | TriggerKey::System => {
                let mut words = Vec::new();
                while next < state.tokens.len() && state.tokens[next].is_word() {
                    words.push(state.tokens[next].text.clone());
                    state.claim(next);
                    next += 1;
                }
                if !words.is_empty() {
                    let value = words.join(" ");
                    match key {
                        TriggerKey::Crop => {
                            state
                                .trigger
                                .crop_type
                                .get_or_insert_with(|| canonical_crop_name(&value));
                        }
                        TriggerKey::Province => {
                            state.trigger.province.get_or_insert(value);
                        }
                        _ => {
                            state.trigger.system_or_variety.get_or_insert(value);
                        }
                    }
                }
            }
        }

        index = next;
    }
}

/// Whole-word match against the benchmark systems, longest first.
fn known_system(state: &mut ParseState<'_>) {
    if state.trigger.system_or_variety.is_some() {
        return;
    }

    for system in state.systems {
        let words: Vec<String> = normalize_key(system)
            .split(' ')
            .map(str::to_string)
            .collect();
        if words.is_empty() || words.len() > state.tokens.len() {
            continue;
        }

        let found = (0..=state.tokens.len() - words.len()).find(|start| {
            words.iter().enumerate().all(|(offset, word)| {
                let index = start + offset;
                state.is_free(index)
                    && state.tokens[index].is_word()
                    && state.tokens[index].lower() == *word
            })
        });

        if let Some(start) = found {
            for index in start..start + words.len() {
                state.claim(index);
            }
            state.trigger.system_or_variety = Some(system.clone());
            return;
        }
    }
}

/// First free number not introduced by `area`, with any trailing units.
/// A hectare suffix does not disqualify it: `5.5 ha` alone is a yield.
fn projected_yield(state: &mut ParseState<'_>) {
    if state.trigger.projected_yield_per_ha.is_some() {
        return;
    }

    let numbers = state.free_numbers();
    let chosen = numbers
        .iter()
        .find(|(index, _)| !state.preceded_by_area(*index))
        .copied();
    if let Some((index, value)) = chosen {
        state.claim(index);
        state.claim_units_after(index);
        state.trigger.projected_yield_per_ha = Some(value);
    }
}

/// A number left after the yield, preceded by `area` or followed by a
/// hectare unit.
fn area_size(state: &mut ParseState<'_>) {
    if state.trigger.area_size_ha.is_some() {
        return;
    }

    let numbers = state.free_numbers();
    let chosen = numbers
        .iter()
        .find(|(index, _)| state.preceded_by_area(*index) || state.followed_by_hectares(*index))
        .copied();
    if let Some((index, value)) = chosen {
        state.claim(index);
        state.claim_units_after(index);
        if index > 0 && state.tokens[index - 1].lower() == "area" {
            state.claim(index - 1);
        }
        state.trigger.area_size_ha = Some(value);
    }
}

/// Leftover words: the first is the crop, the rest the province.
fn crop_and_province(state: &mut ParseState<'_>) {
    let mut words: Vec<String> = Vec::new();
    for index in 0..state.tokens.len() {
        if !state.is_free(index) || !state.tokens[index].is_word() {
            continue;
        }
        let lower = state.tokens[index].lower();
        if STOP_WORDS.contains(&lower.as_str()) {
            continue;
        }
        words.push(state.tokens[index].text.clone());
        state.claim(index);
    }

    let mut remaining = words.into_iter();
    if state.trigger.crop_type.is_none() {
        if let Some(first) = remaining.next() {
            state.trigger.crop_type = Some(canonical_crop_name(&first));
        }
    }

    if state.trigger.province.is_some() {
        return;
    }

    let crop_words: Vec<String> = state
        .trigger
        .crop_type
        .as_deref()
        .map(|crop| {
            normalize_key(crop)
                .split(|c: char| !c.is_alphanumeric())
                .filter(|word| !word.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let province_words: Vec<String> = remaining
        .skip_while(|word| {
            let key = normalize_key(word.trim_matches(|c: char| !c.is_alphanumeric()));
            is_crop_alias(&key) || crop_words.contains(&key)
        })
        .collect();
    if !province_words.is_empty() {
        state.trigger.province = Some(province_words.join(" "));
    }
}
