/// Field named by an explicit `key: value` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TriggerKey {
    Crop,
    Province,
    System,
    Yield,
    Area,
}

impl TriggerKey {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "crop" => Some(Self::Crop),
            "province" => Some(Self::Province),
            "system" | "variety" => Some(Self::System),
            "yield" => Some(Self::Yield),
            "area" => Some(Self::Area),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Word,
    Number(f64),
    Unit,
    Key(TriggerKey),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) text: String,
    pub(crate) kind: TokenKind,
}

impl Token {
    pub(crate) fn lower(&self) -> String {
        self.text.to_ascii_lowercase()
    }

    pub(crate) fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }

    pub(crate) fn number(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Number(value) => Some(value),
            _ => None,
        }
    }
}

pub(crate) const UNITS: &[&str] = &[
    "mt", "t", "ton", "tons", "ha", "hectare", "hectares", "per", "/ha", "/hectare", "ha-1",
];

/// Units that mark a number as a field size rather than a yield.
pub(crate) const AREA_UNITS: &[&str] = &["ha", "hectare", "hectares"];

pub(crate) fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for raw in text.split_whitespace() {
        let piece = raw.trim_matches(|c| c == ',' || c == ';');
        if piece.is_empty() {
            continue;
        }

        if let Some((key, value)) = piece.split_once(':') {
            if let Some(key) = TriggerKey::parse(key) {
                tokens.push(Token {
                    text: piece[..piece.len() - value.len() - 1].to_string(),
                    kind: TokenKind::Key(key),
                });
                push_piece(&mut tokens, value);
                continue;
            }
        }

        push_piece(&mut tokens, piece);
    }

    tokens
}

/// Splits `mt/ha` into `mt` and `/ha`, and `5.2mt` into a number and a unit.
fn push_piece(tokens: &mut Vec<Token>, piece: &str) {
    let piece = piece.trim_matches(|c| c == ',' || c == ';' || c == ':');
    if piece.is_empty() {
        return;
    }

    if let Some(slash) = piece.find('/').filter(|index| *index > 0) {
        push_piece(tokens, &piece[..slash]);
        push_atom(tokens, &piece[slash..]);
        return;
    }

    let digits = piece
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(piece.len());
    if digits > 0 && digits < piece.len() && is_unit(&piece[digits..]) {
        push_atom(tokens, &piece[..digits]);
        push_atom(tokens, &piece[digits..]);
        return;
    }

    push_atom(tokens, piece);
}

fn push_atom(tokens: &mut Vec<Token>, atom: &str) {
    let kind = match atom.parse::<f64>() {
        Ok(value) if value.is_finite() => TokenKind::Number(value),
        _ if is_unit(atom) => TokenKind::Unit,
        _ => TokenKind::Word,
    };
    tokens.push(Token {
        text: atom.to_string(),
        kind,
    });
}

pub(crate) fn is_unit(value: &str) -> bool {
    UNITS.contains(&value.to_ascii_lowercase().as_str())
}
