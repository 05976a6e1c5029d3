// Kahako Input Layer - Key Sequence Scripts
// Parses scripts like "`a{bs}{Alt-e}{compose}ka{/compose}" into keystrokes

use std::fmt;

use crate::modifier::ModifierKey;

/// One physical action in a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keystroke {
    /// A typed character; `'\n'` for Enter
    Char(char),
    Backspace,
    Delete,
    /// A key pressed with Ctrl and/or Alt held
    Chord { key: char, ctrl: bool, alt: bool },
    Paste(String),
    CompositionStart,
    CompositionEnd,
    /// Focus moved away and back, or the caret was clicked elsewhere
    Focus,
    Left,
    Right,
}

/// Errors that can occur while parsing a script
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeySeqParseError {
    #[error("unterminated '{{' at position {0}")]
    Unterminated(usize),

    #[error("empty '{{}}' at position {0}")]
    EmptyToken(usize),

    #[error("unknown token: '{0}'")]
    UnknownToken(String),

    #[error("unknown modifier: '{0}'")]
    UnknownModifier(String),

    #[error("chord cannot end with hyphen: '{0}'")]
    TrailingHyphen(String),

    #[error("chord key must be a single character: '{0}'")]
    InvalidChordKey(String),

    #[error("chord needs Ctrl or Alt: '{0}'")]
    ChordWithoutModifier(String),

    #[error("{{/compose}} without a matching {{compose}}")]
    UnbalancedComposition,
}

/// Parse a key-sequence script.
///
/// Plain characters are typed as-is. Braces hold named keys:
///
/// - `{bs}` `{backspace}` `{del}` `{delete}`
/// - `{enter}` `{space}` `{tab}` `{left}` `{right}`
/// - `{focus}` (alias `{click}`)
/// - `{compose}` / `{/compose}` around IME-composed text
/// - `{paste:text}`, where `}}` stands for a `}` inside the text
/// - `{lbrace}` `{rbrace}` for literal braces
/// - chords such as `{Alt-a}`, `{C-A-e}`, `{Opt-Shift-o}`, `{alt-'}`;
///   the keys `{`, `}` and `-` are spelled `lbrace`, `rbrace` and `hyphen`
pub fn parse_key_sequence(script: &str) -> Result<Vec<Keystroke>, KeySeqParseError> {
    let chars: Vec<char> = script.chars().collect();
    let mut out = Vec::new();
    let mut composing = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '{' {
            out.push(Keystroke::Char(c));
            i += 1;
            continue;
        }

        let start = i;
        let (token, next) = read_token(&chars, start).ok_or(KeySeqParseError::Unterminated(start))?;
        i = next;

        if token.is_empty() {
            return Err(KeySeqParseError::EmptyToken(start));
        }

        let stroke = parse_token(&token)?;
        match stroke {
            Keystroke::CompositionStart => composing = true,
            Keystroke::CompositionEnd if !composing => {
                return Err(KeySeqParseError::UnbalancedComposition)
            }
            Keystroke::CompositionEnd => composing = false,
            _ => {}
        }
        out.push(stroke);
    }

    Ok(out)
}

/// Text between the `{` at `start` and its closing `}`, and the position
/// after the close
fn read_token(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut token = String::new();
    let mut i = start + 1;
    while let Some(&c) = chars.get(i) {
        if c == '}' {
            if token.starts_with(PASTE_PREFIX) && chars.get(i + 1) == Some(&'}') {
                token.push('}');
                i += 2;
                continue;
            }
            return Some((token, i + 1));
        }
        token.push(c);
        i += 1;
    }
    None
}

const PASTE_PREFIX: &str = "paste:";

/// Chord keys that would otherwise clash with the script syntax
const CHORD_KEY_NAMES: [(&str, char); 4] = [
    ("lbrace", '{'),
    ("rbrace", '}'),
    ("hyphen", '-'),
    ("minus", '-'),
];

fn chord_key_name(key: char) -> Option<&'static str> {
    CHORD_KEY_NAMES
        .iter()
        .find(|(_, k)| *k == key)
        .map(|(name, _)| *name)
}

fn parse_token(token: &str) -> Result<Keystroke, KeySeqParseError> {
    if let Some(text) = token.strip_prefix(PASTE_PREFIX) {
        return Ok(Keystroke::Paste(text.to_string()));
    }

    let named = match token.to_ascii_lowercase().as_str() {
        "bs" | "backspace" => Some(Keystroke::Backspace),
        "del" | "delete" => Some(Keystroke::Delete),
        "enter" | "return" => Some(Keystroke::Char('\n')),
        "space" => Some(Keystroke::Char(' ')),
        "tab" => Some(Keystroke::Char('\t')),
        "left" => Some(Keystroke::Left),
        "right" => Some(Keystroke::Right),
        "focus" | "click" => Some(Keystroke::Focus),
        "compose" => Some(Keystroke::CompositionStart),
        "/compose" => Some(Keystroke::CompositionEnd),
        "lbrace" => Some(Keystroke::Char('{')),
        "rbrace" => Some(Keystroke::Char('}')),
        _ => None,
    };
    if let Some(stroke) = named {
        return Ok(stroke);
    }

    if token.contains('-') {
        return parse_chord(token);
    }
    Err(KeySeqParseError::UnknownToken(token.to_string()))
}

/// Parse `Mod-Mod-key`; the last part is the key, as in combo strings
fn parse_chord(token: &str) -> Result<Keystroke, KeySeqParseError> {
    if token.ends_with('-') {
        return Err(KeySeqParseError::TrailingHyphen(token.to_string()));
    }

    let parts: Vec<&str> = token.split('-').collect();
    let Some((key_str, modifiers)) = parts.split_last() else {
        return Err(KeySeqParseError::UnknownToken(token.to_string()));
    };

    let mut key_chars = key_str.chars();
    let key = match (key_chars.next(), key_chars.next()) {
        (Some(k), None) => k,
        _ => CHORD_KEY_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key_str))
            .map(|(_, k)| *k)
            .ok_or_else(|| KeySeqParseError::InvalidChordKey(key_str.to_string()))?,
    };

    let (mut ctrl, mut alt, mut shift) = (false, false, false);
    for m in modifiers {
        match ModifierKey::from_alias(m) {
            Some(ModifierKey::Ctrl) => ctrl = true,
            Some(ModifierKey::Alt) => alt = true,
            Some(ModifierKey::Shift) => shift = true,
            None => return Err(KeySeqParseError::UnknownModifier(m.to_string())),
        }
    }
    if !ctrl && !alt {
        return Err(KeySeqParseError::ChordWithoutModifier(token.to_string()));
    }

    let key = if shift { key.to_ascii_uppercase() } else { key };
    Ok(Keystroke::Chord { key, ctrl, alt })
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keystroke::Char('\n') => write!(f, "{{enter}}"),
            Keystroke::Char(' ') => write!(f, "{{space}}"),
            Keystroke::Char('\t') => write!(f, "{{tab}}"),
            Keystroke::Char('{') => write!(f, "{{lbrace}}"),
            Keystroke::Char('}') => write!(f, "{{rbrace}}"),
            Keystroke::Char(c) => write!(f, "{}", c),
            Keystroke::Backspace => write!(f, "{{bs}}"),
            Keystroke::Delete => write!(f, "{{del}}"),
            Keystroke::Chord { key, ctrl, alt } => {
                write!(f, "{{")?;
                if *ctrl {
                    write!(f, "{}-", ModifierKey::Ctrl.name())?;
                }
                if *alt {
                    write!(f, "{}-", ModifierKey::Alt.name())?;
                }
                match chord_key_name(*key) {
                    Some(name) => write!(f, "{}}}", name),
                    None => write!(f, "{}}}", key),
                }
            }
            Keystroke::Paste(text) => write!(f, "{{{}{}}}", PASTE_PREFIX, text.replace('}', "}}")),
            Keystroke::CompositionStart => write!(f, "{{compose}}"),
            Keystroke::CompositionEnd => write!(f, "{{/compose}}"),
            Keystroke::Focus => write!(f, "{{focus}}"),
            Keystroke::Left => write!(f, "{{left}}"),
            Keystroke::Right => write!(f, "{{right}}"),
        }
    }
}
