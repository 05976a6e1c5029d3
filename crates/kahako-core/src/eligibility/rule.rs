// Kahako Exclusion Rules
//
// A small selector-like predicate language that decides which surfaces the
// engine must leave alone. Two spellings are accepted and can be mixed:
//
//   - CSS-like simple selectors: `#search`, `.code-editor`, `[data-raw]`,
//     `[lang=en]`, with `,` meaning "or"
//   - condition expressions: `id == 'q'`, `class =~ 'code|mono'`,
//     `kind == rich_text`, `readonly`, combined with `and`, `or`, `not`
//     and parentheses
//
// Field values are compared case-insensitively. `=~` is a regular expression
// search, not an anchored match.

use regex::{Regex, RegexBuilder};

use crate::surface::SurfaceDescriptor;

/// Error parsing an exclusion rule
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleParseError {
    #[error("exclusion rule is empty")]
    Empty,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unexpected end of rule")]
    UnexpectedEnd,

    #[error("unterminated {0}")]
    Unterminated(&'static str),

    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    Comma,
    And,
    Or,
    Not,
    Eq,
    Match,
    Ident(String),
    StringLit(String),
    IdSelector(String),
    ClassSelector(String),
    AttrSelector { key: String, value: Option<String> },
}

#[derive(Debug, Clone)]
enum RuleExpr {
    And(Box<RuleExpr>, Box<RuleExpr>),
    Or(Box<RuleExpr>, Box<RuleExpr>),
    Not(Box<RuleExpr>),
    /// Field is present (attributes) or true (flags)
    Present(String),
    Equals(String, String),
    Matches(String, Regex),
    HasClass(String),
}

/// A compiled exclusion rule
#[derive(Debug, Clone)]
pub struct ExclusionRule {
    source: String,
    expr: RuleExpr,
}

impl ExclusionRule {
    /// Compile a rule string
    pub fn parse(source: &str) -> Result<Self, RuleParseError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(RuleParseError::Empty);
        }
        let tokens = tokenize(trimmed)?;
        let expr = Parser::new(tokens).parse()?;
        Ok(Self {
            source: trimmed.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the surface is excluded by this rule
    pub fn matches(&self, desc: &SurfaceDescriptor) -> bool {
        eval(&self.expr, desc)
    }
}

impl PartialEq for ExclusionRule {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<RuleExpr, RuleParseError> {
        let expr = self.parse_list()?;
        match self.next() {
            None => Ok(expr),
            Some(tok) => Err(RuleParseError::UnexpectedToken(describe(&tok))),
        }
    }

    // Selector lists bind loosest: `a and b, c` is `(a and b) or c`.
    fn parse_list(&mut self) -> Result<RuleExpr, RuleParseError> {
        let mut left = self.parse_or()?;
        while matches!(self.peek(), Some(Token::Comma)) {
            self.next();
            let right = self.parse_or()?;
            left = RuleExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<RuleExpr, RuleParseError> {
        let mut left = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.next();
            let right = self.parse_and()?;
            left = RuleExpr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<RuleExpr, RuleParseError> {
        let mut left = self.parse_not()?;
        loop {
            match self.peek() {
                Some(Token::And) => {
                    self.next();
                }
                // Compound selectors like `.a.b` or `#x[lang]` are implicit conjunctions.
                Some(Token::IdSelector(_))
                | Some(Token::ClassSelector(_))
                | Some(Token::AttrSelector { .. }) => {}
                _ => break,
            }
            let right = self.parse_not()?;
            left = RuleExpr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<RuleExpr, RuleParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.next();
            let inner = self.parse_not()?;
            return Ok(RuleExpr::Not(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<RuleExpr, RuleParseError> {
        match self.next().ok_or(RuleParseError::UnexpectedEnd)? {
            Token::LParen => {
                let expr = self.parse_list()?;
                match self.next() {
                    Some(Token::RParen) => Ok(expr),
                    Some(tok) => Err(RuleParseError::UnexpectedToken(describe(&tok))),
                    None => Err(RuleParseError::Unterminated("parenthesis")),
                }
            }
            Token::IdSelector(id) => Ok(RuleExpr::Equals("id".into(), id)),
            Token::ClassSelector(class) => Ok(RuleExpr::HasClass(class)),
            Token::AttrSelector { key, value: None } => Ok(RuleExpr::Present(key)),
            Token::AttrSelector {
                key,
                value: Some(value),
            } => Ok(RuleExpr::Equals(key, value)),
            Token::Ident(field) => self.parse_predicate(field),
            tok => Err(RuleParseError::UnexpectedToken(describe(&tok))),
        }
    }

    fn parse_predicate(&mut self, field: String) -> Result<RuleExpr, RuleParseError> {
        let field = field.to_lowercase();
        match self.peek() {
            Some(Token::Eq) => {
                self.next();
                let value = self.parse_value()?;
                Ok(RuleExpr::Equals(field, value))
            }
            Some(Token::Match) => {
                self.next();
                let pattern = self.parse_value()?;
                let regex = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| RuleParseError::InvalidPattern {
                        pattern: pattern.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(RuleExpr::Matches(field, regex))
            }
            _ => Ok(RuleExpr::Present(field)),
        }
    }

    fn parse_value(&mut self) -> Result<String, RuleParseError> {
        match self.next().ok_or(RuleParseError::UnexpectedEnd)? {
            Token::StringLit(s) | Token::Ident(s) => Ok(s),
            tok => Err(RuleParseError::UnexpectedToken(describe(&tok))),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }
}

fn describe(tok: &Token) -> String {
    match tok {
        Token::LParen => "(".into(),
        Token::RParen => ")".into(),
        Token::Comma => ",".into(),
        Token::And => "and".into(),
        Token::Or => "or".into(),
        Token::Not => "not".into(),
        Token::Eq => "==".into(),
        Token::Match => "=~".into(),
        Token::Ident(s) => s.clone(),
        Token::StringLit(s) => format!("'{}'", s),
        Token::IdSelector(s) => format!("#{}", s),
        Token::ClassSelector(s) => format!(".{}", s),
        Token::AttrSelector { key, value: None } => format!("[{}]", key),
        Token::AttrSelector {
            key,
            value: Some(v),
        } => format!("[{}={}]", key, v),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == ':'
}

fn read_name(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && is_name_char(chars[*i]) {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

fn read_quoted(chars: &[char], i: &mut usize) -> Result<String, RuleParseError> {
    let quote = chars[*i];
    *i += 1;
    let start = *i;
    while *i < chars.len() && chars[*i] != quote {
        *i += 1;
    }
    if *i >= chars.len() {
        return Err(RuleParseError::Unterminated("string"));
    }
    let value: String = chars[start..*i].iter().collect();
    *i += 1;
    Ok(value)
}

fn tokenize(rule: &str) -> Result<Vec<Token>, RuleParseError> {
    let chars: Vec<char> = rule.chars().collect();
    let mut i = 0usize;
    let mut out = Vec::new();

    while i < chars.len() {
        let ch = chars[i];
        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        match ch {
            '(' => {
                out.push(Token::LParen);
                i += 1;
            }
            ')' => {
                out.push(Token::RParen);
                i += 1;
            }
            ',' => {
                out.push(Token::Comma);
                i += 1;
            }
            '!' => {
                out.push(Token::Not);
                i += 1;
            }
            '=' => {
                match chars.get(i + 1) {
                    Some('=') => out.push(Token::Eq),
                    Some('~') => out.push(Token::Match),
                    Some(c) => return Err(RuleParseError::UnexpectedToken(format!("={}", c))),
                    None => return Err(RuleParseError::UnexpectedEnd),
                }
                i += 2;
            }
            '\'' | '"' => {
                let value = read_quoted(&chars, &mut i)?;
                out.push(Token::StringLit(value));
            }
            '#' | '.' => {
                i += 1;
                let name = read_name(&chars, &mut i);
                if name.is_empty() {
                    return Err(RuleParseError::UnexpectedToken(ch.to_string()));
                }
                out.push(if ch == '#' {
                    Token::IdSelector(name)
                } else {
                    Token::ClassSelector(name)
                });
            }
            '[' => {
                i += 1;
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                let key = read_name(&chars, &mut i).to_lowercase();
                if key.is_empty() {
                    return Err(RuleParseError::UnexpectedToken("[".into()));
                }
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                let value = if chars.get(i) == Some(&'=') {
                    i += 1;
                    while i < chars.len() && chars[i].is_whitespace() {
                        i += 1;
                    }
                    match chars.get(i) {
                        Some('\'') | Some('"') => Some(read_quoted(&chars, &mut i)?),
                        Some(_) => Some(read_name(&chars, &mut i)),
                        None => return Err(RuleParseError::Unterminated("attribute selector")),
                    }
                } else {
                    None
                };
                while i < chars.len() && chars[i].is_whitespace() {
                    i += 1;
                }
                if chars.get(i) != Some(&']') {
                    return Err(RuleParseError::Unterminated("attribute selector"));
                }
                i += 1;
                out.push(Token::AttrSelector { key, value });
            }
            _ => {
                let word = read_name(&chars, &mut i);
                if word.is_empty() {
                    return Err(RuleParseError::UnexpectedToken(ch.to_string()));
                }
                // Dotted field paths like `attr.lang`
                let mut word = word;
                while chars.get(i) == Some(&'.') {
                    i += 1;
                    word.push('.');
                    word.push_str(&read_name(&chars, &mut i));
                }
                match word.to_lowercase().as_str() {
                    "and" => out.push(Token::And),
                    "or" => out.push(Token::Or),
                    "not" => out.push(Token::Not),
                    _ => out.push(Token::Ident(word)),
                }
            }
        }
    }

    Ok(out)
}

fn eval(expr: &RuleExpr, desc: &SurfaceDescriptor) -> bool {
    match expr {
        RuleExpr::And(l, r) => eval(l, desc) && eval(r, desc),
        RuleExpr::Or(l, r) => eval(l, desc) || eval(r, desc),
        RuleExpr::Not(inner) => !eval(inner, desc),
        RuleExpr::Present(field) => eval_present(field, desc),
        RuleExpr::Equals(field, expected) => {
            if field == "class" {
                return has_class(desc, expected);
            }
            field_value(field, desc)
                .map(|v| v.eq_ignore_ascii_case(expected))
                .unwrap_or(false)
        }
        RuleExpr::Matches(field, regex) => {
            if field == "class" {
                return desc.classes.iter().any(|c| regex.is_match(c));
            }
            field_value(field, desc)
                .map(|v| regex.is_match(&v))
                .unwrap_or(false)
        }
        RuleExpr::HasClass(class) => has_class(desc, class),
    }
}

fn has_class(desc: &SurfaceDescriptor, class: &str) -> bool {
    desc.classes.iter().any(|c| c.eq_ignore_ascii_case(class))
}

fn eval_present(field: &str, desc: &SurfaceDescriptor) -> bool {
    match field {
        "readonly" | "read_only" => desc.read_only,
        "disabled" => desc.disabled,
        _ => field_value(field, desc).is_some(),
    }
}

fn field_value(field: &str, desc: &SurfaceDescriptor) -> Option<String> {
    let field = field.strip_prefix("attr.").unwrap_or(field);
    match field {
        "kind" => Some(desc.kind.to_string()),
        "readonly" | "read_only" => Some(desc.read_only.to_string()),
        "disabled" => Some(desc.disabled.to_string()),
        _ => desc.attribute(field),
    }
}
