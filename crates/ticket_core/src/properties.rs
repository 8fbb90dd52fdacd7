//! Flat `key=value` properties codec.
//!
//! # Responsibility
//! - Parse and write the line-oriented properties format used for both the
//!   ticket data file and the application config file.
//!
//! # Invariants
//! - Entry order is insertion order; re-setting a key keeps its position.
//! - `parse(to_string(p))` yields the same entries as `p`.
//! - Parsing never panics; malformed escapes are reported with a line number.
//! - Files are read as ISO-8859-1 and written as ASCII, with `\uXXXX`
//!   escapes for everything else, so every byte sequence loads.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::Path;

pub type PropertiesResult<T> = Result<T, PropertiesError>;

#[derive(Debug)]
pub enum PropertiesError {
    Io(io::Error),
    Malformed { line: usize, message: String },
}

impl Display for PropertiesError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Malformed { line, message } => {
                write!(f, "malformed properties at line {line}: {message}")
            }
        }
    }
}

impl Error for PropertiesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for PropertiesError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Ordered string-to-string mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Inserts or replaces `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Parses properties text.
    ///
    /// # Errors
    /// - `Malformed` when a `\u` escape is truncated or not hexadecimal.
    pub fn parse(text: &str) -> PropertiesResult<Self> {
        let mut props = Self::new();
        let mut lines = text.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let first_line = index + 1;
            let trimmed = raw.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = String::from(trimmed);
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let key = unescape(key).map_err(|message| PropertiesError::Malformed {
                line: first_line,
                message,
            })?;
            let value = unescape(value).map_err(|message| PropertiesError::Malformed {
                line: first_line,
                message,
            })?;
            props.set(key, value);
        }

        Ok(props)
    }

    /// Renders the entries, preceded by `header` as a `#` comment when given.
    pub fn to_string_with_header(&self, header: Option<&str>) -> String {
        let mut out = String::new();
        if let Some(header) = header {
            for line in header.lines() {
                out.push('#');
                push_ascii(&mut out, line);
                out.push('\n');
            }
        }
        for (key, value) in &self.entries {
            out.push_str(&escape(key, true));
            out.push('=');
            out.push_str(&escape(value, false));
            out.push('\n');
        }
        out
    }

    /// Reads and parses a properties file, decoding bytes as ISO-8859-1.
    pub fn load(path: impl AsRef<Path>) -> PropertiesResult<Self> {
        let bytes = fs::read(path)?;
        let text: String = bytes.iter().map(|&byte| char::from(byte)).collect();
        Self::parse(&text)
    }

    /// Writes the entries to `path`, replacing any existing file.
    pub fn store(&self, path: impl AsRef<Path>, header: Option<&str>) -> PropertiesResult<()> {
        fs::write(path, self.to_string_with_header(header))?;
        Ok(())
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Splits a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (pos, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = pos;
                let rest = line[pos + 1..].trim_start_matches(is_blank);
                return (&line[..key_end], rest);
            }
            c if is_blank(c) => {
                key_end = pos;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    // Whitespace may be followed by an explicit separator.
    let rest = match rest.strip_prefix(['=', ':']) {
        Some(after) => after.trim_start_matches(is_blank),
        None => rest,
    };
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_utf16_unit(&mut chars)?;
                if (0xD800..0xDC00).contains(&unit) {
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(format!("unpaired surrogate `\\u{unit:04X}`"));
                    }
                    let low = read_utf16_unit(&mut chars)?;
                    let decoded = char::decode_utf16([unit, low])
                        .next()
                        .and_then(Result::ok)
                        .ok_or_else(|| format!("unpaired surrogate `\\u{unit:04X}`"))?;
                    out.push(decoded);
                } else {
                    let decoded = char::from_u32(u32::from(unit))
                        .ok_or_else(|| format!("unpaired surrogate `\\u{unit:04X}`"))?;
                    out.push(decoded);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_utf16_unit(chars: &mut std::str::Chars<'_>) -> Result<u16, String> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.chars().count() != 4 {
        return Err(format!("truncated unicode escape `\\u{hex}`"));
    }
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid unicode escape `\\u{hex}`"));
    }
    u16::from_str_radix(&hex, 16).map_err(|_| format!("invalid unicode escape `\\u{hex}`"))
}

fn push_ascii(out: &mut String, text: &str) {
    for c in text.chars() {
        push_ascii_char(out, c);
    }
}

fn push_ascii_char(out: &mut String, c: char) {
    if (' '..='~').contains(&c) {
        out.push(c);
        return;
    }
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        out.push_str(&format!("\\u{unit:04X}"));
    }
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for (pos, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || pos == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => push_ascii_char(&mut out, c),
        }
    }
    out
}
