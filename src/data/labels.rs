use std::collections::BTreeMap;
use std::iter::Peekable;
use std::path::Path;
use std::str::CharIndices;

use serde::Deserialize;

use super::error::{ArtifactError, Result};
use super::model::LabelDictionary;

const REQUIRED_KEYS: [&str; 4] = ["X_char", "Y_char", "X_label", "Y_label"];

/// JSON form of the mapping; serde rejects duplicate, unknown and
/// non-string entries.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonLabels {
    #[serde(rename = "X_char")]
    x_char: String,
    #[serde(rename = "Y_char")]
    y_char: String,
    #[serde(rename = "X_label")]
    x_label: String,
    #[serde(rename = "Y_label")]
    y_label: String,
}

impl From<JsonLabels> for LabelDictionary {
    fn from(j: JsonLabels) -> Self {
        LabelDictionary {
            x_char: j.x_char,
            y_char: j.y_char,
            x_label: j.x_label,
            y_label: j.y_label,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read `AxesLabels.txt`.
pub fn read_labels(path: &Path) -> Result<LabelDictionary> {
    let text = std::fs::read_to_string(path).map_err(|e| ArtifactError::from_io(path, e))?;
    parse_labels(&text, path)
}

/// Parse the axis-label mapping without evaluating it.
///
/// Accepted forms:
/// * a JSON object of strings: `{"X_char": "M", ...}`
/// * a dictionary literal of quoted strings: `{'X_char': 'M', ...}`
///
/// Anything else (bare names, calls, numbers, nested containers) is rejected.
pub fn parse_labels(text: &str, path: &Path) -> Result<LabelDictionary> {
    if let Ok(labels) = serde_json::from_str::<JsonLabels>(text) {
        return Ok(labels.into());
    }
    // Rejected JSON falls through; the literal scanner applies the same
    // key rules and reports the error.
    let entries = DictLiteral::new(text, path).parse()?;
    into_dictionary(entries, path)
}

fn into_dictionary(mut entries: BTreeMap<String, String>, path: &Path) -> Result<LabelDictionary> {
    if let Some(unknown) = entries.keys().find(|k| !REQUIRED_KEYS.contains(&k.as_str())) {
        return Err(ArtifactError::malformed(path, format!("unknown key '{unknown}'")));
    }
    let mut take = |key: &str| {
        entries
            .remove(key)
            .ok_or_else(|| ArtifactError::malformed(path, format!("missing key '{key}'")))
    };
    Ok(LabelDictionary {
        x_char: take("X_char")?,
        y_char: take("Y_char")?,
        x_label: take("X_label")?,
        y_label: take("Y_label")?,
    })
}

// ---------------------------------------------------------------------------
// Dictionary-literal scanner
// ---------------------------------------------------------------------------

/// Recognizes `{ 'key': 'value', ... }` with string literals only.
struct DictLiteral<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    path: &'a Path,
}

impl<'a> DictLiteral<'a> {
    fn new(text: &'a str, path: &'a Path) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
            path,
        }
    }

    fn parse(mut self) -> Result<BTreeMap<String, String>> {
        let mut entries = BTreeMap::new();
        self.expect('{')?;
        loop {
            self.skip_ws();
            if self.eat('}') {
                break;
            }
            let key = self.string()?;
            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.string()?;
            if entries.insert(key.clone(), value).is_some() {
                return Err(self.error(format!("duplicate key '{key}'")));
            }
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            self.expect('}')?;
            break;
        }
        self.skip_ws();
        if let Some(&(pos, _)) = self.chars.peek() {
            return Err(self.error(format!("unexpected content after mapping at byte {pos}")));
        }
        Ok(entries)
    }

    fn string(&mut self) -> Result<String> {
        let raw = self.eat('r') || self.eat('R');
        let quote = match self.chars.next() {
            Some((_, q @ ('\'' | '"'))) => q,
            Some((pos, _)) => return Err(self.unsupported(pos)),
            None => return Err(self.error("unexpected end of input")),
        };

        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => return Err(self.error("unterminated string literal")),
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, '\n')) => return Err(self.error("newline inside string literal")),
                Some((_, '\\')) => {
                    let Some((_, esc)) = self.chars.next() else {
                        return Err(self.error("unterminated string literal"));
                    };
                    if raw {
                        out.push('\\');
                        out.push(esc);
                        continue;
                    }
                    match esc {
                        '\\' | '\'' | '"' => out.push(esc),
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'a' => out.push('\u{07}'),
                        'b' => out.push('\u{08}'),
                        'f' => out.push('\u{0C}'),
                        'v' => out.push('\u{0B}'),
                        // Unknown escapes keep their backslash, so TeX survives.
                        other => {
                            out.push('\\');
                            out.push(other);
                        }
                    }
                }
                Some((_, c)) => out.push(c),
            }
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, want: char) -> bool {
        self.chars.next_if(|&(_, c)| c == want).is_some()
    }

    fn expect(&mut self, want: char) -> Result<()> {
        self.skip_ws();
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((pos, _)) => Err(self.unsupported(pos)),
            None => Err(self.error(format!("expected '{want}', found end of input"))),
        }
    }

    fn unsupported(&self, pos: usize) -> ArtifactError {
        let snippet: String = self.text[pos..].chars().take(16).collect();
        self.error(format!("unsupported content at byte {pos}: '{snippet}'"))
    }

    fn error(&self, reason: impl Into<String>) -> ArtifactError {
        ArtifactError::malformed(self.path, reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LabelDictionary> {
        parse_labels(text, Path::new("AxesLabels.txt"))
    }

    #[test]
    fn python_literal_with_tex() {
        let labels = parse(
            "{'X_label': 'Mass ($M_{\\oplus}$)', 'Y_label': 'Radius ($R_{\\oplus}$)', \
             'X_char': 'm', 'Y_char': 'r'}",
        )
        .unwrap();
        assert_eq!(labels.x_char, "m");
        assert_eq!(labels.y_char, "r");
        assert_eq!(labels.x_label, "Mass ($M_{\\oplus}$)");
    }

    #[test]
    fn json_object() {
        let labels = parse(
            r#"{"X_char": "M", "Y_char": "R", "X_label": "Mass", "Y_label": "Radius"}"#,
        )
        .unwrap();
        assert_eq!(labels.y_label, "Radius");
    }

    #[test]
    fn trailing_comma_and_double_quotes() {
        let labels =
            parse("{\"X_char\": 'a', 'Y_char': \"b\", 'X_label': 'A', 'Y_label': 'B',}\n").unwrap();
        assert_eq!(labels.x_char, "a");
    }

    #[test]
    fn code_is_rejected() {
        let err = parse("__import__('os').system('rm -rf /')").unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedArtifact { .. }));

        let err = parse("{'X_char': str(1), 'Y_char': 'r', 'X_label': 'a', 'Y_label': 'b'}")
            .unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedArtifact { .. }));
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert!(parse("{'X_char': 1, 'Y_char': 'r', 'X_label': 'a', 'Y_label': 'b'}").is_err());
        assert!(parse(r#"{"X_char": 1, "Y_char": "r", "X_label": "a", "Y_label": "b"}"#).is_err());
    }

    #[test]
    fn unknown_and_missing_keys_are_rejected() {
        assert!(parse("{'X_char': 'm', 'Y_char': 'r', 'X_label': 'a'}").is_err());
        assert!(parse(
            "{'X_char': 'm', 'Y_char': 'r', 'X_label': 'a', 'Y_label': 'b', 'Z': 'c'}"
        )
        .is_err());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        assert!(parse(
            "{'X_char': 'm', 'X_char': 'n', 'Y_char': 'r', 'X_label': 'a', 'Y_label': 'b'}"
        )
        .is_err());

        let err = parse(
            r#"{"X_char": "m", "X_char": "evil", "Y_char": "r", "X_label": "a", "Y_label": "b"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ArtifactError::MalformedArtifact { .. }));
    }

    #[test]
    fn json_unknown_key_is_rejected() {
        assert!(parse(
            r#"{"X_char": "m", "Y_char": "r", "X_label": "a", "Y_label": "b", "Z": "c"}"#
        )
        .is_err());
    }

    #[test]
    fn trailing_content_is_rejected() {
        assert!(parse(
            "{'X_char': 'm', 'Y_char': 'r', 'X_label': 'a', 'Y_label': 'b'}; print('x')"
        )
        .is_err());
    }
}
