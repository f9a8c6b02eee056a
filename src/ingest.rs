use anyhow::{Context, Result};
use std::borrow::Cow;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// A named piece of text to analyze.
#[derive(Debug, Clone)]
pub struct Input {
    pub source: String,
    pub text: String,
}

/// Text bounded to a maximum number of whitespace-delimited tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedText<'a> {
    /// The original text, or the kept tokens joined by single spaces when truncated.
    pub text: Cow<'a, str>,
    pub tokens: Vec<&'a str>,
    pub total_tokens: usize,
    pub was_truncated: bool,
}

// Unicode whitespace plus the ASCII information separators U+001C..U+001F.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

pub fn split_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|token| !token.is_empty())
}

/// Split `raw` into tokens and keep at most `max_words` of them.
pub fn truncate(raw: &str, max_words: usize) -> BoundedText<'_> {
    let mut tokens: Vec<&str> = split_tokens(raw).collect();
    let total_tokens = tokens.len();

    if total_tokens <= max_words {
        return BoundedText {
            text: Cow::Borrowed(raw),
            tokens,
            total_tokens,
            was_truncated: false,
        };
    }

    tokens.truncate(max_words);
    BoundedText {
        text: Cow::Owned(tokens.join(" ")),
        tokens,
        total_tokens,
        was_truncated: true,
    }
}

fn decode(source: &str, bytes: Vec<u8>) -> Result<Input> {
    let text = String::from_utf8(bytes)
        .with_context(|| format!("Input '{}' is not valid UTF-8 text", source))?;
    Ok(Input {
        source: source.to_string(),
        text,
    })
}

pub fn read_file(path: &Path) -> Result<Input> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {:?}", path);
    }
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    info!(action = "read", component = "input_file", file_path = ?path, bytes = bytes.len(), "Read input file");
    decode(&path.display().to_string(), bytes)
}

pub fn read_stdin() -> Result<Input> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        anyhow::bail!("No input given. Pass text files, use --text, or pipe text on stdin");
    }
    let mut bytes = Vec::new();
    stdin
        .read_to_end(&mut bytes)
        .context("Failed to read stdin")?;
    info!(action = "read", component = "stdin", bytes = bytes.len(), "Read standard input");
    decode("<stdin>", bytes)
}

/// Collect every input named on the command line.
pub fn read_inputs(args: &crate::args::Args) -> Result<Vec<Input>> {
    let start_time = Instant::now();
    info!(action = "start", component = "input_loading", "Loading inputs");

    let inputs = if let Some(text) = &args.text {
        vec![Input {
            source: "<text>".to_string(),
            text: text.clone(),
        }]
    } else if args.inputs.is_empty() {
        vec![read_stdin()?]
    } else {
        args.inputs
            .iter()
            .map(|path| read_file(path))
            .collect::<Result<Vec<_>>>()?
    };

    info!(
        action = "complete",
        component = "input_loading",
        input_count = inputs.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Inputs loaded"
    );
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn short_input_is_returned_unchanged() {
        let raw = "  The cat\tsat.\n\nThe CAT sat!  ";
        let bounded = truncate(raw, 10);
        assert_eq!(bounded.tokens, vec!["The", "cat", "sat.", "The", "CAT", "sat!"]);
        assert_eq!(bounded.text, raw);
        assert!(matches!(bounded.text, Cow::Borrowed(_)));
        assert_eq!(bounded.total_tokens, 6);
        assert!(!bounded.was_truncated);
    }

    #[test]
    fn exactly_max_words_is_not_truncated() {
        let bounded = truncate("a b c", 3);
        assert_eq!(bounded.tokens.len(), 3);
        assert!(!bounded.was_truncated);
    }

    #[test]
    fn long_input_keeps_first_tokens_and_rejoins() {
        let bounded = truncate("one  two\nthree\tfour", 2);
        assert_eq!(bounded.tokens, vec!["one", "two"]);
        assert_eq!(bounded.text, "one two");
        assert_eq!(bounded.total_tokens, 4);
        assert!(bounded.was_truncated);
    }

    #[test]
    fn empty_and_blank_input() {
        for raw in ["", "   \n\t "] {
            let bounded = truncate(raw, 5);
            assert!(bounded.tokens.is_empty());
            assert!(!bounded.was_truncated);
            assert_eq!(bounded.text, raw);
        }
    }

    #[test]
    fn splits_on_unicode_and_separator_whitespace() {
        let raw = "alpha\u{00a0}beta\u{2003}gamma\u{1f}delta\u{3000}epsilon";
        let tokens: Vec<&str> = split_tokens(raw).collect();
        assert_eq!(tokens, vec!["alpha", "beta", "gamma", "delta", "epsilon"]);
    }

    #[test]
    fn truncates_large_input_to_max_words() {
        let mut raw = "a ".repeat(70_000);
        raw.push_str("z");
        let bounded = truncate(&raw, 70_000);
        assert_eq!(bounded.tokens.len(), 70_000);
        assert_eq!(bounded.total_tokens, 70_001);
        assert!(bounded.was_truncated);
        assert!(!bounded.tokens.contains(&"z"));
        assert!(!bounded.text.contains('z'));
    }

    #[test]
    fn read_file_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0x6f]).unwrap();
        let err = read_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn read_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn read_file_decodes_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "café au lait").unwrap();
        let input = read_file(file.path()).unwrap();
        assert_eq!(input.text, "café au lait");
        assert_eq!(input.source, file.path().display().to_string());
    }
}
