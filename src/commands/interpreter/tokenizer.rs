//! Command line tokenizer
//!
//! Splits on whitespace; double or single quotes group words into one token
//! (`commit -m "first commit"`). Quotes inside a word are kept literally.

use anyhow::Context;

const TOKEN_REGEX: &str = r#""([^"]*)"|'([^']*)'|(\S+)"#;

pub fn tokenize(line: &str) -> anyhow::Result<Vec<String>> {
    let re = regex::Regex::new(TOKEN_REGEX)
        .with_context(|| format!("invalid token regex: {TOKEN_REGEX}"))?;

    re.captures_iter(line)
        .map(|caps| {
            if let Some(quoted) = caps.get(1).or_else(|| caps.get(2)) {
                return Ok(quoted.as_str().to_string());
            }

            let word = caps.get(3).map(|word| word.as_str()).unwrap_or_default();
            if word.starts_with('"') || word.starts_with('\'') {
                anyhow::bail!("unterminated quote in: {}", word);
            }

            Ok(word.to_string())
        })
        .collect()
}
