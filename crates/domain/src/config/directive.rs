//! Parser for the Corefile-style stanza the rewriter is configured with:
//!
//! ```text
//! a2cname example.com. *.corp.example. {
//!     target_suffix -via-9.shark-perch.ts.net
//!     upstream 100.100.100.100:53
//! }
//! ```
//!
//! Arguments after the plugin name are zones. Properties take exactly one
//! argument on the same line. A block may also sit on one line, as in
//! `a2cname example.com. { upstream 1.1.1.1:53 }`. `#` starts a comment.

use super::errors::ConfigError;
use super::plugin::PluginConfig;

pub const PLUGIN_NAME: &str = "a2cname";

impl PluginConfig {
    pub fn from_directive(text: &str) -> Result<Self, ConfigError> {
        let mut config = PluginConfig::default();
        let mut in_block = false;

        for (index, line) in tokenize(text).into_iter().enumerate() {
            let line_no = index + 1;
            let Some((first, rest)) = line.split_first() else {
                continue;
            };

            let body = if in_block {
                line.as_slice()
            } else {
                if *first != PLUGIN_NAME {
                    return Err(ConfigError::Parse(format!(
                        "line {}: expected '{}', found '{}'",
                        line_no, PLUGIN_NAME, first
                    )));
                }

                let (zones, body) = match rest.iter().position(|token| *token == "{") {
                    Some(open) => (&rest[..open], Some(&rest[open + 1..])),
                    None => (rest, None),
                };
                if zones.iter().any(|token| *token == "}") {
                    return Err(ConfigError::Parse(format!(
                        "line {}: unexpected brace in zone list",
                        line_no
                    )));
                }
                if !zones.is_empty() {
                    config.zones = zones.iter().map(|zone| zone.to_string()).collect();
                }

                match body {
                    Some(body) => body,
                    None => continue,
                }
            };

            in_block = !apply_block_line(&mut config, body, line_no)?;
        }

        if in_block {
            return Err(ConfigError::Parse(
                "unexpected end of input, missing '}'".to_string(),
            ));
        }

        config.normalized()
    }
}

/// Applies one line of a block and reports whether it closed the block.
fn apply_block_line(
    config: &mut PluginConfig,
    tokens: &[&str],
    line_no: usize,
) -> Result<bool, ConfigError> {
    let (tokens, closes_block) = match tokens.iter().position(|token| *token == "}") {
        Some(close) if close + 1 == tokens.len() => (&tokens[..close], true),
        Some(_) => {
            return Err(ConfigError::Parse(format!(
                "line {}: unexpected input after '}}'",
                line_no
            )))
        }
        None => (tokens, false),
    };
    if tokens.iter().any(|token| *token == "{") {
        return Err(ConfigError::Parse(format!(
            "line {}: nested blocks are not supported",
            line_no
        )));
    }

    if let Some((property, args)) = tokens.split_first() {
        apply_property(config, property, args)?;
    }
    Ok(closes_block)
}

fn apply_property(
    config: &mut PluginConfig,
    property: &str,
    args: &[&str],
) -> Result<(), ConfigError> {
    let slot = match property {
        "target_suffix" => &mut config.target_suffix,
        "upstream" => &mut config.upstream,
        other => return Err(ConfigError::UnknownProperty(other.to_string())),
    };

    match args {
        [] => Err(ConfigError::MissingArgument(property.to_string())),
        [value] => {
            *slot = value.to_string();
            Ok(())
        }
        _ => Err(ConfigError::Validation(format!(
            "'{}' takes exactly one argument, got {}",
            property,
            args.len()
        ))),
    }
}

/// Splits input into lines of tokens, with braces as standalone tokens and
/// comments removed. Blank lines are kept so line numbers stay meaningful.
fn tokenize(text: &str) -> Vec<Vec<&str>> {
    text.lines()
        .map(|line| {
            let line = line.split('#').next().unwrap_or_default();
            let mut tokens = Vec::new();
            for word in line.split_whitespace() {
                split_braces(word, &mut tokens);
            }
            tokens
        })
        .collect()
}

fn split_braces<'a>(word: &'a str, tokens: &mut Vec<&'a str>) {
    let mut start = 0;
    for (index, ch) in word.char_indices() {
        if ch == '{' || ch == '}' {
            if start < index {
                tokens.push(&word[start..index]);
            }
            tokens.push(&word[index..index + 1]);
            start = index + 1;
        }
    }
    if start < word.len() {
        tokens.push(&word[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_attached_braces() {
        let lines = tokenize("a2cname example.com.{\n upstream 1.1.1.1:53}");
        assert_eq!(lines[0], vec!["a2cname", "example.com.", "{"]);
        assert_eq!(lines[1], vec!["upstream", "1.1.1.1:53", "}"]);
    }

    #[test]
    fn test_tokenize_strips_comments() {
        let lines = tokenize("a2cname example.com. # trailing\n# whole line");
        assert_eq!(lines[0], vec!["a2cname", "example.com."]);
        assert!(lines[1].is_empty());
    }
}
