//! Token-by-token option string parsing.
//!
//! Parsing is best-effort: diagnostics accumulate in a [`ParseReport`] and
//! the pass always continues to the next token, so one invocation surfaces
//! every problem in the string.

use crate::options::OptionError;
use crate::registry::OptionRegistry;

/// Flags controlling a parse pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseFlags {
    /// Suppress echo of assignments and query output.
    pub no_echo: bool,
}

/// Diagnostics and echo output collected by one parse pass.
#[derive(Debug, Default)]
pub struct ParseReport {
    errors: Vec<String>,
    echoes: Vec<String>,
}

impl ParseReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic line.
    pub fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Record an echo line.
    pub fn echo(&mut self, line: String) {
        self.echoes.push(line);
    }

    /// Whether any diagnostic was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Recorded diagnostics in discovery order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Recorded echo lines in order.
    pub fn echoes(&self) -> &[String] {
        &self.echoes
    }
}

fn skip_spaces(s: &str) -> &str {
    s.trim_start()
}

fn skip_non_spaces(s: &str) -> &str {
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    &s[end..]
}

/// Parse a whitespace-delimited option string against the registry.
///
/// Per token: read the name (up to whitespace or `=`) and lowercase it,
/// consume an optional `=`, then dispatch:
///
/// - Unknown name: reported unless in skip mode. With an explicit `=`, the
///   following value token is discarded and parsing resynchronizes. Without
///   one, skip mode begins, discarding tokens until the next recognized
///   name. A bare unknown token's neighbor is ambiguous: in `a b c` with
///   `a` unknown, `b` could be `a`'s value or another option, so it can't
///   be trusted either way.
/// - Known name: a `?` at the value position queries the current value as a
///   `name=value` line. A keyword given `=` is an error and the value token
///   is discarded. Otherwise the option parses the remaining text; a parse
///   failure is reported and parsing resumes at the next token. The
///   consumed `name value` text is echoed verbatim.
///
/// Echo and query output are suppressed by [`ParseFlags::no_echo`].
pub fn parse_option_string(
    registry: &OptionRegistry,
    input: &str,
    flags: ParseFlags,
    report: &mut ParseReport,
) {
    let mut s = input;
    let mut skip = false;
    loop {
        s = skip_spaces(s);
        if s.is_empty() {
            return;
        }
        let token_start = s;

        // Option name, stopping at whitespace or '='.
        let name_len = s
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(s.len());
        let name = s[..name_len].to_ascii_lowercase();
        s = skip_spaces(&s[name_len..]);

        let mut equal_sign = false;
        if let Some(rest) = s.strip_prefix('=') {
            s = skip_spaces(rest);
            equal_sign = true;
        }

        let option = match registry.get(&name) {
            Ok(option) => option,
            Err(err) => {
                if !skip {
                    report.error(err.to_string());
                }
                if equal_sign {
                    s = skip_non_spaces(s);
                } else {
                    skip = true;
                }
                continue;
            }
        };
        skip = false;

        // A '?' at the value position queries the current value.
        if let Some(rest) = s.strip_prefix('?') {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                s = rest;
                if !flags.no_echo {
                    report.echo(format!("{}={}", name, option.format_value()));
                }
                continue;
            }
        }

        if option.is_keyword() && equal_sign {
            report.error(
                OptionError::KeywordWithValue { name }.to_string(),
            );
            s = skip_non_spaces(s);
            continue;
        }

        if let Err(err) = option.parse(&mut s) {
            report.error(err.to_string());
        }
        if !flags.no_echo {
            let consumed = token_start.len() - s.len();
            report.echo(token_start[..consumed].trim_end().to_string());
        }
    }
}
