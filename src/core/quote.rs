//! Token quoting for logfmt values

use serde::{Deserialize, Serialize};

/// How tokens with special characters are wrapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuoteStyle {
    /// Quote only tokens containing a space. Inner `"` become `__`.
    #[default]
    Lenient,
    /// Quote tokens containing space, tab, CR, LF or `"` as an escaped
    /// string literal.
    Strict,
}

impl QuoteStyle {
    /// Whether `token` would be wrapped in quotes
    pub fn needs_quotes(&self, token: &str) -> bool {
        match self {
            QuoteStyle::Lenient => token.contains(' '),
            QuoteStyle::Strict => token.contains([' ', '\t', '\n', '\r', '"']),
        }
    }

    /// Quote `token` if it needs it, otherwise return it unchanged.
    ///
    /// Quoting is not idempotent: an already quoted token is wrapped again.
    pub fn quote(&self, token: &str) -> String {
        if !self.needs_quotes(token) {
            return token.to_string();
        }
        match self {
            QuoteStyle::Lenient => format!("\"{}\"", token.replace('"', "__")),
            QuoteStyle::Strict => format!("{:?}", token),
        }
    }
}
