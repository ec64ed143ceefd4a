//! Search query classification.
//!
//! A user types either a carrier-prefixed flight code (`AI188`, `ba 2490`)
//! or a bare flight number (`188`). [`SearchQuery`] decides which one it is
//! and carries the exact value the provider should receive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Maximum number of records requested from the provider per search.
pub const RESULT_LIMIT: u32 = 30;

/// Provider parameter carrying a code query.
pub const CODE_PARAM: &str = "flight_iata";

/// Provider parameter carrying a number query.
pub const NUMBER_PARAM: &str = "flight_number";

/// How a query is sent to the provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum QueryKind {
    /// Carrier code followed by a number, uppercased (e.g. `AI188`).
    Code(String),
    /// Anything else, trimmed but otherwise untouched (e.g. `188`).
    Number(String),
}

/// A validated, classified search.
///
/// # Examples
///
/// ```
/// use flighttrack_models::{QueryKind, SearchQuery};
///
/// let q = SearchQuery::parse("  ai188 ").unwrap();
/// assert_eq!(q.kind(), &QueryKind::Code("AI188".into()));
///
/// let q: SearchQuery = "188".parse().unwrap();
/// assert_eq!(q.param(), ("flight_number", "188"));
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    kind: QueryKind,
}

impl SearchQuery {
    /// Trim, validate and classify raw user input.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyQuery);
        }

        let kind = if looks_like_code(trimmed) {
            QueryKind::Code(trimmed.to_uppercase())
        } else {
            QueryKind::Number(trimmed.to_string())
        };

        Ok(Self { kind })
    }

    /// The classification of this query.
    pub fn kind(&self) -> &QueryKind {
        &self.kind
    }

    /// `true` for a carrier-code query.
    pub fn is_code(&self) -> bool {
        matches!(self.kind, QueryKind::Code(_))
    }

    /// The value sent to the provider.
    pub fn value(&self) -> &str {
        match &self.kind {
            QueryKind::Code(v) | QueryKind::Number(v) => v,
        }
    }

    /// The single discriminating `(name, value)` parameter for the provider.
    pub fn param(&self) -> (&'static str, &str) {
        match &self.kind {
            QueryKind::Code(v) => (CODE_PARAM, v),
            QueryKind::Number(v) => (NUMBER_PARAM, v),
        }
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SearchQuery {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 1–3 ASCII letters immediately followed by an ASCII digit.
fn looks_like_code(s: &str) -> bool {
    let letters = s.chars().take_while(char::is_ascii_alphabetic).count();
    (1..=3).contains(&letters) && s.chars().nth(letters).is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_query_is_uppercased() {
        for (input, expected) in [
            ("AI188", "AI188"),
            ("ai188", "AI188"),
            ("  ba2490  ", "BA2490"),
            ("u21", "U21"),
            ("Afr1a b", "AFR1A B"),
        ] {
            let q = SearchQuery::parse(input).unwrap();
            assert_eq!(q.kind(), &QueryKind::Code(expected.into()), "input {input:?}");
            assert_eq!(q.param(), (CODE_PARAM, expected));
        }
    }

    #[test]
    fn other_input_is_number_query() {
        for (input, expected) in [
            ("188", "188"),
            (" 188 ", "188"),
            ("abcd12", "abcd12"),
            ("AI 188", "AI 188"),
            ("1ai", "1ai"),
            ("ai", "ai"),
        ] {
            let q = SearchQuery::parse(input).unwrap();
            assert_eq!(q.kind(), &QueryKind::Number(expected.into()), "input {input:?}");
            assert_eq!(q.param(), (NUMBER_PARAM, expected));
            assert!(!q.is_code());
        }
    }

    #[test]
    fn empty_query_is_rejected() {
        assert_eq!(SearchQuery::parse(""), Err(ModelError::EmptyQuery));
        assert_eq!(SearchQuery::parse(" \t\n "), Err(ModelError::EmptyQuery));
    }

    #[test]
    fn non_ascii_letters_do_not_form_a_code() {
        let q = SearchQuery::parse("é1").unwrap();
        assert!(!q.is_code());
    }

    #[test]
    fn from_str_matches_parse() {
        let q: SearchQuery = "ai188".parse().unwrap();
        assert_eq!(q.to_string(), "AI188");
        assert!("   ".parse::<SearchQuery>().is_err());
    }
}
