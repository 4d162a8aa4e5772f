// Dweve Cypher Fluent - Immutable Cypher query builder
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String escaping and identifier validation for text that is inlined
//! into a query.
//!
//! Parameters never pass through here; the server substitutes them. These
//! functions only matter for map literals written by CREATE and for the
//! identities checked by the START formatter.

use crate::config::QueryConfig;
use crate::error::{CypherError, Result};
use std::borrow::Cow;
use unicode_normalization::UnicodeNormalization;

/// Validate an inlined string against the configured length limit.
///
/// # Examples
///
/// ```
/// # use cypher_fluent::cypher::validate_string_length;
/// # use cypher_fluent::QueryConfig;
/// let config = QueryConfig::default().with_max_string_length(8);
/// assert!(validate_string_length("short", "name", &config).is_ok());
/// assert!(validate_string_length("far too long", "name", &config).is_err());
/// ```
pub fn validate_string_length(s: &str, property: &str, config: &QueryConfig) -> Result<()> {
    if let Some(max_length) = config.max_string_length {
        let length = s.len();
        if length > max_length {
            return Err(CypherError::StringLengthExceeded {
                length,
                max_length,
                property: property.to_string(),
            });
        }
    }
    Ok(())
}

/// The escape sequence for `c`, if it cannot appear raw inside a
/// single-quoted literal.
#[inline]
fn escape_sequence(c: char) -> Option<&'static str> {
    Some(match c {
        '\\' => r"\\",
        '\'' => r"\'",
        '"' => r#"\""#,
        '\n' => r"\n",
        '\r' => r"\r",
        '\t' => r"\t",
        '\0' => r"\u0000",
        _ => return None,
    })
}

/// Escape a string value for a single-quoted Cypher literal.
///
/// Returns `Cow::Borrowed` when nothing needs escaping.
///
/// ```
/// # use cypher_fluent::cypher::escape_string;
/// assert!(matches!(escape_string("plain"), std::borrow::Cow::Borrowed(_)));
/// assert_eq!(escape_string("it's"), "it\\'s");
/// ```
pub fn escape_string(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(|c| escape_sequence(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut escaped = String::with_capacity(s.len() + 8);
    escaped.push_str(&s[..first]);
    for c in s[first..].chars() {
        match escape_sequence(c) {
            Some(sequence) => escaped.push_str(sequence),
            None => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Quote a string value for Cypher with single quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Check if a string is a valid, unquoted Cypher identifier.
///
/// Valid identifiers start with an ASCII letter or underscore and contain
/// only ASCII letters, digits and underscores.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Validate and return a Cypher identifier, or error if invalid.
pub fn validate_identifier(s: &str) -> Result<&str> {
    if is_valid_identifier(s) {
        Ok(s)
    } else {
        Err(CypherError::InvalidIdentifier(s.to_string()))
    }
}

/// Normalize a string to NFC form.
pub fn normalize_unicode(s: &str) -> String {
    s.nfc().collect()
}

/// Control, zero-width and bidi formatting characters.
fn is_dangerous_unicode(c: char) -> bool {
    c.is_control()
        || matches!(
            c,
            '\u{200B}'
                | '\u{200C}'
                | '\u{200D}'
                | '\u{FEFF}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2066}'..='\u{2069}'
                | '\u{00AD}'
                | '\u{061C}'
                | '\u{180E}'
        )
}

/// Check that a property key or index name can be written into a query as
/// given.
///
/// Keys holding control, zero-width or bidi formatting characters, or that
/// are not in NFC form, are rejected: they render identically to some other
/// key, or not at all.
///
/// ```
/// # use cypher_fluent::cypher::validate_property_key;
/// assert!(validate_property_key("first name").is_ok());
/// assert!(validate_property_key("na\u{200B}me").is_err());
/// assert!(validate_property_key("cafe\u{0301}").is_err());
/// ```
pub fn validate_property_key(s: &str) -> Result<&str> {
    if s.chars().any(is_dangerous_unicode) || normalize_unicode(s) != s {
        Err(CypherError::InvalidIdentifier(s.escape_default().to_string()))
    } else {
        Ok(s)
    }
}

/// Escape a map key or identifier, wrapping it in backticks if needed.
///
/// The key itself is never altered, so distinct keys always escape to
/// distinct text. Use [`validate_property_key`] first to refuse keys with
/// invisible characters.
///
/// ```
/// # use cypher_fluent::cypher::escape_identifier;
/// assert_eq!(escape_identifier("name"), "name");
/// assert_eq!(escape_identifier("first name"), "`first name`");
/// assert_eq!(escape_identifier("start"), "`start`");
/// ```
pub fn escape_identifier(s: &str) -> String {
    if is_valid_identifier(s) && !is_cypher_keyword(s) {
        s.to_string()
    } else {
        format!("`{}`", s.replace('`', "``"))
    }
}

/// Reserved words of the Cypher 1.x dialect, sorted for binary search.
const RESERVED_WORDS: &[&str] = &[
    "ALL", "AND", "ANY", "AS", "ASC", "BY", "CREATE", "DELETE", "DESC", "DISTINCT", "FALSE",
    "FOREACH", "IN", "IS", "LIMIT", "MATCH", "NODE", "NONE", "NOT", "NULL", "OR", "ORDER",
    "RELATE", "RELATIONSHIP", "RETURN", "SET", "SINGLE", "SKIP", "START", "TRUE", "UNIQUE",
    "WHERE", "WITH", "XOR",
];

fn is_cypher_keyword(s: &str) -> bool {
    RESERVED_WORDS
        .binary_search(&s.to_ascii_uppercase().as_str())
        .is_ok()
}
