// font-magician/src/family_name.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A value for the `font-family` CSS property.

use cssparser::{Parser, ParserInput, Token};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};

/// A normalized font family name.
///
/// Surrounding quotes are stripped on construction, so `"Open Sans"` and `Open Sans` name the
/// same family. Comparison is otherwise exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FamilyName(String);

impl FamilyName {
    /// Creates a family name, removing one level of matching single or double quotes.
    pub fn new(name: &str) -> FamilyName {
        FamilyName(unquote(name.trim()).to_owned())
    }

    /// Extracts the family that a `font-family` or `font` declaration asks for first.
    ///
    /// This is the last identifier or string of the first comma-separated item, so
    /// `bold 12px/1.5 "Open Sans", serif` yields `Open Sans`. Escapes are resolved, so
    /// `Open\ Sans` is a single name.
    pub fn first_in_value(value: &str) -> Option<FamilyName> {
        let mut input = ParserInput::new(value);
        let mut parser = Parser::new(&mut input);
        let mut family = None;
        while let Ok(token) = parser.next() {
            match *token {
                Token::Comma => break,
                Token::Ident(ref name) | Token::QuotedString(ref name) if !name.is_empty() => {
                    family = Some(FamilyName(name.to_string()));
                }
                _ => {}
            }
        }
        family
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders the name for a declaration value, quoting it only if it contains whitespace.
    pub fn to_css(&self) -> String {
        quote_if_spaced(&self.0)
    }
}

impl Display for FamilyName {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FamilyName {
    #[inline]
    fn from(name: &str) -> FamilyName {
        FamilyName::new(name)
    }
}

impl Borrow<str> for FamilyName {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for FamilyName {
    fn deserialize<D>(deserializer: D) -> Result<FamilyName, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(FamilyName::new(&name))
    }
}

/// Wraps `value` in double quotes if it contains whitespace.
pub(crate) fn quote_if_spaced(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        format!("\"{}\"", value)
    } else {
        value.to_owned()
    }
}

pub(crate) fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() > 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
