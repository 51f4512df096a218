// font-magician/src/properties.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Properties that identify one face of a family: e.g. style, weight, and stretchiness.
//!
//! Much of the documentation in this modules comes from the CSS 3 Fonts specification:
//! https://drafts.csswg.org/css-fonts-3/

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Properties that identify one face of a family: style, weight, and stretchiness.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Properties {
    /// The font style, as defined in CSS.
    pub style: Style,
    /// The font weight, as defined in CSS.
    pub weight: Weight,
    /// The `font-stretch` value, if one was requested. Catalogs do not index by stretch, so
    /// this is passed through to the generated rule untouched.
    pub stretch: Option<String>,
}

impl Properties {
    /// Initializes a property set to its default values: normal style, normal weight, and no
    /// stretch.
    #[inline]
    pub fn new() -> Properties {
        Properties::default()
    }

    /// Parses a variant key of the form `weight[ style[ stretch]]`, e.g. `400 italic`.
    ///
    /// The style is `italic` if the second token is `italic` and `normal` otherwise.
    /// Returns `None` if the weight is not numeric.
    pub fn from_variant_key(key: &str) -> Option<Properties> {
        let mut tokens = key.split_whitespace();
        let weight = tokens.next()?.parse().ok()?;
        let style = match tokens.next() {
            Some("italic") => Style::Italic,
            _ => Style::Normal,
        };
        Some(Properties {
            style,
            weight,
            stretch: tokens.next().map(str::to_owned),
        })
    }

    /// Sets the value of the style property and returns this property set for method chaining.
    #[inline]
    pub fn style(&mut self, style: Style) -> &mut Properties {
        self.style = style;
        self
    }

    /// Sets the value of the weight property and returns this property set for method chaining.
    #[inline]
    pub fn weight(&mut self, weight: Weight) -> &mut Properties {
        self.weight = weight;
        self
    }

    /// Sets the value of the stretch property and returns this property set for method chaining.
    #[inline]
    pub fn stretch(&mut self, stretch: &str) -> &mut Properties {
        self.stretch = Some(stretch.to_owned());
        self
    }
}

/// Allows italic or oblique faces to be selected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// A face that is neither italic not obliqued.
    Normal,
    /// A form that is generally cursive in nature.
    Italic,
    /// A typically-sloped version of the regular face.
    Oblique,
}

impl Style {
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Normal => "normal",
            Style::Italic => "italic",
            Style::Oblique => "oblique",
        }
    }
}

impl Default for Style {
    fn default() -> Style {
        Style::Normal
    }
}

impl Display for Style {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = ();

    fn from_str(value: &str) -> Result<Style, ()> {
        match value {
            "normal" => Ok(Style::Normal),
            "italic" => Ok(Style::Italic),
            "oblique" => Ok(Style::Oblique),
            _ => Err(()),
        }
    }
}

/// The degree of blackness or stroke thickness of a font. This value ranges from 100 to 900,
/// with 400 as normal.
///
/// Catalogs key weights by their numeric string (`"400"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(pub u16);

impl Default for Weight {
    #[inline]
    fn default() -> Weight {
        Weight::NORMAL
    }
}

impl Weight {
    /// Thin weight (100), the thinnest value.
    pub const THIN: Weight = Weight(100);
    /// Light weight (300).
    pub const LIGHT: Weight = Weight(300);
    /// Normal (400).
    pub const NORMAL: Weight = Weight(400);
    /// Bold weight (700).
    pub const BOLD: Weight = Weight(700);
    /// Black weight (900), the thickest value.
    pub const BLACK: Weight = Weight(900);
}

impl Display for Weight {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Weight {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Weight, Self::Err> {
        value.parse().map(Weight)
    }
}

/// How a face is displayed while it loads, per the `font-display` descriptor.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontDisplay {
    Auto,
    Block,
    Swap,
    Fallback,
    Optional,
}

impl Display for FontDisplay {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            FontDisplay::Auto => "auto",
            FontDisplay::Block => "block",
            FontDisplay::Swap => "swap",
            FontDisplay::Fallback => "fallback",
            FontDisplay::Optional => "optional",
        })
    }
}
