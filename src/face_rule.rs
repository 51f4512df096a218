// font-magician/src/face_rule.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Generated `@font-face` rules.

use serde::Serialize;

use crate::family_name::FamilyName;
use crate::formats::{self, FormatHints, SrcEntry};
use crate::properties::{FontDisplay, Style, Weight};
use crate::stylesheet::{AtRule, Declaration};
use crate::variants::VariantSpec;

/// The at-rule name of a face rule.
pub const FONT_FACE: &str = "font-face";

/// One generated `@font-face` rule. `src` is never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceRule {
    pub family: FamilyName,
    pub style: Style,
    pub weight: Weight,
    src: Vec<SrcEntry>,
    pub unicode_range: Option<String>,
    pub stretch: Option<String>,
    pub display: Option<FontDisplay>,
}

impl FaceRule {
    /// Builds the rule for one variant of `family`, or `None` if none of the requested formats
    /// has a source.
    pub fn synthesize(
        family: &FamilyName,
        variant: &VariantSpec,
        hints: &FormatHints,
        display: Option<FontDisplay>,
    ) -> Option<FaceRule> {
        let src = formats::negotiate(&variant.formats, variant.sources, hints);
        if src.is_empty() {
            return None;
        }
        Some(FaceRule {
            family: family.clone(),
            style: variant.style,
            weight: variant.weight,
            src,
            unicode_range: variant.unicode_range.clone(),
            stretch: variant.stretch.clone(),
            display,
        })
    }

    #[inline]
    pub fn src(&self) -> &[SrcEntry] {
        &self.src
    }

    /// The `src` descriptor value: every entry, comma-separated.
    pub fn src_value(&self) -> String {
        self.src
            .iter()
            .map(SrcEntry::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The rule's declarations in output order. Unset optional descriptors are left out.
    pub fn declarations(&self) -> Vec<Declaration> {
        let mut declarations = vec![
            Declaration::new("font-family", &self.family.to_css()),
            Declaration::new("font-style", self.style.as_str()),
            Declaration::new("font-weight", &self.weight.to_string()),
            Declaration::new("src", &self.src_value()),
        ];
        if let Some(ref range) = self.unicode_range {
            declarations.push(Declaration::new("unicode-range", range));
        }
        if let Some(ref stretch) = self.stretch {
            declarations.push(Declaration::new("font-stretch", stretch));
        }
        if let Some(display) = self.display {
            declarations.push(Declaration::new("font-display", &display.to_string()));
        }
        declarations
    }

    pub fn to_at_rule(&self) -> AtRule {
        AtRule::with_declarations(FONT_FACE, self.declarations())
    }
}

/// A face rule flattened for the asynchronous loader script.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FaceRecord {
    pub family: String,
    pub weight: String,
    pub style: String,
    pub src: String,
}

impl FaceRecord {
    /// Reads the record out of any `@font-face` rule, generated or hand-written. Missing
    /// descriptors are left empty.
    pub fn from_at_rule(rule: &AtRule) -> FaceRecord {
        let value = |property: &str| {
            rule.declarations(property)
                .last()
                .map(|declaration| declaration.value.clone())
                .unwrap_or_default()
        };
        FaceRecord {
            family: FamilyName::new(&value("font-family")).as_str().to_owned(),
            weight: value("font-weight"),
            style: value("font-style"),
            src: value("src"),
        }
    }
}

impl<'a> From<&'a FaceRule> for FaceRecord {
    fn from(rule: &'a FaceRule) -> FaceRecord {
        FaceRecord {
            family: rule.family.as_str().to_owned(),
            weight: rule.weight.to_string(),
            style: rule.style.to_string(),
            src: rule.src_value(),
        }
    }
}
