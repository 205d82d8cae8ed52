//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//


use crate::consts::{ESCAPE_STYLE_KEY, MAX_FONT_INDEX};
use crate::style::Style;
use crate::{AnsiSpanError, AnsiSpanResult};
use serde::de::Error as _;
use tracing::warn;

/// Canonical serialized form of a [`Style`], used to group decoration ranges.
///
/// Two spans share a key exactly when their background, foreground, attribute
/// flags and font index are equal. The escape marker is never part of a key.
/// Keys round-trip through [`StyleKey::to_style`], so a host can store them
/// and hand them back later; a key that no longer parses is reported as
/// [`AnsiSpanError::MalformedStyleKey`].
///
/// The reserved [`StyleKey::escape`] key names the dimmed decoration used for
/// raw escape text and has no style of its own.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleKey(String);

impl StyleKey {
    /// Key for the text style of `style`.
    pub fn from_style(style: &Style) -> StyleKey {
        let style = style.without_escape_marker();
        match serde_json::to_string(&style) {
            Ok(key) => StyleKey(key),
            Err(error) => {
                // Such a key fails to resolve later and is skipped there.
                warn!("Failed to serialize style {:?}: {}", style, error);
                StyleKey(format!("{:?}", style))
            }
        }
    }

    /// The reserved key for raw escape text.
    pub fn escape() -> StyleKey {
        StyleKey(ESCAPE_STYLE_KEY.to_string())
    }

    /// Whether this is the reserved escape key.
    pub fn is_escape(&self) -> bool {
        self.0 == ESCAPE_STYLE_KEY
    }

    /// The serialized key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key back into a style.
    ///
    /// Fails for the escape key, for text that is not a serialized style, and
    /// for styles no SGR stream can produce (a font index above 9, an escape
    /// marker, or both members of an exclusive attribute pair).
    pub fn to_style(&self) -> AnsiSpanResult<Style> {
        let style: Style =
            serde_json::from_str(&self.0).map_err(|source| self.malformed(source))?;

        if style.font_index > MAX_FONT_INDEX {
            return Err(self.malformed(serde_json::Error::custom(format!(
                "font index {} out of range",
                style.font_index
            ))));
        }
        if style.is_escape() {
            return Err(self.malformed(serde_json::Error::custom(
                "escape marker in style key",
            )));
        }
        if !style.attributes.is_consistent() {
            return Err(self.malformed(serde_json::Error::custom(
                "mutually exclusive attributes both set",
            )));
        }

        Ok(style)
    }

    fn malformed(&self, source: serde_json::Error) -> AnsiSpanError {
        AnsiSpanError::MalformedStyleKey {
            key: self.0.clone(),
            source,
        }
    }
}

impl From<&Style> for StyleKey {
    fn from(style: &Style) -> Self {
        StyleKey::from_style(style)
    }
}

impl From<String> for StyleKey {
    fn from(key: String) -> Self {
        StyleKey(key)
    }
}

impl std::fmt::Display for StyleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
