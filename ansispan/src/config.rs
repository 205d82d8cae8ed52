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


use crate::consts::MAX_LINE_LENGTH;

/// Controls how styled text is turned into plain text and decoration ranges.
///
/// # Examples
///
/// ```
/// use ansispan::{AnsiDocument, AnsiSpanConfig};
///
/// let config = AnsiSpanConfig::verbatim().with_line_separator("\r\n");
/// let document = AnsiDocument::parse("\x1b[1mBold\x1b[0m", &config);
/// assert_eq!(document.text(), "Bold\r\n");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AnsiSpanConfig {
    /// Emit decoration ranges for text whose style is the default style
    pub include_default_style: bool,
    /// Emit zero-length decoration ranges
    pub include_empty_ranges: bool,
    /// Separator appended after every line of plain text
    pub line_separator: String,
    /// Largest line the streaming decoder buffers before giving up
    pub max_line_length: usize,
    /// Drop one trailing `\r` from each streamed line
    pub strip_carriage_return: bool,
}

impl AnsiSpanConfig {
    /// Settings for an editor view: only styled, non-empty text is decorated.
    pub fn editor() -> AnsiSpanConfig {
        AnsiSpanConfig {
            include_default_style: false,
            include_empty_ranges: false,
            line_separator: "\n".to_string(),
            max_line_length: MAX_LINE_LENGTH,
            strip_carriage_return: false,
        }
    }

    /// Emit a range for every text span, default style and empty spans included.
    pub fn verbatim() -> AnsiSpanConfig {
        AnsiSpanConfig {
            include_default_style: true,
            include_empty_ranges: true,
            line_separator: "\n".to_string(),
            max_line_length: MAX_LINE_LENGTH,
            strip_carriage_return: false,
        }
    }

    /// Set whether default-style text gets decoration ranges
    pub fn with_default_style(mut self, include: bool) -> Self {
        self.include_default_style = include;
        self
    }

    /// Set whether zero-length ranges are kept
    pub fn with_empty_ranges(mut self, include: bool) -> Self {
        self.include_empty_ranges = include;
        self
    }

    /// Set the plain text line separator
    pub fn with_line_separator(mut self, separator: impl Into<String>) -> Self {
        self.line_separator = separator.into();
        self
    }

    /// Set the streaming decoder line limit
    pub fn with_max_line_length(mut self, max: usize) -> Self {
        self.max_line_length = max;
        self
    }

    /// Set whether a trailing `\r` is dropped from streamed lines
    pub fn with_strip_carriage_return(mut self, strip: bool) -> Self {
        self.strip_carriage_return = strip;
        self
    }
}

impl Default for AnsiSpanConfig {
    fn default() -> Self {
        Self::editor()
    }
}
