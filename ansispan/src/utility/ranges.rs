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


use crate::{AnsiLineParser, AnsiSpanConfig, Span, StyleKey};
use std::collections::BTreeMap;

/// Ranges of escape-free text grouped by the style they share.
pub type DecorationMap = BTreeMap<StyleKey, Vec<StyleRange>>;

/// A range of one line of escape-free text.
///
/// Columns are byte offsets into the line after all escape sequences have
/// been removed, i.e. positions in the output of
/// [`strip_ansi_codes`](crate::strip_ansi_codes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StyleRange {
    /// Zero-based line number
    pub line: usize,
    /// First column of the range
    pub start: usize,
    /// Column one past the end of the range
    pub end: usize,
}

impl StyleRange {
    /// Creates a new range.
    pub fn new(line: usize, start: usize, end: usize) -> Self {
        StyleRange { line, start, end }
    }

    /// Number of columns covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no columns.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Collects decoration ranges for one parsed line.
///
/// Keeps a running count of escape bytes so span offsets can be moved into
/// escape-free columns.
pub(crate) struct LineRanges<'c> {
    config: &'c AnsiSpanConfig,
    line: usize,
    escape_length: usize,
}

impl<'c> LineRanges<'c> {
    pub(crate) fn new(config: &'c AnsiSpanConfig, line: usize) -> Self {
        LineRanges {
            config,
            line,
            escape_length: 0,
        }
    }

    /// Adds `span` to `decorations` if it is decorated text.
    pub(crate) fn push(&mut self, span: &Span, decorations: &mut DecorationMap) {
        if span.is_escape() {
            self.escape_length += span.length;
            return;
        }
        if span.is_empty() && !self.config.include_empty_ranges {
            return;
        }
        if span.style.is_default() && !self.config.include_default_style {
            return;
        }

        let start = span.offset - self.escape_length;
        let range = StyleRange::new(self.line, start, start + span.length);
        decorations
            .entry(StyleKey::from_style(&span.style))
            .or_default()
            .push(range);
    }
}

/// Groups the styled text of `text` into ranges per distinct style.
///
/// Line splitting and style carry-over follow
/// [`strip_ansi_codes`](crate::strip_ansi_codes), and range columns refer to
/// its output. Whether default-style and zero-length text gets ranges is
/// controlled by `config`; with [`AnsiSpanConfig::editor`] only visibly styled
/// text is returned.
///
/// # Examples
///
/// ```
/// use ansispan::{AnsiSpanConfig, StyleRange, extract_decoration_ranges};
///
/// let ranges = extract_decoration_ranges("\x1b[1;31mHello\x1b[0m World", &AnsiSpanConfig::editor());
/// assert_eq!(ranges.len(), 1);
/// assert_eq!(ranges.values().next().unwrap(), &vec![StyleRange::new(0, 0, 5)]);
/// ```
pub fn extract_decoration_ranges(text: &str, config: &AnsiSpanConfig) -> DecorationMap {
    let mut parser = AnsiLineParser::new();
    let mut decorations = DecorationMap::new();

    for (line_number, line) in text.split('\n').enumerate() {
        let mut ranges = LineRanges::new(config, line_number);
        for span in parser.append_line(line) {
            ranges.push(&span, &mut decorations);
        }
    }

    decorations
}
