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


use crate::style::Style;
use std::ops::Range;

/// A contiguous run of one line, tagged with the style in effect.
///
/// Offsets are byte offsets into the line the span was parsed from, escape
/// sequences included. Spans returned for one line are ordered and tile the
/// line without gaps or overlaps; a dangling `ESC` at the very end of a line
/// is the only byte left uncovered.
///
/// Spans that hold raw escape sequence text carry
/// [`AttributeFlags::ESCAPE_SEQUENCE`](crate::AttributeFlags::ESCAPE_SEQUENCE)
/// in their style, on top of the style in effect before the sequence.
///
/// # Examples
///
/// ```rust
/// use ansispan::AnsiLineParser;
///
/// let line = "\x1b[31mRed";
/// let mut parser = AnsiLineParser::new();
/// let spans = parser.append_line(line);
///
/// assert!(spans[0].is_escape());
/// assert_eq!(spans[0].text(line), "\x1b[31m");
/// assert_eq!(spans[1].text(line), "Red");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Style in effect for this span
    pub style: Style,
    /// Byte offset of the span within its line
    pub offset: usize,
    /// Byte length of the span
    pub length: usize,
}

impl Span {
    /// Creates a text span.
    pub fn new(style: Style, offset: usize, length: usize) -> Self {
        Span {
            style,
            offset,
            length,
        }
    }

    /// Creates a span for raw escape text, marking `style` as an escape.
    pub fn escape(style: Style, offset: usize, length: usize) -> Self {
        Span {
            style: style.with_escape_marker(),
            offset,
            length,
        }
    }

    /// Byte offset one past the end of the span.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// Byte range of the span within its line.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    /// Whether this span holds raw escape sequence text.
    pub fn is_escape(&self) -> bool {
        self.style.is_escape()
    }

    /// Whether this span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The slice of `line` this span covers.
    ///
    /// `line` must be the line the span was parsed from; a span that does not
    /// fit returns an empty string.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        line.get(self.range()).unwrap_or_default()
    }
}
