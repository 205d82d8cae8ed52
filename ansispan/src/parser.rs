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


use crate::consts::{CSI_INTRODUCER, ESC, PARAMETER_SEPARATOR, SGR_COMMAND};
use crate::span::Span;
use crate::style::Style;
use tracing::trace;

/// A recognized `ESC [ <params> <letter>` sequence, without the `ESC [` prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ControlSequence<'a> {
    /// Parameter bytes, digits and `;` only
    parameters: &'a str,
    /// Final command letter
    command: u8,
}

impl<'a> ControlSequence<'a> {
    /// Matches `[0-9;]*[A-Za-z]` at the start of `rest`.
    fn parse(rest: &'a str) -> Option<Self> {
        let parameters_len = rest
            .bytes()
            .position(|byte| !(byte.is_ascii_digit() || byte == b';'))
            .unwrap_or(rest.len());
        let command = *rest.as_bytes().get(parameters_len)?;
        command.is_ascii_alphabetic().then(|| ControlSequence {
            parameters: &rest[..parameters_len],
            command,
        })
    }

    /// Byte length of the full sequence including `ESC [`.
    fn len(&self) -> usize {
        2 + self.parameters.len() + 1
    }

    /// Numeric parameters, blank segments dropped.
    ///
    /// Values too large for `u32` saturate so they are treated as unknown codes
    /// and out-of-range color components.
    fn codes(&self) -> Vec<u32> {
        self.parameters
            .split(PARAMETER_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(|segment| segment.parse::<u32>().unwrap_or(u32::MAX))
            .collect()
    }
}

/// A line-at-a-time parser for text with embedded SGR escape sequences.
///
/// `AnsiLineParser` splits each line into [`Span`]s: runs of text carrying the
/// style in effect, and escape spans covering the raw `ESC [ ... <letter>`
/// sequences. SGR (`m`) sequences update the parser's style, which persists
/// into the following lines just as a terminal does not reset attributes at
/// a newline. Other CSI commands are kept as opaque escape spans.
///
/// Malformed input never fails:
/// - An `ESC` not followed by `[`, or followed by `[` and something that is not
///   a CSI sequence, is kept as ordinary text.
/// - An `ESC` as the last byte of a line is dropped.
///
/// Text kept from a skipped `ESC` is emitted as its own text span right before
/// a following escape span, so the spans of a line leave no gap there.
///
/// One parser should be used per independent document; call
/// [`clear`](AnsiLineParser::clear) to reuse it.
///
/// # Examples
///
/// ```rust
/// use ansispan::{AnsiLineParser, Color, NamedColor};
///
/// let mut parser = AnsiLineParser::new();
/// parser.append_line("\x1b[31mred");
/// let spans = parser.append_line("still red");
///
/// assert_eq!(spans[0].style.foreground, Color::Named(NamedColor::Red));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AnsiLineParser {
    /// Style carried from one line to the next.
    style: Style,
}

impl AnsiLineParser {
    /// Creates a parser in the default style.
    pub fn new() -> Self {
        Self {
            style: Style::default(),
        }
    }

    /// The style that will apply to the next text parsed.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Resets the carried style to default.
    pub fn clear(&mut self) {
        self.style.reset();
    }

    /// Parses one line (without its `\n`) into spans.
    ///
    /// The returned spans are ordered by offset and cover the line, ending
    /// with a trailing text span that may be empty.
    pub fn append_line(&mut self, line: &str) -> Vec<Span> {
        let bytes = line.as_bytes();
        let mut spans = Vec::new();

        let mut text_offset = 0;
        let mut index = 0;

        while index < bytes.len() {
            if bytes[index] != ESC {
                let escape_offset = bytes[index..]
                    .iter()
                    .position(|&byte| byte == ESC)
                    .map_or(bytes.len(), |position| index + position);

                spans.push(Span::new(self.style, text_offset, escape_offset - text_offset));

                text_offset = escape_offset;
                index = escape_offset;
                continue;
            }

            if index == bytes.len() - 1 {
                break;
            }

            if bytes[index + 1] != CSI_INTRODUCER {
                index += 1;
                continue;
            }

            let Some(sequence) = ControlSequence::parse(&line[index + 2..]) else {
                index += 1;
                continue;
            };

            // Bytes of a skipped ESC still waiting to be emitted
            if text_offset < index {
                spans.push(Span::new(self.style, text_offset, index - text_offset));
            }

            spans.push(Span::escape(self.style, index, sequence.len()));

            if sequence.command == SGR_COMMAND {
                self.style.apply_codes(&sequence.codes());
            } else {
                trace!(
                    "Ignoring CSI command '{}' at offset {}",
                    char::from(sequence.command),
                    index
                );
            }

            text_offset = index + sequence.len();
            index = text_offset;
        }

        spans.push(Span::new(self.style, text_offset, index - text_offset));

        spans
    }
}
