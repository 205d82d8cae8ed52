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


use crate::{AnsiLineParser, AnsiSpanConfig, AnsiSpanError, AnsiSpanResult, Span};
use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;
use tracing::{instrument, trace, warn};

/// One decoded line and its spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyledLine {
    /// The line as received, escape sequences included, without its terminator
    pub text: String,
    /// Spans over `text`
    pub spans: Vec<Span>,
}

impl StyledLine {
    /// The line with escape sequences removed.
    pub fn plain_text(&self) -> String {
        self.text_spans()
            .map(|span| span.text(&self.text))
            .collect()
    }

    /// Spans that hold text rather than escape sequences.
    pub fn text_spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(|span| !span.is_escape())
    }
}

/// Decodes a byte stream of styled text into [`StyledLine`]s.
///
/// Lines are terminated by `\n`. One [`AnsiLineParser`] is kept for the life of
/// the codec, so a style set on one line carries over to the lines that follow,
/// including lines that arrive in later reads.
///
/// A line longer than [`max_line_length`](AnsiSpanConfig::max_line_length)
/// fails with [`AnsiSpanError::LineTooLong`] once, and its remaining bytes up
/// to and including the next `\n` are skipped.
///
/// Use with `tokio_util::codec::FramedRead` to parse the output of a process
/// or socket as it arrives.
pub struct AnsiLineCodec {
    config: AnsiSpanConfig,
    parser: AnsiLineParser,
    /// Bytes of the buffer already searched for `\n`
    next_index: usize,
    /// Skipping the rest of a line that exceeded the length limit
    is_discarding: bool,
}

impl AnsiLineCodec {
    /// Creates a new line codec with the given configuration.
    pub fn new(config: AnsiSpanConfig) -> Self {
        Self {
            config,
            parser: AnsiLineParser::new(),
            next_index: 0,
            is_discarding: false,
        }
    }

    /// The codec configuration.
    pub fn config(&self) -> &AnsiSpanConfig {
        &self.config
    }

    /// The parser carrying style between lines.
    pub fn parser(&self) -> &AnsiLineParser {
        &self.parser
    }

    /// Resets the carried style, e.g. before decoding an unrelated stream.
    pub fn reset(&mut self) {
        self.parser.clear();
        self.next_index = 0;
        self.is_discarding = false;
    }

    fn parse_line(&mut self, mut bytes: BytesMut) -> AnsiSpanResult<StyledLine> {
        if self.config.strip_carriage_return && bytes.last() == Some(&b'\r') {
            bytes.truncate(bytes.len() - 1);
        }
        let text = String::from_utf8(bytes.to_vec()).map_err(|error| {
            AnsiSpanError::InvalidUtf8 {
                position: error.utf8_error().valid_up_to(),
            }
        })?;
        let spans = self.parser.append_line(&text);
        trace!("Decoded line of {} bytes into {} spans", text.len(), spans.len());
        Ok(StyledLine { text, spans })
    }
}

impl Default for AnsiLineCodec {
    fn default() -> Self {
        Self::new(AnsiSpanConfig::default())
    }
}

impl Decoder for AnsiLineCodec {
    type Item = StyledLine;
    type Error = AnsiSpanError;

    #[instrument(skip_all)]
    fn decode(&mut self, src: &mut BytesMut) -> AnsiSpanResult<Option<Self::Item>> {
        let max_line_length = self.config.max_line_length;
        loop {
            // A line of `max_line_length` bytes ends at index `max_line_length` at the latest
            let read_to = max_line_length.saturating_add(1).min(src.len());
            let search_from = self.next_index.min(read_to);
            let newline = src[search_from..read_to]
                .iter()
                .position(|&byte| byte == b'\n')
                .map(|position| search_from + position);

            match (self.is_discarding, newline) {
                (true, Some(line_end)) => {
                    src.advance(line_end + 1);
                    self.is_discarding = false;
                    self.next_index = 0;
                    trace!("Resuming after discarded line");
                }
                (true, None) => {
                    src.advance(read_to);
                    self.next_index = 0;
                    if src.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(line_end)) => {
                    self.next_index = 0;
                    let mut line = src.split_to(line_end + 1);
                    line.truncate(line_end);
                    return self.parse_line(line).map(Some);
                }
                (false, None) if src.len() > max_line_length => {
                    let length = src
                        .iter()
                        .position(|&byte| byte == b'\n')
                        .unwrap_or(src.len());
                    warn!(
                        "Discarding line of {} bytes, limit is {} bytes",
                        length, max_line_length
                    );
                    self.is_discarding = true;
                    self.next_index = 0;
                    return Err(AnsiSpanError::LineTooLong {
                        length,
                        max: max_line_length,
                    });
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> AnsiSpanResult<Option<Self::Item>> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }
        self.next_index = 0;
        let line = src.split_to(src.len());
        self.parse_line(line).map(Some)
    }
}
