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


use super::ranges::{DecorationMap, LineRanges};
use crate::{AnsiLineParser, AnsiSpanConfig};

/// Styled text split into its plain text and decoration ranges.
///
/// Produces the results of [`strip_ansi_codes`](crate::strip_ansi_codes) and
/// [`extract_decoration_ranges`](crate::extract_decoration_ranges) from a
/// single parse, for views that show the plain text and then decorate it.
///
/// # Examples
///
/// ```
/// use ansispan::{AnsiDocument, AnsiSpanConfig};
///
/// let document = AnsiDocument::parse("\x1b[32mok\x1b[0m done", &AnsiSpanConfig::default());
/// assert_eq!(document.text(), "ok done\n");
/// assert_eq!(document.line_count(), 1);
/// assert_eq!(document.decorations().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnsiDocument {
    text: String,
    decorations: DecorationMap,
    line_count: usize,
}

impl AnsiDocument {
    /// Parses multi-line styled text.
    pub fn parse(input: &str, config: &AnsiSpanConfig) -> AnsiDocument {
        let mut parser = AnsiLineParser::new();
        let mut document = AnsiDocument {
            text: String::with_capacity(input.len() + config.line_separator.len()),
            ..Default::default()
        };

        for (line_number, line) in input.split('\n').enumerate() {
            let mut ranges = LineRanges::new(config, line_number);
            for span in parser.append_line(line) {
                if !span.is_escape() {
                    document.text.push_str(span.text(line));
                }
                ranges.push(&span, &mut document.decorations);
            }
            document.text.push_str(&config.line_separator);
            document.line_count += 1;
        }

        document
    }

    /// The escape-free text, one separator after every line.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Decoration ranges, in coordinates of [`text`](AnsiDocument::text).
    pub fn decorations(&self) -> &DecorationMap {
        &self.decorations
    }

    /// Number of input lines.
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Splits the document into its text and decorations.
    pub fn into_parts(self) -> (String, DecorationMap) {
        (self.text, self.decorations)
    }
}
