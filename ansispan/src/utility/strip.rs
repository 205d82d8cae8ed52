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


use crate::AnsiLineParser;

/// Removes ANSI escape sequences from multi-line text.
///
/// The text is split on `\n` and every line is run through an
/// [`AnsiLineParser`]. Text spans are kept, escape spans dropped, and a `\n` is
/// appended after every line, the last one included. An input that ends with
/// `\n` therefore produces an extra empty line.
///
/// Only sequences of the form `ESC [ [0-9;]* [A-Za-z]` are removed. Other
/// escape-looking bytes are kept verbatim, except an `ESC` ending a line,
/// which is dropped.
///
/// # Examples
///
/// ```
/// use ansispan::strip_ansi_codes;
///
/// let colored = "\x1b[1;31mHello\x1b[0m World";
/// assert_eq!(strip_ansi_codes(colored), "Hello World\n");
///
/// let formatted = "\x1b[1mBold\x1b[0m\n\x1b[4mUnderlined\x1b[0m";
/// assert_eq!(strip_ansi_codes(formatted), "Bold\nUnderlined\n");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    strip_ansi_codes_with_separator(text, "\n")
}

/// Removes ANSI escape sequences, appending `separator` after every line.
pub fn strip_ansi_codes_with_separator(text: &str, separator: &str) -> String {
    let mut parser = AnsiLineParser::new();
    let mut result = String::with_capacity(text.len() + separator.len());

    for line in text.split('\n') {
        for span in parser.append_line(line) {
            if !span.is_escape() {
                result.push_str(span.text(line));
            }
        }
        result.push_str(separator);
    }

    result
}
