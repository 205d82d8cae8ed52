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


//! Whole-text operations built on [`AnsiLineParser`](crate::AnsiLineParser).
//!
//! Everything here splits the input on `\n`, feeds each line to one parser so
//! styles carry across lines, and post-processes the resulting spans.

mod document;
mod ranges;
mod strip;

pub use self::document::AnsiDocument;
pub use self::ranges::{DecorationMap, StyleRange, extract_decoration_ranges};
pub use self::strip::{strip_ansi_codes, strip_ansi_codes_with_separator};
