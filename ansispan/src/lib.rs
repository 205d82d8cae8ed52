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


mod codec;
mod config;
mod consts;
mod decoration;
mod key;
mod parser;
mod result;
mod span;
mod style;
pub mod utility;

pub use self::codec::{AnsiLineCodec, StyledLine};
pub use self::config::AnsiSpanConfig;
pub use self::decoration::{
    Decoration, DecorationCache, DecorationColor, DecorationProvider, DecorationRegistry,
    DecorationTarget, FontStyle, FontWeight, Opacity, TextDecoration, theme_color_name,
};
pub use self::key::StyleKey;
pub use self::parser::AnsiLineParser;
pub use self::result::{AnsiSpanError, AnsiSpanResult};
pub use self::span::Span;
pub use self::style::{AttributeFlags, Color, NamedColor, Style};
pub use self::utility::{
    AnsiDocument, DecorationMap, StyleRange, extract_decoration_ranges, strip_ansi_codes,
    strip_ansi_codes_with_separator,
};
