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


/// The escape byte that starts every ANSI sequence.
pub const ESC: u8 = 0x1B;

/// Second byte of a Control Sequence Introducer (`ESC [`).
pub const CSI_INTRODUCER: u8 = b'[';

/// Final byte of a Select Graphic Rendition sequence.
pub const SGR_COMMAND: u8 = b'm';

/// Parameter separator inside a CSI sequence.
pub const PARAMETER_SEPARATOR: char = ';';

/// Maximum length of a single buffered line in the streaming decoder.
///
/// Lines longer than this are discarded with a `LineTooLong` error rather than
/// growing the read buffer without bound.
pub const MAX_LINE_LENGTH: usize = 1024 * 1024;

/// Reserved style key for the decoration used on raw escape text.
pub const ESCAPE_STYLE_KEY: &str = "escape";

/// Opacity applied to faint text and raw escape text.
pub const DIMMED_OPACITY_PERCENT: u8 = 50;

/// Highest font index selectable with SGR `10`-`19`.
pub const MAX_FONT_INDEX: u8 = 9;
