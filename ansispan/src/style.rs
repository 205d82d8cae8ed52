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


use crate::consts::MAX_FONT_INDEX;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One of the sixteen terminal palette colors, or a default sentinel.
///
/// The first eight variants are the base colors selected with SGR `30`-`37`
/// (foreground) and `40`-`47` (background). The bright variants are selected
/// with `90`-`97` and `100`-`107`. `DefaultForeground` and `DefaultBackground`
/// are what SGR `39`, `49` and `0` restore; they carry no palette index.
///
/// | Index | Base      | Bright          |
/// |-------|-----------|-----------------|
/// | `0`   | `Black`   | `BrightBlack`   |
/// | `1`   | `Red`     | `BrightRed`     |
/// | `2`   | `Green`   | `BrightGreen`   |
/// | `3`   | `Yellow`  | `BrightYellow`  |
/// | `4`   | `Blue`    | `BrightBlue`    |
/// | `5`   | `Magenta` | `BrightMagenta` |
/// | `6`   | `Cyan`    | `BrightCyan`    |
/// | `7`   | `White`   | `BrightWhite`   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    /// Black - Color #0 (FG `30`, BG `40`).
    Black,
    /// Red - Color #1 (FG `31`, BG `41`).
    Red,
    /// Green - Color #2 (FG `32`, BG `42`).
    Green,
    /// Yellow - Color #3 (FG `33`, BG `43`).
    Yellow,
    /// Blue - Color #4 (FG `34`, BG `44`).
    Blue,
    /// Magenta - Color #5 (FG `35`, BG `45`).
    Magenta,
    /// Cyan - Color #6 (FG `36`, BG `46`).
    Cyan,
    /// White - Color #7 (FG `37`, BG `47`).
    White,

    /// Bright Black - Color #8 (FG `90`, BG `100`).
    BrightBlack,
    /// Bright Red - Color #9 (FG `91`, BG `101`).
    BrightRed,
    /// Bright Green - Color #10 (FG `92`, BG `102`).
    BrightGreen,
    /// Bright Yellow - Color #11 (FG `93`, BG `103`).
    BrightYellow,
    /// Bright Blue - Color #12 (FG `94`, BG `104`).
    BrightBlue,
    /// Bright Magenta - Color #13 (FG `95`, BG `105`).
    BrightMagenta,
    /// Bright Cyan - Color #14 (FG `96`, BG `106`).
    BrightCyan,
    /// Bright White - Color #15 (FG `97`, BG `107`).
    BrightWhite,

    /// The terminal's default text color (FG `39`).
    DefaultForeground,
    /// The terminal's default background color (BG `49`).
    DefaultBackground,
}

impl NamedColor {
    const PALETTE: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
        NamedColor::BrightBlack,
        NamedColor::BrightRed,
        NamedColor::BrightGreen,
        NamedColor::BrightYellow,
        NamedColor::BrightBlue,
        NamedColor::BrightMagenta,
        NamedColor::BrightCyan,
        NamedColor::BrightWhite,
    ];

    /// Looks up a palette color by index. `0`-`7` are base colors, `8`-`15` bright.
    ///
    /// ```
    /// use ansispan::NamedColor;
    ///
    /// assert_eq!(NamedColor::from_index(1), Some(NamedColor::Red));
    /// assert_eq!(NamedColor::from_index(9), Some(NamedColor::BrightRed));
    /// assert_eq!(NamedColor::from_index(16), None);
    /// ```
    pub fn from_index(index: u8) -> Option<NamedColor> {
        Self::PALETTE.get(usize::from(index)).copied()
    }

    /// Palette index of this color, `None` for the default sentinels.
    pub fn index(&self) -> Option<u8> {
        Self::PALETTE
            .iter()
            .position(|color| color == self)
            .and_then(|position| u8::try_from(position).ok())
    }

    /// Whether this is one of the eight bright palette colors.
    pub fn is_bright(&self) -> bool {
        matches!(self.index(), Some(8..=15))
    }

    /// Whether this is a default sentinel rather than a palette color.
    pub fn is_default(&self) -> bool {
        matches!(
            self,
            NamedColor::DefaultForeground | NamedColor::DefaultBackground
        )
    }
}

/// A resolved text or background color.
///
/// A color is either a [`NamedColor`], which the host theme decides how to
/// draw, or an exact 24-bit RGB triple. 256-color palette selections are
/// expanded on the way in with [`Color::from_fixed`], so there is no separate
/// fixed-palette variant.
///
/// # ANSI Escape Sequences
///
/// - Named: `30`-`37`, `90`-`97` (FG) and `40`-`47`, `100`-`107` (BG)
/// - 256-color: `38;5;<n>` / `48;5;<n>`
/// - True color: `38;2;<r>;<g>;<b>` / `48;2;<r>;<g>;<b>`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// A theme palette color or default sentinel.
    Named(NamedColor),
    /// A 24-bit RGB color, as specified by ISO-8613-3.
    Rgb(u8, u8, u8),
}

impl Color {
    /// The default foreground sentinel.
    pub const DEFAULT_FOREGROUND: Color = Color::Named(NamedColor::DefaultForeground);
    /// The default background sentinel.
    pub const DEFAULT_BACKGROUND: Color = Color::Named(NamedColor::DefaultBackground);

    /// Expands an entry of the 256-color palette.
    ///
    /// - Colours 0 to 7 are the base named colors.
    /// - Colours 8 to 15 are the bright named colors.
    /// - Colours 16 to 231 form a 6x6x6 cube; each channel step is `255 * c / 5`.
    /// - Colours 232 to 255 are a 24 step grayscale ramp from black to white.
    ///
    /// ```
    /// use ansispan::{Color, NamedColor};
    ///
    /// assert_eq!(Color::from_fixed(1), Color::Named(NamedColor::Red));
    /// assert_eq!(Color::from_fixed(196), Color::Rgb(255, 0, 0));
    /// assert_eq!(Color::from_fixed(255), Color::Rgb(255, 255, 255));
    /// ```
    pub fn from_fixed(index: u8) -> Color {
        match index {
            0..=15 => match NamedColor::from_index(index) {
                Some(named) => Color::Named(named),
                None => Color::DEFAULT_FOREGROUND,
            },
            16..=231 => {
                let mut cube = u16::from(index) - 16;
                let b = cube % 6;
                cube /= 6;
                let g = cube % 6;
                cube /= 6;
                let r = cube;
                Color::Rgb(cube_channel(r), cube_channel(g), cube_channel(b))
            }
            232..=255 => {
                let step = u16::from(index) - 232;
                let intensity = scale(step, 23);
                Color::Rgb(intensity, intensity, intensity)
            }
        }
    }

    /// Builds an RGB color from raw SGR parameters, `None` if any channel exceeds 255.
    pub fn from_rgb_components(r: u32, g: u32, b: u32) -> Option<Color> {
        Some(Color::Rgb(
            u8::try_from(r).ok()?,
            u8::try_from(g).ok()?,
            u8::try_from(b).ok()?,
        ))
    }

    /// Whether this color is one of the default sentinels.
    pub fn is_default(&self) -> bool {
        matches!(self, Color::Named(named) if named.is_default())
    }
}

fn cube_channel(component: u16) -> u8 {
    scale(component, 5)
}

/// `floor(255 * value / max)`, `value <= max`.
fn scale(value: u16, max: u16) -> u8 {
    u8::try_from(255 * u32::from(value) / u32::from(max)).unwrap_or(u8::MAX)
}

bitflags! {
    /// Independent text attributes set by SGR codes.
    ///
    /// Several attributes come in mutually exclusive pairs (see
    /// [`AttributeFlags::EXCLUSIVE_PAIRS`]); setting one through
    /// [`AttributeFlags::set_exclusive`] always clears its partner.
    ///
    /// `ESCAPE_SEQUENCE` is not a terminal attribute. It marks spans that cover
    /// raw escape text and is stripped before a style is used as a decoration key.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AttributeFlags: u32 {
        /// SGR `1`
        const BOLD = 1 << 0;
        /// SGR `2`
        const FAINT = 1 << 1;
        /// SGR `3`
        const ITALIC = 1 << 2;
        /// SGR `4`
        const UNDERLINE = 1 << 3;
        /// SGR `5`
        const SLOW_BLINK = 1 << 4;
        /// SGR `6`
        const RAPID_BLINK = 1 << 5;
        /// SGR `7`
        const INVERSE = 1 << 6;
        /// SGR `8`
        const CONCEAL = 1 << 7;
        /// SGR `9`
        const CROSSED_OUT = 1 << 8;
        /// SGR `20`
        const FRAKTUR = 1 << 9;
        /// Double underline, cleared by SGR `4` and `24`
        const DOUBLE_UNDERLINE = 1 << 10;
        /// SGR `26`
        const PROPORTIONAL = 1 << 11;
        /// SGR `51`
        const FRAMED = 1 << 12;
        /// SGR `52`
        const ENCIRCLED = 1 << 13;
        /// SGR `53`
        const OVERLINED = 1 << 14;
        /// SGR `73`
        const SUPERSCRIPT = 1 << 15;
        /// SGR `74`
        const SUBSCRIPT = 1 << 16;

        /// Marks a span that holds raw escape sequence text.
        const ESCAPE_SEQUENCE = 1 << 31;
    }
}

impl AttributeFlags {
    /// Attribute pairs that can never be set at the same time.
    pub const EXCLUSIVE_PAIRS: [(AttributeFlags, AttributeFlags); 6] = [
        (AttributeFlags::BOLD, AttributeFlags::FAINT),
        (AttributeFlags::ITALIC, AttributeFlags::FRAKTUR),
        (AttributeFlags::UNDERLINE, AttributeFlags::DOUBLE_UNDERLINE),
        (AttributeFlags::SLOW_BLINK, AttributeFlags::RAPID_BLINK),
        (AttributeFlags::FRAMED, AttributeFlags::ENCIRCLED),
        (AttributeFlags::SUPERSCRIPT, AttributeFlags::SUBSCRIPT),
    ];

    /// The flag that is mutually exclusive with `flag`, empty if there is none.
    pub fn partner(flag: AttributeFlags) -> AttributeFlags {
        Self::EXCLUSIVE_PAIRS
            .iter()
            .find_map(|&(left, right)| {
                if left == flag {
                    Some(right)
                } else if right == flag {
                    Some(left)
                } else {
                    None
                }
            })
            .unwrap_or_else(AttributeFlags::empty)
    }

    /// Sets `flag` and clears its exclusive partner.
    pub fn set_exclusive(&mut self, flag: AttributeFlags) {
        self.remove(Self::partner(flag));
        self.insert(flag);
    }

    /// Whether no exclusive pair has both members set.
    pub fn is_consistent(&self) -> bool {
        Self::EXCLUSIVE_PAIRS
            .iter()
            .all(|&(left, right)| !self.contains(left | right))
    }
}

/// The rendering attributes in effect for a run of text.
///
/// A `Style` is the running state an SGR stream mutates. The
/// [`AnsiLineParser`](crate::AnsiLineParser) keeps one across lines and
/// stamps a copy onto every span it emits.
///
/// # Default Values
///
/// ```
/// use ansispan::{AttributeFlags, Color, Style};
///
/// let style = Style::default();
/// assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);
/// assert_eq!(style.background, Color::DEFAULT_BACKGROUND);
/// assert_eq!(style.attributes, AttributeFlags::empty());
/// assert_eq!(style.font_index, 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Style {
    /// Background color.
    ///
    /// | Code         | Description    |
    /// |--------------|----------------|
    /// | `40`-`47`    | Named          |
    /// | `48;5;n`     | 8-bit Fixed    |
    /// | `48;2;r;g;b` | 24-bit RGB     |
    /// | `49`         | Default        |
    /// | `100`-`107`  | Bright Named   |
    pub background: Color,
    /// Foreground color.
    ///
    /// | Code         | Description    |
    /// |--------------|----------------|
    /// | `30`-`37`    | Named          |
    /// | `38;5;n`     | 8-bit Fixed    |
    /// | `38;2;r;g;b` | 24-bit RGB     |
    /// | `39`         | Default        |
    /// | `90`-`97`    | Bright Named   |
    pub foreground: Color,
    /// Attribute flags.
    pub attributes: AttributeFlags,
    /// Font selected with `10`-`19`, `0` is the primary font.
    pub font_index: u8,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            background: Color::DEFAULT_BACKGROUND,
            foreground: Color::DEFAULT_FOREGROUND,
            attributes: AttributeFlags::empty(),
            font_index: 0,
        }
    }
}

impl Style {
    /// Restores the default style.
    pub fn reset(&mut self) {
        *self = Style::default();
    }

    /// Whether this style renders like unstyled text.
    pub fn is_default(&self) -> bool {
        self.without_escape_marker() == Style::default()
    }

    /// Whether this style tags raw escape sequence text.
    pub fn is_escape(&self) -> bool {
        self.attributes.contains(AttributeFlags::ESCAPE_SEQUENCE)
    }

    /// A copy of this style tagged as raw escape text.
    pub fn with_escape_marker(&self) -> Style {
        Style {
            attributes: self.attributes | AttributeFlags::ESCAPE_SEQUENCE,
            ..*self
        }
    }

    /// A copy of this style with the escape marker removed.
    pub fn without_escape_marker(&self) -> Style {
        Style {
            attributes: self.attributes - AttributeFlags::ESCAPE_SEQUENCE,
            ..*self
        }
    }

    /// Applies the numeric parameters of one SGR (`ESC [ ... m`) sequence.
    ///
    /// Codes are applied left to right. An empty list is a reset, like `0`.
    /// Unknown codes are ignored, and so are extended colors with a missing
    /// or out-of-range component; the previous color stays in place.
    ///
    /// # Supported Codes
    ///
    /// ## Attributes
    /// - `0` - Reset
    /// - `1` / `2` - Bold / Faint (exclusive), `21` clears Bold, `22` clears both
    /// - `3` / `20` - Italic / Fraktur (exclusive), `23` clears both
    /// - `4` - Underline, `24` clears Underline and Double Underline
    /// - `5` / `6` - Slow / Rapid Blink (exclusive), `25` clears both
    /// - `7` / `27`, `8` / `28`, `9` / `29` - Inverse, Conceal, Crossed Out on / off
    /// - `26` / `50` - Proportional spacing on / off
    /// - `51` / `52` - Framed / Encircled (exclusive), `54` clears both
    /// - `53` / `55` - Overlined on / off
    /// - `73` / `74` - Superscript / Subscript (exclusive), `75` clears both
    ///
    /// ## Fonts
    /// - `10`-`19` - Font index `0`-`9`
    ///
    /// ## Colors
    /// - `30`-`37`, `90`-`97`, `39` - Foreground named, bright, default
    /// - `40`-`47`, `100`-`107`, `49` - Background named, bright, default
    /// - `38;5;n`, `48;5;n` - 256-color palette (consumes 2 parameters)
    /// - `38;2;r;g;b`, `48;2;r;g;b` - RGB (consumes 4 parameters)
    /// - `58` / `59` - Underline color, ignored; following codes still apply
    pub fn apply_codes(&mut self, codes: &[u32]) {
        if codes.is_empty() {
            self.reset();
            return;
        }

        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => self.reset(),

                1 => self.attributes.set_exclusive(AttributeFlags::BOLD),
                2 => self.attributes.set_exclusive(AttributeFlags::FAINT),
                21 => self.attributes.remove(AttributeFlags::BOLD),
                22 => self
                    .attributes
                    .remove(AttributeFlags::BOLD | AttributeFlags::FAINT),

                3 => self.attributes.set_exclusive(AttributeFlags::ITALIC),
                20 => self.attributes.set_exclusive(AttributeFlags::FRAKTUR),
                23 => self
                    .attributes
                    .remove(AttributeFlags::ITALIC | AttributeFlags::FRAKTUR),

                4 => self.attributes.set_exclusive(AttributeFlags::UNDERLINE),
                24 => self
                    .attributes
                    .remove(AttributeFlags::UNDERLINE | AttributeFlags::DOUBLE_UNDERLINE),

                5 => self.attributes.set_exclusive(AttributeFlags::SLOW_BLINK),
                6 => self.attributes.set_exclusive(AttributeFlags::RAPID_BLINK),
                25 => self
                    .attributes
                    .remove(AttributeFlags::SLOW_BLINK | AttributeFlags::RAPID_BLINK),

                7 => self.attributes.insert(AttributeFlags::INVERSE),
                27 => self.attributes.remove(AttributeFlags::INVERSE),
                8 => self.attributes.insert(AttributeFlags::CONCEAL),
                28 => self.attributes.remove(AttributeFlags::CONCEAL),
                9 => self.attributes.insert(AttributeFlags::CROSSED_OUT),
                29 => self.attributes.remove(AttributeFlags::CROSSED_OUT),

                code @ 10..=19 => self.font_index = font_index(code),

                26 => self.attributes.insert(AttributeFlags::PROPORTIONAL),
                50 => self.attributes.remove(AttributeFlags::PROPORTIONAL),

                51 => self.attributes.set_exclusive(AttributeFlags::FRAMED),
                52 => self.attributes.set_exclusive(AttributeFlags::ENCIRCLED),
                54 => self
                    .attributes
                    .remove(AttributeFlags::FRAMED | AttributeFlags::ENCIRCLED),
                53 => self.attributes.insert(AttributeFlags::OVERLINED),
                55 => self.attributes.remove(AttributeFlags::OVERLINED),

                73 => self.attributes.set_exclusive(AttributeFlags::SUPERSCRIPT),
                74 => self.attributes.set_exclusive(AttributeFlags::SUBSCRIPT),
                75 => self
                    .attributes
                    .remove(AttributeFlags::SUPERSCRIPT | AttributeFlags::SUBSCRIPT),

                code @ 30..=37 => self.foreground = palette_color(code - 30),
                code @ 90..=97 => self.foreground = palette_color(code - 90 + 8),
                39 => self.foreground = Color::DEFAULT_FOREGROUND,
                38 => {
                    let (color, consumed) = extended_color(&codes[i + 1..]);
                    if let Some(color) = color {
                        self.foreground = color;
                    }
                    i += consumed;
                }

                code @ 40..=47 => self.background = palette_color(code - 40),
                code @ 100..=107 => self.background = palette_color(code - 100 + 8),
                49 => self.background = Color::DEFAULT_BACKGROUND,
                48 => {
                    let (color, consumed) = extended_color(&codes[i + 1..]);
                    if let Some(color) = color {
                        self.background = color;
                    }
                    i += consumed;
                }

                // Underline color is reserved; codes after `58` are read as usual.
                58 | 59 => {}

                code => trace!("Ignoring unsupported SGR code {}", code),
            }

            i += 1;
        }
    }
}

/// Reads the operands of `38` or `48`.
///
/// Returns the color, if valid, and how many operands were consumed. The
/// operand count depends only on the selector: `5` consumes two, `2` consumes
/// four, anything else none.
fn extended_color(operands: &[u32]) -> (Option<Color>, usize) {
    match operands.first() {
        Some(5) => {
            let color = operands
                .get(1)
                .and_then(|&index| u8::try_from(index).ok())
                .map(Color::from_fixed);
            (color, 2)
        }
        Some(2) => {
            let color = match (operands.get(1), operands.get(2), operands.get(3)) {
                (Some(&r), Some(&g), Some(&b)) => Color::from_rgb_components(r, g, b),
                _ => None,
            };
            (color, 4)
        }
        _ => (None, 0),
    }
}

fn palette_color(index: u32) -> Color {
    u8::try_from(index)
        .map(Color::from_fixed)
        .unwrap_or(Color::DEFAULT_FOREGROUND)
}

fn font_index(code: u32) -> u8 {
    u8::try_from(code - 10)
        .map(|index| index.min(MAX_FONT_INDEX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(codes: &[u32]) -> Style {
        let mut style = Style::default();
        style.apply_codes(codes);
        style
    }

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);
        assert_eq!(style.background, Color::DEFAULT_BACKGROUND);
        assert!(style.attributes.is_empty());
        assert_eq!(style.font_index, 0);
        assert!(style.is_default());
    }

    #[test]
    fn test_named_color_index() {
        assert_eq!(NamedColor::from_index(0), Some(NamedColor::Black));
        assert_eq!(NamedColor::from_index(7), Some(NamedColor::White));
        assert_eq!(NamedColor::from_index(8), Some(NamedColor::BrightBlack));
        assert_eq!(NamedColor::from_index(15), Some(NamedColor::BrightWhite));
        assert_eq!(NamedColor::from_index(16), None);
        assert_eq!(NamedColor::BrightCyan.index(), Some(14));
        assert_eq!(NamedColor::DefaultForeground.index(), None);
        assert!(NamedColor::BrightRed.is_bright());
        assert!(!NamedColor::Red.is_bright());
        assert!(NamedColor::DefaultBackground.is_default());
    }

    #[test]
    fn test_fixed_palette_boundaries() {
        assert_eq!(Color::from_fixed(0), Color::Named(NamedColor::Black));
        assert_eq!(Color::from_fixed(7), Color::Named(NamedColor::White));
        assert_eq!(Color::from_fixed(8), Color::Named(NamedColor::BrightBlack));
        assert_eq!(Color::from_fixed(15), Color::Named(NamedColor::BrightWhite));
        assert_eq!(Color::from_fixed(16), Color::Rgb(0, 0, 0));
        assert_eq!(Color::from_fixed(231), Color::Rgb(255, 255, 255));
        assert_eq!(Color::from_fixed(232), Color::Rgb(0, 0, 0));
        assert_eq!(Color::from_fixed(255), Color::Rgb(255, 255, 255));
    }

    #[test]
    fn test_fixed_palette_cube() {
        // 196 = 16 + 5 * 36
        assert_eq!(Color::from_fixed(196), Color::Rgb(255, 0, 0));
        // 21 = 16 + 5
        assert_eq!(Color::from_fixed(21), Color::Rgb(0, 0, 255));
        // 17 = 16 + 1, first blue step
        assert_eq!(Color::from_fixed(17), Color::Rgb(0, 0, 51));
        // 139 = 16 + 3 * 36 + 2 * 6 + 3
        assert_eq!(Color::from_fixed(139), Color::Rgb(153, 102, 153));
    }

    #[test]
    fn test_fixed_palette_grayscale() {
        assert_eq!(Color::from_fixed(233), Color::Rgb(11, 11, 11));
        assert_eq!(Color::from_fixed(244), Color::Rgb(133, 133, 133));
        assert_eq!(Color::from_fixed(254), Color::Rgb(243, 243, 243));
    }

    #[test]
    fn test_rgb_components() {
        assert_eq!(
            Color::from_rgb_components(1, 2, 3),
            Some(Color::Rgb(1, 2, 3))
        );
        assert_eq!(Color::from_rgb_components(256, 0, 0), None);
        assert_eq!(Color::from_rgb_components(0, 0, u32::MAX), None);
    }

    #[test]
    fn test_empty_codes_reset() {
        let mut style = applied(&[1, 31]);
        style.apply_codes(&[]);
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_reset_in_middle() {
        let style = applied(&[1, 31, 0, 4]);
        assert_eq!(style.attributes, AttributeFlags::UNDERLINE);
        assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);
    }

    #[test]
    fn test_intensity() {
        assert_eq!(applied(&[1]).attributes, AttributeFlags::BOLD);
        assert_eq!(applied(&[1, 2]).attributes, AttributeFlags::FAINT);
        assert_eq!(applied(&[2, 1]).attributes, AttributeFlags::BOLD);
        assert!(applied(&[1, 21]).attributes.is_empty());
        assert_eq!(applied(&[2, 21]).attributes, AttributeFlags::FAINT);
        assert!(applied(&[2, 22]).attributes.is_empty());
    }

    #[test]
    fn test_italic_fraktur() {
        assert_eq!(applied(&[3]).attributes, AttributeFlags::ITALIC);
        assert_eq!(applied(&[3, 20]).attributes, AttributeFlags::FRAKTUR);
        assert_eq!(applied(&[20, 3]).attributes, AttributeFlags::ITALIC);
        assert!(applied(&[3, 23]).attributes.is_empty());
        assert!(applied(&[20, 23]).attributes.is_empty());
    }

    #[test]
    fn test_underline() {
        assert_eq!(applied(&[4]).attributes, AttributeFlags::UNDERLINE);
        assert!(applied(&[4, 24]).attributes.is_empty());

        let mut style = Style::default();
        style.attributes = AttributeFlags::DOUBLE_UNDERLINE;
        style.apply_codes(&[4]);
        assert_eq!(style.attributes, AttributeFlags::UNDERLINE);
    }

    #[test]
    fn test_blink() {
        assert_eq!(applied(&[5]).attributes, AttributeFlags::SLOW_BLINK);
        assert_eq!(applied(&[5, 6]).attributes, AttributeFlags::RAPID_BLINK);
        assert!(applied(&[6, 25]).attributes.is_empty());
    }

    #[test]
    fn test_toggles() {
        let test_cases = vec![
            (7, 27, AttributeFlags::INVERSE),
            (8, 28, AttributeFlags::CONCEAL),
            (9, 29, AttributeFlags::CROSSED_OUT),
            (26, 50, AttributeFlags::PROPORTIONAL),
            (53, 55, AttributeFlags::OVERLINED),
        ];

        for (on, off, flag) in test_cases {
            assert_eq!(applied(&[on]).attributes, flag, "Failed for code: {}", on);
            assert!(
                applied(&[on, off]).attributes.is_empty(),
                "Failed for code: {}",
                off
            );
        }
    }

    #[test]
    fn test_framed_encircled() {
        assert_eq!(applied(&[51]).attributes, AttributeFlags::FRAMED);
        assert_eq!(applied(&[51, 52]).attributes, AttributeFlags::ENCIRCLED);
        assert!(applied(&[52, 54]).attributes.is_empty());
    }

    #[test]
    fn test_script() {
        assert_eq!(applied(&[73]).attributes, AttributeFlags::SUPERSCRIPT);
        assert_eq!(applied(&[73, 74]).attributes, AttributeFlags::SUBSCRIPT);
        assert!(applied(&[74, 75]).attributes.is_empty());
    }

    #[test]
    fn test_font_index() {
        assert_eq!(applied(&[10]).font_index, 0);
        assert_eq!(applied(&[13]).font_index, 3);
        assert_eq!(applied(&[19]).font_index, 9);
        assert_eq!(applied(&[15, 0]).font_index, 0);
    }

    #[test]
    fn test_named_foreground_background() {
        let style = applied(&[31, 42]);
        assert_eq!(style.foreground, Color::Named(NamedColor::Red));
        assert_eq!(style.background, Color::Named(NamedColor::Green));

        let style = applied(&[97, 104]);
        assert_eq!(style.foreground, Color::Named(NamedColor::BrightWhite));
        assert_eq!(style.background, Color::Named(NamedColor::BrightBlue));

        let style = applied(&[31, 42, 39, 49]);
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_extended_palette() {
        let style = applied(&[38, 5, 196, 48, 5, 9]);
        assert_eq!(style.foreground, Color::Rgb(255, 0, 0));
        assert_eq!(style.background, Color::Named(NamedColor::BrightRed));
    }

    #[test]
    fn test_extended_rgb() {
        let style = applied(&[38, 2, 10, 20, 30, 48, 2, 40, 50, 60, 1]);
        assert_eq!(style.foreground, Color::Rgb(10, 20, 30));
        assert_eq!(style.background, Color::Rgb(40, 50, 60));
        assert_eq!(style.attributes, AttributeFlags::BOLD);
    }

    #[test]
    fn test_extended_out_of_range_keeps_color() {
        let style = applied(&[31, 38, 5, 256]);
        assert_eq!(style.foreground, Color::Named(NamedColor::Red));

        let style = applied(&[41, 48, 2, 0, 300, 0]);
        assert_eq!(style.background, Color::Named(NamedColor::Red));
    }

    #[test]
    fn test_extended_consumes_operands() {
        // The out-of-range operands are consumed, `1` still applies.
        let style = applied(&[38, 2, 300, 0, 0, 1]);
        assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);
        assert_eq!(style.attributes, AttributeFlags::BOLD);

        // Truncated forms consume past the end without panicking.
        let style = applied(&[38, 5]);
        assert_eq!(style, Style::default());
        let style = applied(&[48, 2, 1, 2]);
        assert_eq!(style, Style::default());
    }

    #[test]
    fn test_extended_unknown_selector() {
        // `7` is not a color selector, so it is read as Inverse.
        let style = applied(&[38, 7]);
        assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);
        assert_eq!(style.attributes, AttributeFlags::INVERSE);
    }

    #[test]
    fn test_underline_color_ignored() {
        assert_eq!(applied(&[58]), Style::default());
        assert_eq!(applied(&[59]), Style::default());

        // Only `58` itself is skipped.
        let style = applied(&[58, 5, 5]);
        assert_eq!(style.attributes, AttributeFlags::SLOW_BLINK);
        assert_eq!(style.foreground, Color::DEFAULT_FOREGROUND);

        let style = applied(&[58, 2, 1, 2, 3, 59]);
        assert_eq!(style.attributes, AttributeFlags::FAINT | AttributeFlags::ITALIC);
    }

    #[test]
    fn test_unknown_codes_ignored() {
        let style = applied(&[31, 56, 99, 1000, u32::MAX]);
        assert_eq!(style.foreground, Color::Named(NamedColor::Red));
        assert!(style.attributes.is_empty());
    }

    #[test]
    fn test_exclusive_partner() {
        assert_eq!(
            AttributeFlags::partner(AttributeFlags::BOLD),
            AttributeFlags::FAINT
        );
        assert_eq!(
            AttributeFlags::partner(AttributeFlags::SUBSCRIPT),
            AttributeFlags::SUPERSCRIPT
        );
        assert!(AttributeFlags::partner(AttributeFlags::INVERSE).is_empty());
        assert!(!(AttributeFlags::BOLD | AttributeFlags::FAINT).is_consistent());
        assert!((AttributeFlags::BOLD | AttributeFlags::ITALIC).is_consistent());
    }

    #[test]
    fn test_escape_marker() {
        let style = applied(&[1]).with_escape_marker();
        assert!(style.is_escape());
        assert_eq!(style.without_escape_marker(), applied(&[1]));
        assert!(Style::default().with_escape_marker().is_default());
    }
}
