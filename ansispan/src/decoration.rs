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


//! Resolution of style keys into host decorations.
//!
//! A [`DecorationMap`] says *where* each style applies. This module decides
//! *how* a style looks ([`Decoration`]), asks the host to create a matching
//! decoration through a [`DecorationRegistry`], caches the handle per
//! [`StyleKey`], and hands the ranges to a [`DecorationTarget`].
//!
//! Handles live as long as the [`DecorationProvider`] that created them and
//! are disposed when it is disposed or dropped.

use crate::consts::DIMMED_OPACITY_PERCENT;
use crate::style::{AttributeFlags, Color, NamedColor, Style};
use crate::{AnsiSpanError, AnsiSpanResult, DecorationMap, StyleKey, StyleRange};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// A color as the host understands it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DecorationColor {
    /// A color from the host theme, e.g. `terminal.ansiRed`.
    Theme(&'static str),
    /// An exact color in `#rrggbb` form.
    Hex(String),
}

impl DecorationColor {
    /// Maps a resolved color, `None` for the default sentinels.
    pub fn from_color(color: &Color) -> Option<DecorationColor> {
        match color {
            Color::Named(named) => theme_color_name(*named).map(DecorationColor::Theme),
            Color::Rgb(r, g, b) => Some(DecorationColor::Hex(format!(
                "#{:02x}{:02x}{:02x}",
                r, g, b
            ))),
        }
    }
}

/// Theme color used for a named color, `None` for the default sentinels.
pub fn theme_color_name(color: NamedColor) -> Option<&'static str> {
    let name = match color {
        NamedColor::Black => "terminal.ansiBlack",
        NamedColor::Red => "terminal.ansiRed",
        NamedColor::Green => "terminal.ansiGreen",
        NamedColor::Yellow => "terminal.ansiYellow",
        NamedColor::Blue => "terminal.ansiBlue",
        NamedColor::Magenta => "terminal.ansiMagenta",
        NamedColor::Cyan => "terminal.ansiCyan",
        NamedColor::White => "terminal.ansiWhite",
        NamedColor::BrightBlack => "terminal.ansiBrightBlack",
        NamedColor::BrightRed => "terminal.ansiBrightRed",
        NamedColor::BrightGreen => "terminal.ansiBrightGreen",
        NamedColor::BrightYellow => "terminal.ansiBrightYellow",
        NamedColor::BrightBlue => "terminal.ansiBrightBlue",
        NamedColor::BrightMagenta => "terminal.ansiBrightMagenta",
        NamedColor::BrightCyan => "terminal.ansiBrightCyan",
        NamedColor::BrightWhite => "terminal.ansiBrightWhite",
        NamedColor::DefaultForeground | NamedColor::DefaultBackground => return None,
    };
    Some(name)
}

/// Font weight override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Bold text
    Bold,
}

/// Font style override.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Italic text
    Italic,
}

/// Text decoration line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextDecoration {
    /// Single underline
    Underline,
}

/// Opacity in percent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Opacity(pub u8);

/// The presentational form of a style.
///
/// Only what an editor can show is carried over: colors, bold, italic,
/// underline, and faint as half opacity. Every field left `None` means the
/// host's default applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decoration {
    /// Text color
    pub color: Option<DecorationColor>,
    /// Background color
    pub background_color: Option<DecorationColor>,
    /// Font weight
    pub font_weight: Option<FontWeight>,
    /// Font style
    pub font_style: Option<FontStyle>,
    /// Underline and similar
    pub text_decoration: Option<TextDecoration>,
    /// Opacity
    pub opacity: Option<Opacity>,
}

impl Decoration {
    /// Translates a style.
    pub fn from_style(style: &Style) -> Decoration {
        let attributes = style.attributes;
        Decoration {
            color: DecorationColor::from_color(&style.foreground),
            background_color: DecorationColor::from_color(&style.background),
            font_weight: attributes
                .contains(AttributeFlags::BOLD)
                .then_some(FontWeight::Bold),
            font_style: attributes
                .contains(AttributeFlags::ITALIC)
                .then_some(FontStyle::Italic),
            text_decoration: attributes
                .contains(AttributeFlags::UNDERLINE)
                .then_some(TextDecoration::Underline),
            opacity: attributes
                .contains(AttributeFlags::FAINT)
                .then_some(Opacity(DIMMED_OPACITY_PERCENT)),
        }
    }

    /// The decoration for raw escape text: dimmed, nothing else.
    pub fn escape() -> Decoration {
        Decoration {
            opacity: Some(Opacity(DIMMED_OPACITY_PERCENT)),
            ..Default::default()
        }
    }

    /// Resolves a style key, including the reserved escape key.
    pub fn resolve(key: &StyleKey) -> AnsiSpanResult<Decoration> {
        if key.is_escape() {
            return Ok(Decoration::escape());
        }
        Ok(Decoration::from_style(&key.to_style()?))
    }

    /// Whether the decoration changes nothing.
    pub fn is_empty(&self) -> bool {
        self == &Decoration::default()
    }
}

/// Host service that turns decorations into live handles.
///
/// Implementations are called from [`DecorationProvider`] and may be shared
/// between threads, hence `&self`.
pub trait DecorationRegistry {
    /// Host-side handle for a created decoration.
    type Handle: Clone;

    /// Creates a decoration, `None` if the host cannot provide one.
    fn create(&self, decoration: &Decoration) -> Option<Self::Handle>;

    /// Releases a handle. Called exactly once per created handle.
    fn dispose(&self, handle: &Self::Handle);
}

impl<R: DecorationRegistry> DecorationRegistry for Arc<R> {
    type Handle = R::Handle;

    fn create(&self, decoration: &Decoration) -> Option<Self::Handle> {
        self.as_ref().create(decoration)
    }

    fn dispose(&self, handle: &Self::Handle) {
        self.as_ref().dispose(handle)
    }
}

/// Host view that displays decorations over a range set.
pub trait DecorationTarget<H> {
    /// Replaces the ranges shown with `handle`.
    fn set_decorations(&mut self, handle: &H, ranges: &[StyleRange]);
}

/// Handles created per style key.
///
/// Creation for a key runs while that key's shard is locked, so concurrent
/// callers asking for the same missing key create it once.
#[derive(Debug)]
pub struct DecorationCache<H> {
    entries: DashMap<StyleKey, H>,
}

impl<H> Default for DecorationCache<H> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<H> DecorationCache<H> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no handles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether a handle exists for `key`.
    pub fn contains(&self, key: &StyleKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes every handle, passing each to `dispose`. Returns how many were removed.
    ///
    /// A second call finds the cache empty and does nothing.
    pub fn dispose_all<F>(&self, mut dispose: F) -> usize
    where
        F: FnMut(&StyleKey, &H),
    {
        let mut disposed = 0;
        self.entries.retain(|key, handle| {
            dispose(key, handle);
            disposed += 1;
            false
        });
        disposed
    }
}

impl<H: Clone> DecorationCache<H> {
    /// The cached handle for `key`.
    pub fn get(&self, key: &StyleKey) -> Option<H> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Caches `handle` under `key`, returning any handle it replaces.
    pub fn insert(&self, key: StyleKey, handle: H) -> Option<H> {
        self.entries.insert(key, handle)
    }

    /// Returns the cached handle for `key`, creating it with `create` on a miss.
    ///
    /// Nothing is cached when `create` fails.
    pub fn get_or_try_insert_with<F>(&self, key: &StyleKey, create: F) -> AnsiSpanResult<H>
    where
        F: FnOnce() -> AnsiSpanResult<H>,
    {
        if let Some(handle) = self.get(key) {
            return Ok(handle);
        }
        let entry = self.entries.entry(key.clone()).or_try_insert_with(create)?;
        Ok(entry.value().clone())
    }
}

/// Resolves style keys into cached host decorations and applies them.
///
/// The provider starts with the escape decoration already created. Dropping
/// it disposes every handle it created; [`dispose`](DecorationProvider::dispose)
/// does the same earlier and may be called any number of times.
///
/// # Examples
///
/// ```rust
/// use ansispan::{AnsiDocument, AnsiSpanConfig, DecorationProvider};
/// # use ansispan::{Decoration, DecorationRegistry, DecorationTarget, StyleRange};
/// # struct Registry;
/// # impl DecorationRegistry for Registry {
/// #     type Handle = Decoration;
/// #     fn create(&self, decoration: &Decoration) -> Option<Decoration> { Some(decoration.clone()) }
/// #     fn dispose(&self, _: &Decoration) {}
/// # }
/// # struct Editor;
/// # impl DecorationTarget<Decoration> for Editor {
/// #     fn set_decorations(&mut self, _: &Decoration, _: &[StyleRange]) {}
/// # }
///
/// let document = AnsiDocument::parse("\x1b[1mbold\x1b[0m", &AnsiSpanConfig::default());
/// let provider = DecorationProvider::new(Registry);
/// let applied = provider.set_decorations(document.decorations(), &mut Editor);
/// assert_eq!(applied, 1);
/// ```
pub struct DecorationProvider<R: DecorationRegistry> {
    registry: R,
    cache: DecorationCache<R::Handle>,
}

impl<R> std::fmt::Debug for DecorationProvider<R>
where
    R: DecorationRegistry + std::fmt::Debug,
    R::Handle: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorationProvider")
            .field("registry", &self.registry)
            .field("cache", &self.cache)
            .finish()
    }
}

impl<R: DecorationRegistry> DecorationProvider<R> {
    /// Creates a provider backed by `registry`.
    pub fn new(registry: R) -> Self {
        let provider = Self {
            registry,
            cache: DecorationCache::new(),
        };
        match provider.registry.create(&Decoration::escape()) {
            Some(handle) => {
                provider.cache.insert(StyleKey::escape(), handle);
            }
            None => debug!("Registry provided no escape decoration"),
        }
        provider
    }

    /// The backing registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The handle cache.
    pub fn cache(&self) -> &DecorationCache<R::Handle> {
        &self.cache
    }

    /// Returns the handle for `key`, creating and caching it on first use.
    pub fn resolve(&self, key: &StyleKey) -> AnsiSpanResult<R::Handle> {
        self.cache.get_or_try_insert_with(key, || {
            let decoration = Decoration::resolve(key)?;
            debug!("Creating decoration for style key {}", key);
            self.registry
                .create(&decoration)
                .ok_or_else(|| AnsiSpanError::UnresolvedStyle {
                    key: key.to_string(),
                })
        })
    }

    /// Applies every key's ranges to `target`, returning how many keys were applied.
    ///
    /// A key that fails to resolve is logged and skipped; the remaining keys
    /// are still applied.
    #[instrument(skip_all, fields(keys = decorations.len()))]
    pub fn set_decorations<T>(&self, decorations: &DecorationMap, target: &mut T) -> usize
    where
        T: DecorationTarget<R::Handle>,
    {
        let mut applied = 0;
        for (key, ranges) in decorations {
            match self.resolve(key) {
                Ok(handle) => {
                    target.set_decorations(&handle, ranges);
                    applied += 1;
                }
                Err(error) => {
                    error!("Error providing decorations for key {}: {}", key, error);
                }
            }
        }
        applied
    }

    /// Disposes every cached handle, returning how many were disposed.
    pub fn dispose(&self) -> usize {
        let disposed = self.cache.dispose_all(|key, handle| {
            debug!("Disposing decoration for style key {}", key);
            self.registry.dispose(handle);
        });
        if disposed > 0 {
            debug!("Disposed {} decorations", disposed);
        }
        disposed
    }
}

impl<R: DecorationRegistry> Drop for DecorationProvider<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnsiSpanConfig, extract_decoration_ranges};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    #[derive(Default)]
    struct RecordingRegistry {
        created: Mutex<Vec<Decoration>>,
        disposed: AtomicUsize,
    }

    impl DecorationRegistry for RecordingRegistry {
        type Handle = usize;

        fn create(&self, decoration: &Decoration) -> Option<usize> {
            let mut created = self.created.lock().unwrap();
            created.push(decoration.clone());
            Some(created.len() - 1)
        }

        fn dispose(&self, _handle: &usize) {
            self.disposed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct RecordingTarget {
        applied: HashMap<usize, Vec<StyleRange>>,
    }

    impl DecorationTarget<usize> for RecordingTarget {
        fn set_decorations(&mut self, handle: &usize, ranges: &[StyleRange]) {
            self.applied.insert(*handle, ranges.to_vec());
        }
    }

    fn style(codes: &[u32]) -> Style {
        let mut style = Style::default();
        style.apply_codes(codes);
        style
    }

    #[test]
    fn test_decoration_from_style() {
        let decoration = Decoration::from_style(&style(&[1, 3, 4, 31, 48, 2, 255, 128, 0]));
        assert_eq!(
            decoration.color,
            Some(DecorationColor::Theme("terminal.ansiRed"))
        );
        assert_eq!(
            decoration.background_color,
            Some(DecorationColor::Hex("#ff8000".to_string()))
        );
        assert_eq!(decoration.font_weight, Some(FontWeight::Bold));
        assert_eq!(decoration.font_style, Some(FontStyle::Italic));
        assert_eq!(decoration.text_decoration, Some(TextDecoration::Underline));
        assert_eq!(decoration.opacity, None);
    }

    #[test]
    fn test_decoration_faint() {
        let decoration = Decoration::from_style(&style(&[2]));
        assert_eq!(decoration.opacity, Some(Opacity(50)));
        assert_eq!(decoration.font_weight, None);
    }

    #[test]
    fn test_default_style_is_empty_decoration() {
        assert!(Decoration::from_style(&Style::default()).is_empty());
        // Attributes with no presentation map to nothing.
        assert!(Decoration::from_style(&style(&[5, 7, 9, 53])).is_empty());
        assert!(!Decoration::escape().is_empty());
    }

    #[test]
    fn test_theme_color_names() {
        for index in 0..16 {
            let named = NamedColor::from_index(index).unwrap();
            let name = theme_color_name(named).unwrap();
            assert!(name.starts_with("terminal.ansi"));
            assert_eq!(name.contains("Bright"), named.is_bright());
        }
        assert_eq!(theme_color_name(NamedColor::DefaultForeground), None);
        assert_eq!(
            DecorationColor::from_color(&Color::Rgb(0, 10, 255)),
            Some(DecorationColor::Hex("#000aff".to_string()))
        );
    }

    #[test]
    fn test_resolve_escape_key() {
        assert_eq!(
            Decoration::resolve(&StyleKey::escape()).unwrap(),
            Decoration::escape()
        );
    }

    #[test]
    fn test_provider_seeds_escape() {
        let provider = DecorationProvider::new(RecordingRegistry::default());
        assert!(provider.cache().contains(&StyleKey::escape()));
        assert_eq!(provider.resolve(&StyleKey::escape()).unwrap(), 0);
    }

    #[test]
    fn test_provider_caches_handles() {
        let provider = DecorationProvider::new(RecordingRegistry::default());
        let key = StyleKey::from_style(&style(&[1]));
        let first = provider.resolve(&key).unwrap();
        let second = provider.resolve(&key).unwrap();
        assert_eq!(first, second);
        assert_eq!(provider.registry().created.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_set_decorations() {
        let decorations = extract_decoration_ranges(
            "\x1b[1mbold\x1b[0m \x1b[3mitalic\x1b[0m\n\x1b[1mbold",
            &AnsiSpanConfig::editor(),
        );
        let provider = DecorationProvider::new(RecordingRegistry::default());
        let mut target = RecordingTarget::default();

        assert_eq!(provider.set_decorations(&decorations, &mut target), 2);
        assert_eq!(target.applied.len(), 2);

        let bold = provider.resolve(&StyleKey::from_style(&style(&[1]))).unwrap();
        assert_eq!(
            target.applied[&bold],
            vec![StyleRange::new(0, 0, 4), StyleRange::new(1, 0, 4)]
        );
    }

    #[test]
    #[traced_test]
    fn test_malformed_key_skipped() {
        let mut decorations = DecorationMap::new();
        decorations.insert(
            StyleKey::from("{broken".to_string()),
            vec![StyleRange::new(0, 0, 1)],
        );
        decorations.insert(
            StyleKey::from_style(&style(&[4])),
            vec![StyleRange::new(0, 1, 2)],
        );

        let provider = DecorationProvider::new(RecordingRegistry::default());
        let mut target = RecordingTarget::default();

        assert_eq!(provider.set_decorations(&decorations, &mut target), 1);
        assert_eq!(target.applied.len(), 1);
        assert!(!provider.cache().contains(&StyleKey::from("{broken".to_string())));
        assert!(logs_contain("Error providing decorations for key {broken"));
    }

    #[test]
    fn test_unresolved_key() {
        struct EmptyRegistry;
        impl DecorationRegistry for EmptyRegistry {
            type Handle = ();
            fn create(&self, _: &Decoration) -> Option<()> {
                None
            }
            fn dispose(&self, _: &()) {}
        }

        let provider = DecorationProvider::new(EmptyRegistry);
        assert!(provider.cache().is_empty());
        let result = provider.resolve(&StyleKey::from_style(&style(&[1])));
        assert!(matches!(result, Err(AnsiSpanError::UnresolvedStyle { .. })));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let registry = Arc::new(RecordingRegistry::default());
        let provider = DecorationProvider::new(Arc::clone(&registry));
        provider.resolve(&StyleKey::from_style(&style(&[1]))).unwrap();
        provider.resolve(&StyleKey::from_style(&style(&[2]))).unwrap();

        assert_eq!(provider.dispose(), 3);
        assert_eq!(provider.dispose(), 0);
        assert!(provider.cache().is_empty());

        drop(provider);
        assert_eq!(registry.disposed.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_drop_disposes() {
        let registry = Arc::new(RecordingRegistry::default());
        {
            let provider = DecorationProvider::new(Arc::clone(&registry));
            provider.resolve(&StyleKey::from_style(&style(&[31]))).unwrap();
        }
        assert_eq!(registry.disposed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_resolve_creates_once() {
        let provider = DecorationProvider::new(RecordingRegistry::default());
        let key = StyleKey::from_style(&style(&[1, 31]));

        let handles: Vec<usize> = std::thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| provider.resolve(&key).unwrap()))
                .collect();
            workers
                .into_iter()
                .map(|worker| worker.join().unwrap())
                .collect()
        });

        assert!(handles.iter().all(|handle| *handle == handles[0]));
        // One escape decoration plus one for the key.
        assert_eq!(provider.registry().created.lock().unwrap().len(), 2);
    }
}
