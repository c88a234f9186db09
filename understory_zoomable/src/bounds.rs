// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generation-keyed cache for content and viewport bounds.

use kurbo::Rect;

/// Memoized content and viewport bounds.
///
/// Measurement is potentially expensive (it asks every child for its size), so
/// results are cached until something invalidates them. Each
/// [`BoundsCache::invalidate`] bumps a generation counter; the cache is valid
/// only if it was last validated at the current generation.
///
/// ```
/// use kurbo::Rect;
/// use understory_zoomable::BoundsCache;
///
/// let mut cache = BoundsCache::new();
/// assert!(!cache.is_valid());
///
/// let mut measured = 0;
/// let view = Rect::new(0.0, 0.0, 800.0, 600.0);
/// cache.validate_with(|| {
///     measured += 1;
///     (Rect::new(0.0, 0.0, 10.0, 10.0), view)
/// });
/// cache.validate_with(|| unreachable!("already valid"));
/// assert_eq!(measured, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoundsCache {
    content: Rect,
    viewport: Rect,
    generation: u64,
    validated: Option<u64>,
}

impl BoundsCache {
    /// Creates an empty, stale cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the cached rects reflect the current generation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validated == Some(self.generation)
    }

    /// Returns the current generation.
    ///
    /// The generation is incremented on every [`BoundsCache::invalidate`].
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Marks the cache stale and resets both rects to [`Rect::ZERO`].
    pub fn invalidate(&mut self) {
        self.content = Rect::ZERO;
        self.viewport = Rect::ZERO;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Runs `measure` and stores its `(content, viewport)` result, unless the
    /// cache is already valid.
    ///
    /// Returns `true` if a measurement happened.
    pub fn validate_with(&mut self, measure: impl FnOnce() -> (Rect, Rect)) -> bool {
        if self.is_valid() {
            return false;
        }
        let (content, viewport) = measure();
        self.content = content;
        self.viewport = viewport;
        self.validated = Some(self.generation);
        true
    }

    /// Content bounds as of the last validation (or [`Rect::ZERO`] when stale).
    #[must_use]
    pub fn content(&self) -> Rect {
        self.content
    }

    /// Viewport bounds as of the last validation (or [`Rect::ZERO`] when stale).
    #[must_use]
    pub fn viewport(&self) -> Rect {
        self.viewport
    }
}
