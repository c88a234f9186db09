// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::mem;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_gesture::{GestureAction, GestureState, PointerEvent};

use crate::bounds::BoundsCache;
use crate::config::{ConfigError, ZoomableConfig, validate_zoom_limits};
use crate::geometry::{AffineExt, union_bounds};
use crate::modes::Overflow;
use crate::placement::{Child, ChildSpec, Element};

/// Pan-and-zoom container over a set of freely positioned children.
///
/// `Zoomable` owns a content → viewport [`Affine`] and keeps it inside the
/// viewport: after every change the translation is clamped so that content
/// never drifts more than [`ZoomableConfig::padding`] pixels away from the
/// viewport edges, and the uniform scale stays within the configured limits.
/// The resulting transform is then pushed to every child.
///
/// Input arrives as [`PointerEvent`]s (drag to pan, two-pointer pinch to zoom)
/// and wheel ticks (discrete zoom under the cursor). Content and viewport
/// bounds are measured lazily and cached until a resize or a change to the
/// child set invalidates them.
#[derive(Clone, Debug)]
pub struct Zoomable<E> {
    config: ZoomableConfig,
    transform: Affine,
    viewport_size: Size,
    bounds: BoundsCache,
    gesture: GestureState,
    children: Vec<Child<E>>,
    revision: u64,
}

impl<E: Element> Default for Zoomable<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Element> Zoomable<E> {
    /// Creates an empty container with the default configuration, an identity
    /// transform, and a zero-sized viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ZoomableConfig::default(),
            transform: Affine::IDENTITY,
            viewport_size: Size::ZERO,
            bounds: BoundsCache::new(),
            gesture: GestureState::Idle,
            children: Vec::new(),
            revision: 0,
        }
    }

    /// Creates an empty container with `config`, rejecting invalid values.
    pub fn with_config(config: ZoomableConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut zoomable = Self::new();
        zoomable.config = config;
        Ok(zoomable)
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &ZoomableConfig {
        &self.config
    }

    /// Replaces the configuration and re-applies clamping and layout.
    pub fn set_config(&mut self, config: ZoomableConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.clamp();
        self.layout();
        Ok(())
    }

    /// Sets the padding kept between content and the viewport edges.
    pub fn set_padding(&mut self, padding: f64) -> Result<(), ConfigError> {
        self.set_config(self.config.with_padding(padding))
    }

    /// Sets whether content is clipped to the viewport.
    ///
    /// Bumps [`Zoomable::revision`] when the overflow mode changes.
    pub fn set_clipped(&mut self, clipped: bool) {
        if self.config.clipped != clipped {
            self.config.clipped = clipped;
            self.bump_revision();
        }
    }

    /// Sets the inclusive zoom limits.
    ///
    /// The current scale is not changed; the next zoom step snaps it into range.
    pub fn set_zoom_limits(&mut self, zoom_min: f64, zoom_max: f64) -> Result<(), ConfigError> {
        validate_zoom_limits(zoom_min, zoom_max)?;
        self.config.zoom_min = zoom_min;
        self.config.zoom_max = zoom_max;
        Ok(())
    }

    /// Overflow mode implied by [`ZoomableConfig::clipped`].
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.config.overflow()
    }

    /// Current content → viewport transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.transform.uniform_scale()
    }

    /// Counter incremented every time the transform or the overflow mode
    /// changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current gesture recognition state.
    #[must_use]
    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Converts a viewport point into content space using the live transform.
    #[must_use]
    pub fn convert(&self, view_point: Point) -> Point {
        self.transform.inverse() * view_point
    }

    /// Size of the viewport as last reported through [`Zoomable::resize`].
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Returns `true` if cached bounds are up to date.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.bounds.is_valid()
    }

    /// Union of all children's content-space bounds, measuring if stale.
    pub fn content_bounds(&mut self) -> Rect {
        self.validate();
        self.bounds.content()
    }

    /// Viewport rectangle (origin at zero), measuring if stale.
    pub fn viewport_bounds(&mut self) -> Rect {
        self.validate();
        self.bounds.viewport()
    }

    /// Managed children in layout order.
    #[must_use]
    pub fn children(&self) -> &[Child<E>] {
        &self.children
    }

    /// Number of managed children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if there are no managed children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Child<E>> {
        self.children.get(index)
    }

    /// Adds a child and returns its index.
    pub fn push_child(&mut self, spec: ChildSpec, element: E) -> usize {
        self.children.push(Child::new(spec, element));
        log::debug!("child added, {} managed", self.children.len());
        self.children_changed();
        self.children.len() - 1
    }

    /// Removes and returns the child at `index`.
    ///
    /// Later children shift down by one.
    pub fn remove_child(&mut self, index: usize) -> Option<Child<E>> {
        if index >= self.children.len() {
            return None;
        }
        let child = self.children.remove(index);
        log::debug!("child removed, {} managed", self.children.len());
        self.children_changed();
        Some(child)
    }

    /// Mutates the child at `index` and then re-measures, clamps, and lays out.
    ///
    /// Returns `false` if there is no such child.
    pub fn update_child(&mut self, index: usize, f: impl FnOnce(&mut Child<E>)) -> bool {
        let Some(child) = self.children.get_mut(index) else {
            return false;
        };
        f(child);
        self.children_changed();
        true
    }

    /// Notifies the container that the child set or child geometry changed
    /// through some path it did not observe.
    pub fn children_changed(&mut self) {
        self.invalidate();
        self.clamp();
        self.layout();
    }

    /// Notifies the container of a new viewport size.
    pub fn resize(&mut self, size: Size) {
        self.viewport_size = size;
        self.invalidate();
        self.clamp();
        self.layout();
    }

    /// Drops cached bounds and measures again immediately.
    pub fn revalidate(&mut self) {
        self.invalidate();
        self.validate();
    }

    /// Feeds one pointer event through the gesture state machine and applies
    /// the resulting pan or zoom.
    ///
    /// Returns the action that was applied, if any.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> Option<GestureAction> {
        let state = mem::take(&mut self.gesture);
        let (next, action) = state.transition(event, self.transform.inverse());
        self.gesture = next;
        match action {
            Some(GestureAction::Pan(delta)) => self.pan(delta),
            Some(GestureAction::Zoom { anchor, factor }) => self.zoom(anchor, factor),
            None => {}
        }
        action
    }

    /// Applies one wheel tick at viewport position `position`.
    ///
    /// Positive `delta_y` zooms out, anything else zooms in.
    pub fn wheel(&mut self, position: Point, delta_y: f64) {
        let factor = self.config.wheel.factor(delta_y);
        self.zoom(self.convert(position), factor);
    }

    /// Zooms by `factor` keeping the content point `anchor` fixed on screen.
    ///
    /// The factor is adjusted so the resulting scale lands inside
    /// `[zoom_min, zoom_max]`.
    pub fn zoom(&mut self, anchor: Point, factor: f64) {
        debug_assert!(factor.is_finite(), "zoom factor must be finite");
        let current = self.transform.as_coeffs()[0];
        let target = current * factor;
        let factor = if target > self.config.zoom_max {
            self.config.zoom_max / current
        } else if target < self.config.zoom_min {
            self.config.zoom_min / current
        } else {
            factor
        };
        self.set_transform(self.transform.zoomed_about(anchor, factor));
        self.clamp();
        self.layout();
    }

    /// Pans by `delta` content units.
    pub fn pan(&mut self, delta: Vec2) {
        self.set_transform(self.transform.translated(delta));
        self.clamp();
        self.layout();
    }

    /// Zooms in by one step around the viewport center.
    pub fn zoom_in(&mut self) {
        let anchor = self.center_anchor();
        self.zoom(anchor, self.config.zoom_in_step);
    }

    /// Zooms out by one step around the viewport center.
    pub fn zoom_out(&mut self) {
        let anchor = self.center_anchor();
        self.zoom(anchor, self.config.zoom_out_step);
    }

    /// Zooms to the absolute scale `target` around the viewport center.
    pub fn set_zoom(&mut self, target: f64) {
        let current = self.transform.as_coeffs()[0];
        let factor = if current != 0.0 { target / current } else { 1.0 };
        let anchor = self.center_anchor();
        self.zoom(anchor, factor);
    }

    /// Scales and centers the content to fill the viewport minus padding.
    ///
    /// `zoom_min` is lowered if the fitting scale is below it. Does nothing if
    /// the content has no area or the viewport has no room left after padding.
    pub fn fit(&mut self) {
        self.validate();
        let content = self.bounds.content();
        let viewport = self.bounds.viewport();
        if content.width() <= 0.0 || content.height() <= 0.0 {
            log::debug!("fit skipped: empty content bounds {content:?}");
            return;
        }
        let padding = self.config.padding;
        let scale = ((viewport.width() - 2.0 * padding) / content.width())
            .min((viewport.height() - 2.0 * padding) / content.height());
        if !scale.is_finite() || scale <= 0.0 {
            log::debug!("fit skipped: no room in viewport {viewport:?}");
            return;
        }
        self.config.zoom_min = self.config.zoom_min.min(scale);
        let e = (viewport.width() - content.width() * scale) / 2.0 - content.x0 * scale;
        let f = (viewport.height() - content.height() * scale) / 2.0 - content.y0 * scale;
        self.set_transform(Affine::new([scale, 0.0, 0.0, scale, e, f]));
        self.clamp();
        self.layout();
    }

    /// Constrains the translation so content stays within `padding` of the
    /// viewport edges.
    ///
    /// On each axis the translation is clamped to
    /// `[padding - content_max * s, viewport_extent - content_min * s - padding]`.
    /// When the viewport is too small to honor the padding on both sides the
    /// range is inverted; the lower bound then wins, pinning the content's far
    /// edge at `padding`.
    pub fn clamp(&mut self) {
        self.validate();
        let content = self.bounds.content();
        let viewport = self.bounds.viewport();
        let padding = self.config.padding;
        let s = self.transform.uniform_scale();
        let [.., e, f] = self.transform.as_coeffs();

        let clamp_axis = |value: f64, min: f64, max: f64, extent: f64| {
            let lower = padding - max * s;
            let upper = extent - min * s - padding;
            lower.max(upper.min(value))
        };
        let e2 = clamp_axis(e, content.x0, content.x1, viewport.width());
        let f2 = clamp_axis(f, content.y0, content.y1, viewport.height());

        if e2 != e || f2 != f {
            self.set_transform(self.transform.with_translation(Vec2::new(e2, f2)));
        }
    }

    /// Pushes the current transform to every child.
    pub fn layout(&mut self) {
        let transform = self.transform;
        for child in &mut self.children {
            child.apply_transform(transform);
        }
    }

    fn center_anchor(&mut self) -> Point {
        let center = self.viewport_bounds().center();
        self.convert(center)
    }

    fn set_transform(&mut self, transform: Affine) {
        debug_assert!(transform.is_finite(), "non-finite transform {transform:?}");
        self.transform = transform;
        self.bump_revision();
    }

    fn bump_revision(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    fn invalidate(&mut self) {
        self.bounds.invalidate();
    }

    fn validate(&mut self) {
        let children = &self.children;
        let viewport_size = self.viewport_size;
        let measured = self.bounds.validate_with(|| {
            let content = union_bounds(children.iter().map(Child::report_bounds));
            let viewport = Rect::from_origin_size(Point::ZERO, viewport_size);
            (content, viewport)
        });
        if measured {
            log::debug!(
                "measured content {:?}, viewport {:?}",
                self.bounds.content(),
                self.bounds.viewport()
            );
        }
    }
}
