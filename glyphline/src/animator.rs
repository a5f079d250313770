// Copyright 2026 the Glyphline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The text animator: style in, animated layers out.
//!
//! [`TextAnimator`] owns a [`LayerStore`] with one root layer. Every rebuild
//! lays the text out again and swaps the three children of the root
//! (background, stroke, fill, back to front) for freshly built ones. The old
//! children are detached and destroyed before the new ones are attached, and
//! nothing is touched when the rebuild fails.
//!
//! Playback and scrubbing are driven through the layers' clocks; the host
//! calls [`tick`](TextAnimator::tick) (or [`present`](TextAnimator::present))
//! once per frame with its monotonic time.

use std::fmt;

use glyphline_core::animation::AnimatedProperty;
use glyphline_core::backend::Presenter;
use glyphline_core::clock::LayerClock;
use glyphline_core::color::Color;
use glyphline_core::layer::{FrameChanges, LayerFlags, LayerId, LayerStore, ShapePaint};
use glyphline_core::time::HostTime;
use glyphline_core::timeline::{AnimationTimeline, TimelineState};
use glyphline_core::trace::{
    CycleEvent, CyclePhase, FrameEvent, RebuildEvent, ScrubEvent, TraceSink, Tracer,
    TransitionEvent,
};
use glyphline_text::{
    FontLibrary, LayoutEngine, PathBuilder, PathSet, PathStyle, TextAlignment, TextError,
    extract_outlines,
};
use kurbo::{Point, Rect};

use crate::style::{AnimatorConfig, StyleConfig};

/// Receives play-cycle notifications.
///
/// Each [`start_animation`](TextAnimator::start_animation) opens a cycle and
/// reports it once through `on_animation_start`. The cycle is closed exactly
/// once through `on_animation_stop`: with `finished = true` when the lead
/// animation runs to completion, `false` when it is stopped, restarted,
/// rebuilt, or cleared first.
pub trait AnimatorDelegate {
    /// A play cycle started.
    fn on_animation_start(&mut self, cycle: u64) {
        _ = cycle;
    }

    /// A play cycle ended.
    fn on_animation_stop(&mut self, cycle: u64, finished: bool) {
        _ = (cycle, finished);
    }
}

/// Handles of the three render layers of the current build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimatorLayers {
    /// Rounded rectangles behind each line.
    pub background: LayerId,
    /// Stroked glyph outline.
    pub stroke: LayerId,
    /// Filled glyph outline.
    pub fill: LayerId,
}

impl AnimatorLayers {
    /// Back to front.
    #[must_use]
    pub fn ordered(&self) -> [LayerId; 3] {
        [self.background, self.stroke, self.fill]
    }
}

#[derive(Clone, Copy, Debug)]
struct PlayCycle {
    cycle: u64,
    lead_layer: u32,
    lead: AnimatedProperty,
}

/// Builds glyph outline layers from a [`StyleConfig`] and animates them.
pub struct TextAnimator {
    style: StyleConfig,
    config: AnimatorConfig,
    fonts: FontLibrary,
    store: LayerStore,
    root: LayerId,
    layers: Option<AnimatorLayers>,
    paths: Option<PathSet>,
    timeline: AnimationTimeline,
    playing: Option<PlayCycle>,
    cycle_count: u64,
    rebuild_count: u64,
    frame_index: u64,
    delegate: Option<Box<dyn AnimatorDelegate>>,
    sink: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for TextAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAnimator")
            .field("style", &self.style)
            .field("state", &self.timeline.state())
            .field("layers", &self.layers)
            .field("rebuild_count", &self.rebuild_count)
            .finish_non_exhaustive()
    }
}

fn tracer(sink: &mut Option<Box<dyn TraceSink>>) -> Tracer<'_> {
    match sink.as_deref_mut() {
        Some(sink) => Tracer::new(sink),
        None => Tracer::none(),
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl TextAnimator {
    /// Creates an animator with an empty root layer.
    ///
    /// Nothing is laid out until the first rebuild, style change,
    /// [`start_animation`](Self::start_animation), or
    /// [`prepare_for_animation`](Self::prepare_for_animation).
    #[must_use]
    pub fn new(fonts: FontLibrary, style: StyleConfig, config: AnimatorConfig) -> Self {
        let mut store = LayerStore::new();
        let root = store.create_layer();
        Self {
            style,
            timeline: AnimationTimeline::new(config.timeline),
            config,
            fonts,
            store,
            root,
            layers: None,
            paths: None,
            playing: None,
            cycle_count: 0,
            rebuild_count: 0,
            frame_index: 0,
            delegate: None,
            sink: None,
        }
    }

    /// Installs the play-cycle delegate, returning the previous one.
    pub fn set_delegate(
        &mut self,
        delegate: Option<Box<dyn AnimatorDelegate>>,
    ) -> Option<Box<dyn AnimatorDelegate>> {
        core::mem::replace(&mut self.delegate, delegate)
    }

    /// Installs a trace sink, returning the previous one.
    ///
    /// Events are only emitted with the `trace` feature enabled.
    pub fn set_trace_sink(
        &mut self,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Option<Box<dyn TraceSink>> {
        core::mem::replace(&mut self.sink, sink)
    }

    // -- Accessors --

    /// The style of the current build.
    #[must_use]
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The fixed configuration.
    #[must_use]
    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    /// The font library.
    #[must_use]
    pub fn fonts(&self) -> &FontLibrary {
        &self.fonts
    }

    /// The font library, for registering more fonts. Takes effect on the next
    /// rebuild.
    pub fn fonts_mut(&mut self) -> &mut FontLibrary {
        &mut self.fonts
    }

    /// The layer tree presenters read from.
    #[must_use]
    pub fn store(&self) -> &LayerStore {
        &self.store
    }

    /// The root layer the render layers are attached to.
    #[must_use]
    pub fn root(&self) -> LayerId {
        self.root
    }

    /// The render layers, if built.
    #[must_use]
    pub fn layers(&self) -> Option<AnimatorLayers> {
        self.layers
    }

    /// The paths of the current build.
    #[must_use]
    pub fn paths(&self) -> Option<&PathSet> {
        self.paths.as_ref()
    }

    /// Current timeline mode.
    #[must_use]
    pub fn state(&self) -> TimelineState {
        self.timeline.state()
    }

    /// Number of rebuild attempts so far, failed ones included.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Presented stroke reveal fraction.
    #[must_use]
    pub fn stroke_reveal(&self) -> Option<f64> {
        self.layers
            .map(|layers| self.store.presentation(layers.stroke).stroke_end)
    }

    /// Presented fill color of the glyphs.
    #[must_use]
    pub fn fill_color(&self) -> Option<Color> {
        self.layers
            .map(|layers| self.store.presentation(layers.fill).fill)
    }

    /// Presented fill color of the backgrounds.
    #[must_use]
    pub fn background_color(&self) -> Option<Color> {
        self.layers
            .map(|layers| self.store.presentation(layers.background).fill)
    }

    // -- Style --

    /// Replaces the style and rebuilds.
    ///
    /// Cancels any play cycle. On error the previous style and layers stay in
    /// place.
    ///
    /// # Errors
    ///
    /// Propagates font resolution and glyph resolution failures.
    pub fn apply_style(&mut self, style: StyleConfig) -> Result<(), TextError> {
        self.rebuild_with(style)
    }

    /// Rebuilds with the current style.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn rebuild(&mut self) -> Result<(), TextError> {
        self.rebuild_with(self.style.clone())
    }

    fn update_style(&mut self, edit: impl FnOnce(&mut StyleConfig)) -> Result<(), TextError> {
        let mut style = self.style.clone();
        edit(&mut style);
        self.apply_style(style)
    }

    /// Sets the text and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), TextError> {
        let text = text.into();
        self.update_style(|s| s.text = text)
    }

    /// Sets the font family and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_font_family(&mut self, family: impl Into<String>) -> Result<(), TextError> {
        let family = family.into();
        self.update_style(|s| s.font_family = family)
    }

    /// Sets the font size and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_font_size(&mut self, size: f64) -> Result<(), TextError> {
        self.update_style(|s| s.font_size = size)
    }

    /// Shows or hides the stroke and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_stroke_enabled(&mut self, enabled: bool) -> Result<(), TextError> {
        self.update_style(|s| s.stroke_enabled = enabled)
    }

    /// Shows or hides the backgrounds and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_background_enabled(&mut self, enabled: bool) -> Result<(), TextError> {
        self.update_style(|s| s.background_enabled = enabled)
    }

    /// Sets the stroke color and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_stroke_color(&mut self, color: Color) -> Result<(), TextError> {
        self.update_style(|s| s.stroke_color = color)
    }

    /// Sets the glyph fill color and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_fill_color(&mut self, color: Color) -> Result<(), TextError> {
        self.update_style(|s| s.fill_color = color)
    }

    /// Sets the background color and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_background_color(&mut self, color: Color) -> Result<(), TextError> {
        self.update_style(|s| s.background_color = color)
    }

    /// Sets the reference surface size and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_reference_size(&mut self, size: kurbo::Size) -> Result<(), TextError> {
        self.update_style(|s| s.reference_size = size)
    }

    /// Sets the line alignment and rebuilds.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn set_alignment(&mut self, alignment: TextAlignment) -> Result<(), TextError> {
        self.update_style(|s| s.alignment = alignment)
    }

    // -- Playback --

    /// Rebuilds and plays the stroke reveal and fill fade-in from the start.
    ///
    /// Animations begin on the next [`tick`](Self::tick). Any running cycle
    /// is reported stopped (unfinished) before the new one is reported
    /// started.
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style). Nothing starts on error.
    pub fn start_animation(&mut self) -> Result<(), TextError> {
        self.rebuild()?;
        let Some(layers) = self.layers else {
            return Ok(());
        };

        let plan = self.timeline.play_plan(
            self.style.stroke_enabled,
            self.style.background_enabled,
            self.style.fill_color,
            self.style.background_color,
        );
        if let Some(stroke) = plan.stroke {
            self.store.add_animation(layers.stroke, stroke);
        }
        self.store.add_animation(layers.fill, plan.fill);
        if let Some(background) = plan.background {
            self.store.add_animation(layers.background, background);
        }
        let lead_layer = match plan.lead {
            AnimatedProperty::StrokeEnd => layers.stroke,
            AnimatedProperty::FillColor => layers.fill,
        };

        let from = self.timeline.play();
        self.trace_transition(from);

        self.cycle_count += 1;
        let cycle = self.cycle_count;
        self.playing = Some(PlayCycle {
            cycle,
            lead_layer: lead_layer.index(),
            lead: plan.lead,
        });
        if let Some(delegate) = &mut self.delegate {
            delegate.on_animation_start(cycle);
        }
        let at = self.store.current_time();
        tracer(&mut self.sink).cycle(&CycleEvent {
            cycle,
            phase: CyclePhase::Started,
            at,
        });
        Ok(())
    }

    /// Rebuilds and installs the stroke reveal on a paused clock, ready for
    /// [`update_scrub`](Self::update_scrub). The stroke starts hidden
    /// (reveal 0).
    ///
    /// # Errors
    ///
    /// See [`apply_style`](Self::apply_style).
    pub fn prepare_for_animation(&mut self) -> Result<(), TextError> {
        self.rebuild()?;
        let Some(layers) = self.layers else {
            return Ok(());
        };
        self.store
            .set_clock(layers.stroke, LayerClock::paused_at(0.0));
        self.store
            .add_animation(layers.stroke, self.timeline.scrub_animation());
        let from = self.timeline.prepare();
        self.trace_transition(from);
        Ok(())
    }

    /// Moves the scrub position to `value` (`0.0..=1.0`).
    ///
    /// Returns whether the position was applied. Outside of preparing or
    /// scrubbing the request is ignored.
    pub fn update_scrub(&mut self, value: f64) -> bool {
        let from = self.timeline.state();
        let offset = self.timeline.scrub(value);
        if let (Some(offset), Some(layers)) = (offset, self.layers) {
            self.store.set_time_offset(layers.stroke, offset);
        }
        tracer(&mut self.sink).scrub(&ScrubEvent {
            value,
            accepted: offset.is_some(),
            time_offset: offset.unwrap_or(0.0),
        });
        self.trace_transition(from);
        offset.is_some()
    }

    /// Stops the stroke reveal and the glyph fill where they are.
    ///
    /// The presented values stay on screen. A background fade-in keeps
    /// running.
    pub fn stop_animation(&mut self) {
        if let Some(layers) = self.layers {
            self.store.freeze_animations(layers.stroke);
            self.store.freeze_animations(layers.fill);
        }
        self.end_cycle(false);
        self.go_idle();
    }

    /// Removes and releases the three render layers.
    pub fn clear_animation_text(&mut self) {
        self.end_cycle(false);
        self.go_idle();
        self.detach_layers();
        self.paths = None;
    }

    /// Advances every clock to `now` and returns what changed.
    ///
    /// Reports the end of the play cycle when its lead animation finishes.
    pub fn tick(&mut self, now: HostTime) -> FrameChanges {
        let seconds = now.to_seconds(self.config.timebase);
        let changes = self.store.evaluate(seconds);
        self.frame_index += 1;

        if let Some(cycle) = self.playing {
            let lead_finished = changes
                .finished
                .iter()
                .any(|f| f.layer == cycle.lead_layer && f.property == cycle.lead);
            if lead_finished {
                self.end_cycle(true);
                self.go_idle();
            }
        }

        tracer(&mut self.sink).frame(&FrameEvent {
            frame_index: self.frame_index,
            now,
            seconds,
            animated: count(changes.animated.len()),
            finished: count(changes.finished.len()),
        });
        changes
    }

    /// Ticks and hands the changes to `presenter`.
    pub fn present(&mut self, now: HostTime, presenter: &mut dyn Presenter) {
        let changes = self.tick(now);
        presenter.apply(&self.store, &changes);
    }

    // -- Internals --

    fn rebuild_with(&mut self, style: StyleConfig) -> Result<(), TextError> {
        self.rebuild_count += 1;
        let (paths, line_count) = match self.build_paths(&style) {
            Ok(built) => built,
            Err(err) => {
                tracer(&mut self.sink).rebuild(&RebuildEvent {
                    rebuild_index: self.rebuild_count,
                    succeeded: false,
                    line_count: 0,
                    contour_count: 0,
                    bounds: Rect::ZERO,
                });
                return Err(err);
            }
        };

        self.end_cycle(false);
        self.go_idle();
        self.detach_layers();
        self.attach_layers(&style, &paths);

        tracer(&mut self.sink).rebuild(&RebuildEvent {
            rebuild_index: self.rebuild_count,
            succeeded: true,
            line_count: count(line_count),
            contour_count: count(paths.fill.contour_count()),
            bounds: paths.fill.bounding_box(),
        });
        self.style = style;
        self.paths = Some(paths);
        Ok(())
    }

    fn build_paths(&self, style: &StyleConfig) -> Result<(PathSet, usize), TextError> {
        let text = if style.text.is_empty() {
            self.config.fallback_text.as_deref().unwrap_or_default()
        } else {
            style.text.as_str()
        };
        let font = self.fonts.resolve(&style.font_family, style.font_size)?;
        let bounds = Rect::from_origin_size(Point::ZERO, style.reference_size);
        let lines =
            LayoutEngine::new(style.alignment).layout(text, &font, style.font_size, bounds)?;
        let outlines = extract_outlines(&lines, &font, style.font_size)?;
        let paths = PathBuilder::new(style.reference_size)
            .with_orientation(self.config.orientation)
            .with_placement(self.config.placement)
            .build(&outlines, PathStyle::for_font_size(style.font_size));
        Ok((paths, lines.len()))
    }

    fn attach_layers(&mut self, style: &StyleConfig, paths: &PathSet) {
        let store = &mut self.store;

        let background = store.create_layer();
        store.set_content(background, Some(paths.background.clone()));
        store.set_paint(background, ShapePaint::fill(style.background_color));
        store.set_flags(background, LayerFlags {
            hidden: !style.background_enabled,
        });

        let stroke = store.create_layer();
        store.set_content(stroke, Some(paths.stroke.clone()));
        store.set_paint(
            stroke,
            ShapePaint::stroke(style.stroke_color, paths.style.stroke_width),
        );
        store.set_flags(stroke, LayerFlags {
            hidden: !style.stroke_enabled,
        });

        let fill = store.create_layer();
        store.set_content(fill, Some(paths.fill.clone()));
        store.set_paint(fill, ShapePaint::fill(style.fill_color));

        let layers = AnimatorLayers {
            background,
            stroke,
            fill,
        };
        for id in layers.ordered() {
            store.add_child(self.root, id);
        }
        self.layers = Some(layers);
    }

    fn detach_layers(&mut self) {
        if let Some(layers) = self.layers.take() {
            for id in layers.ordered() {
                self.store.remove_from_parent(id);
                self.store.destroy_layer(id);
            }
        }
    }

    fn end_cycle(&mut self, finished: bool) {
        let Some(cycle) = self.playing.take() else {
            return;
        };
        if let Some(delegate) = &mut self.delegate {
            delegate.on_animation_stop(cycle.cycle, finished);
        }
        let at = self.store.current_time();
        tracer(&mut self.sink).cycle(&CycleEvent {
            cycle: cycle.cycle,
            phase: CyclePhase::Stopped { finished },
            at,
        });
    }

    fn go_idle(&mut self) {
        let from = self.timeline.stop();
        self.trace_transition(from);
    }

    fn trace_transition(&mut self, from: TimelineState) {
        let to = self.timeline.state();
        if from.name() == to.name() {
            return;
        }
        let at = self.store.current_time();
        tracer(&mut self.sink).transition(&TransitionEvent { from, to, at });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glyphline_core::time::Timebase;

    use super::*;

    const FIXTURE_FAMILY: &str = "DejaVu Sans Mono";

    fn fixture_fonts() -> FontLibrary {
        let mut fonts = FontLibrary::new();
        fonts.load_font_data(
            include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../fixtures/DejaVuSansMono.ttf"
            ))
            .to_vec(),
        );
        fonts
    }

    fn animator_with(style: StyleConfig, config: AnimatorConfig) -> TextAnimator {
        TextAnimator::new(fixture_fonts(), style, config)
    }

    fn animator() -> TextAnimator {
        animator_with(
            StyleConfig {
                font_family: FIXTURE_FAMILY.to_owned(),
                ..StyleConfig::default()
            },
            AnimatorConfig::default(),
        )
    }

    fn at(seconds: f64) -> HostTime {
        HostTime::from_seconds(seconds, Timebase::NANOS)
    }

    #[derive(Clone, Default)]
    struct Notifications(Rc<RefCell<Vec<(u64, Option<bool>)>>>);

    impl AnimatorDelegate for Notifications {
        fn on_animation_start(&mut self, cycle: u64) {
            self.0.borrow_mut().push((cycle, None));
        }

        fn on_animation_stop(&mut self, cycle: u64, finished: bool) {
            self.0.borrow_mut().push((cycle, Some(finished)));
        }
    }

    impl Notifications {
        fn take(&self) -> Vec<(u64, Option<bool>)> {
            core::mem::take(&mut *self.0.borrow_mut())
        }
    }

    fn observed() -> (TextAnimator, Notifications) {
        let mut anim = animator();
        let notes = Notifications::default();
        anim.set_delegate(Some(Box::new(notes.clone())));
        (anim, notes)
    }

    #[test]
    fn rebuild_attaches_three_layers_in_order() {
        let mut anim = animator();
        anim.rebuild().unwrap();
        let layers = anim.layers().unwrap();
        let children: Vec<LayerId> = anim.store().children(anim.root()).collect();
        assert_eq!(children, layers.ordered(), "background, stroke, fill");
        assert_eq!(anim.store().live_count(), 4, "root plus three layers");

        let paths = anim.paths().unwrap();
        assert!(paths.stroke.ptr_eq(&paths.fill), "shared glyph geometry");
        assert!(!paths.fill.is_empty());
        assert_eq!(
            anim.store().content(layers.fill).map(|p| p.bounding_box()),
            Some(paths.fill.bounding_box())
        );
        assert_eq!(anim.store().paint(layers.stroke).line_width, 20.0);

        anim.tick(at(0.0));
        assert!(
            anim.store().effective_hidden(layers.background),
            "background disabled by default"
        );
        assert!(!anim.store().effective_hidden(layers.stroke));
    }

    #[test]
    fn style_changes_replace_layers_without_accumulating() {
        let mut anim = animator();
        anim.rebuild().unwrap();
        let first = anim.layers().unwrap();
        for i in 0..5_u8 {
            anim.set_font_size(40.0 + f64::from(i)).unwrap();
        }
        assert_eq!(anim.rebuild_count(), 6, "one rebuild per change");
        assert_eq!(anim.store().live_count(), 4, "old layers are released");
        assert_eq!(anim.store().children(anim.root()).count(), 3);
        for id in first.ordered() {
            assert!(!anim.store().is_alive(id), "stale handle {id:?}");
        }
        assert_eq!(anim.style().font_size, 44.0);
    }

    #[test]
    fn failed_rebuild_keeps_previous_tree() {
        let mut anim = animator();
        anim.rebuild().unwrap();
        let layers = anim.layers().unwrap();
        let err = anim.set_font_family("No Such Family").unwrap_err();
        assert!(matches!(err, TextError::FontResolution { .. }), "{err}");
        assert_eq!(anim.layers(), Some(layers));
        assert!(anim.store().is_alive(layers.fill));
        assert_eq!(anim.style().font_family, FIXTURE_FAMILY, "style unchanged");
        assert!(anim.set_font_size(0.0).is_err(), "size must be positive");
        assert_eq!(anim.layers(), Some(layers));
    }

    #[test]
    fn empty_text_falls_back() {
        let mut anim = animator();
        anim.set_text("").unwrap();
        assert!(!anim.paths().unwrap().fill.is_empty(), "fallback text drawn");

        let mut bare = animator_with(
            StyleConfig {
                font_family: FIXTURE_FAMILY.to_owned(),
                text: String::new(),
                background_enabled: true,
                ..StyleConfig::default()
            },
            AnimatorConfig {
                fallback_text: None,
                ..AnimatorConfig::default()
            },
        );
        bare.rebuild().unwrap();
        let paths = bare.paths().unwrap();
        assert!(paths.stroke.is_empty() && paths.fill.is_empty() && paths.background.is_empty());
        assert!(paths.line_rects.is_empty());
    }

    #[test]
    fn whitespace_renders_nothing() {
        let mut anim = animator();
        anim.set_text("   ").unwrap();
        let paths = anim.paths().unwrap();
        assert!(paths.fill.is_empty());
        assert_eq!(paths.fill.bounding_box(), Rect::ZERO);
        assert!(paths.background.is_empty());
    }

    #[test]
    fn identical_inputs_build_identical_outlines() {
        let mut a = animator();
        let mut b = animator();
        a.set_text("Glyph line").unwrap();
        b.set_text("Glyph line").unwrap();
        let (pa, pb) = (a.paths().unwrap(), b.paths().unwrap());
        assert_eq!(pa.fill.bounding_box(), pb.fill.bounding_box());
        assert_eq!(pa.line_rects, pb.line_rects);
    }

    #[test]
    fn scrub_reveal_is_monotone() {
        let mut anim = animator();
        assert!(!anim.update_scrub(0.5), "ignored before prepare");
        anim.prepare_for_animation().unwrap();
        assert_eq!(anim.state(), TimelineState::Preparing);
        assert_eq!(anim.stroke_reveal(), Some(0.0));

        let mut last = -1.0;
        for step in 0..=10_u8 {
            let value = f64::from(step) / 10.0;
            assert!(anim.update_scrub(value));
            let reveal = anim.stroke_reveal().unwrap();
            assert!(reveal >= last, "reveal {reveal} after {last}");
            assert!((reveal - value).abs() < 1e-9, "reveal tracks the scrub value");
            last = reveal;
        }
        assert_eq!(anim.stroke_reveal(), Some(1.0));
        assert_eq!(anim.state(), TimelineState::Scrubbing { progress: 1.0 });

        anim.tick(at(30.0));
        assert_eq!(anim.stroke_reveal(), Some(1.0), "paused clock ignores time");
    }

    #[test]
    fn play_reports_start_and_finished_stop_once() {
        let (mut anim, notes) = observed();
        anim.start_animation().unwrap();
        assert_eq!(notes.take(), [(1, None)]);
        assert_eq!(anim.state(), TimelineState::Playing);
        assert_eq!(anim.stroke_reveal(), Some(0.0));

        anim.tick(at(10.0));
        anim.tick(at(12.0));
        let reveal = anim.stroke_reveal().unwrap();
        assert!((reveal - 0.5).abs() < 1e-9, "halfway through the stroke");
        assert!(
            anim.fill_color().unwrap().is_transparent(),
            "fill waits for the stroke"
        );

        anim.tick(at(13.9));
        assert!(notes.take().is_empty(), "still running");
        anim.tick(at(14.0));
        assert_eq!(notes.take(), [(1, Some(true))]);
        assert_eq!(anim.state(), TimelineState::Idle);

        anim.tick(at(20.0));
        assert!(notes.take().is_empty(), "no second stop");
        assert_eq!(anim.fill_color(), Some(Color::PURPLE));
        assert_eq!(anim.stroke_reveal(), Some(1.0));
    }

    #[test]
    fn fill_leads_without_stroke() {
        let (mut anim, notes) = observed();
        anim.set_stroke_enabled(false).unwrap();
        anim.start_animation().unwrap();
        anim.tick(at(0.0));
        anim.tick(at(1.0));
        let alpha = anim.fill_color().map(|c| c.a);
        assert!(
            alpha.is_some_and(|a| (a - 0.5).abs() < 1e-3),
            "fill fades in from the first frame: {alpha:?}"
        );
        anim.tick(at(1.9));
        assert_eq!(notes.take(), [(1, None)]);
        anim.tick(at(2.0));
        assert_eq!(notes.take(), [(1, Some(true))]);
        assert_eq!(anim.fill_color(), Some(Color::PURPLE));
    }

    #[test]
    fn interruptions_stop_unfinished() {
        let (mut anim, notes) = observed();
        anim.start_animation().unwrap();
        anim.tick(at(0.0));
        anim.start_animation().unwrap();
        assert_eq!(notes.take(), [(1, None), (1, Some(false)), (2, None)]);

        anim.set_text("Other").unwrap();
        assert_eq!(notes.take(), [(2, Some(false))], "rebuild cancels");
        assert_eq!(anim.state(), TimelineState::Idle);

        anim.start_animation().unwrap();
        anim.stop_animation();
        anim.stop_animation();
        assert_eq!(notes.take(), [(3, None), (3, Some(false))]);

        anim.start_animation().unwrap();
        anim.clear_animation_text();
        assert_eq!(notes.take(), [(4, None), (4, Some(false))]);
        anim.tick(at(60.0));
        assert!(notes.take().is_empty());
    }

    #[test]
    fn prepare_is_not_a_play_cycle() {
        let (mut anim, notes) = observed();
        anim.prepare_for_animation().unwrap();
        anim.update_scrub(1.0);
        anim.stop_animation();
        assert!(notes.take().is_empty());
    }

    #[test]
    fn stop_freezes_presented_state() {
        let mut anim = animator();
        anim.start_animation().unwrap();
        anim.tick(at(0.0));
        anim.tick(at(2.0));
        anim.stop_animation();
        let reveal = anim.stroke_reveal().unwrap();
        assert!((reveal - 0.5).abs() < 1e-9, "{reveal}");
        anim.tick(at(8.0));
        assert_eq!(anim.stroke_reveal(), Some(reveal), "frozen");
        let layers = anim.layers().unwrap();
        assert_eq!(anim.store().animation_count(layers.stroke), 0);
        assert_eq!(anim.store().animation_count(layers.fill), 0);
    }

    #[test]
    fn background_fades_in_over_fill_duration() {
        let mut anim = animator();
        anim.set_background_enabled(true).unwrap();
        anim.start_animation().unwrap();
        anim.tick(at(0.0));
        assert!(anim.background_color().unwrap().is_transparent());
        anim.tick(at(3.0));
        let mid = anim.background_color().unwrap();
        assert!((mid.a - 0.5).abs() < 1e-6, "halfway at 3 of 6 s: {mid:?}");
        anim.tick(at(6.0));
        assert_eq!(anim.background_color(), Some(Color::SYSTEM_BLUE));
        let layers = anim.layers().unwrap();
        assert!(!anim.store().effective_hidden(layers.background));
    }

    #[test]
    fn clear_releases_layers() {
        let mut anim = animator();
        anim.rebuild().unwrap();
        anim.clear_animation_text();
        assert!(anim.layers().is_none());
        assert!(anim.paths().is_none());
        assert_eq!(anim.store().live_count(), 1, "only the root remains");
        assert_eq!(anim.stroke_reveal(), None);
        anim.start_animation().unwrap();
        assert!(anim.layers().is_some(), "start builds again");
    }

    #[test]
    fn present_forwards_changes() {
        #[derive(Default)]
        struct Counting {
            frames: usize,
            added: Vec<u32>,
            removed: Vec<u32>,
        }
        impl Presenter for Counting {
            fn apply(&mut self, store: &LayerStore, changes: &FrameChanges) {
                self.frames += 1;
                self.added.extend(&changes.added);
                self.removed.extend(&changes.removed);
                for &idx in &changes.content {
                    let _ = store.content_at(idx);
                }
            }
        }

        let mut anim = animator();
        let mut presenter = Counting::default();
        anim.rebuild().unwrap();
        anim.present(at(0.0), &mut presenter);
        assert_eq!(presenter.frames, 1);
        assert_eq!(presenter.added.len(), 4, "root and three layers");

        anim.rebuild().unwrap();
        anim.present(at(0.1), &mut presenter);
        assert_eq!(presenter.removed.len(), 3, "previous layers removed");
        assert_eq!(presenter.added.len(), 7);
    }
}
