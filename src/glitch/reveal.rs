//! Per-span reveal state machine
//!
//! `Idle -> (pointer enter) -> Animating -> (all waves expired) -> Idle`.
//! Entering again while animating adds a wave instead of restarting. The
//! frame loop itself is external: whoever owns a [`Reveal`] calls
//! [`Reveal::frame`] once per display frame while it reports
//! [`FrameOutcome::Continue`].

use crate::clock::{Clock, Millis};
use crate::text::{Bounds, RedactionSurface};

use super::config::GlitchConfig;
use super::wave::{scramble, Wave};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    Animating,
}

/// Whether the frame loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Stopped,
}

/// Glitch animation bound to one redacted span
#[derive(Debug)]
pub struct Reveal<S, C> {
    surface: S,
    clock: C,
    config: GlitchConfig,
    alphabet: Vec<char>,
    original_text: String,
    original: Vec<char>,
    waves: Vec<Wave>,
    phase: RevealPhase,
    hovering: bool,
    cursor: usize,
    captured_width: Option<f64>,
    next_wave_id: u64,
}

impl<S: RedactionSurface, C: Clock> Reveal<S, C> {
    /// Capture the span's text and prepare an idle engine
    ///
    /// An invalid config is replaced by the defaults.
    pub fn new(surface: S, config: GlitchConfig, clock: C) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; using default glitch config", e);
                GlitchConfig::default()
            }
        };
        let original_text = surface.original_text();

        Self {
            alphabet: config.alphabet(),
            original: original_text.chars().collect(),
            original_text,
            surface,
            clock,
            config,
            waves: Vec::new(),
            phase: RevealPhase::Idle,
            hovering: false,
            cursor: 0,
            captured_width: None,
            next_wave_id: 0,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_animating(&self) -> bool {
        self.phase == RevealPhase::Animating
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn captured_width(&self) -> Option<f64> {
        self.captured_width
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn config(&self) -> &GlitchConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Map a pointer x coordinate to a character index
    ///
    /// Proportional over the span's width, clamped to the text. Without usable
    /// geometry the answer is 0.
    pub fn cursor_for(&self, client_x: f64) -> usize {
        let len = self.original.len();
        if len == 0 {
            return 0;
        }
        match self.surface.bounds().filter(Bounds::is_measurable) {
            Some(bounds) if client_x.is_finite() => {
                let pos = ((client_x - bounds.left) / bounds.width * len as f64).round();
                pos.clamp(0.0, (len - 1) as f64) as usize
            }
            _ => 0,
        }
    }

    /// Pointer entered the span
    ///
    /// Returns `true` when the caller needs to start a frame loop.
    pub fn enter(&mut self, client_x: f64) -> bool {
        self.hovering = true;
        self.cursor = self.cursor_for(client_x);

        let wave = Wave::new(self.cursor, self.clock.now(), self.next_wave_id);
        self.next_wave_id += 1;
        self.waves.push(wave);

        if self.is_animating() {
            return false;
        }
        self.start();
        true
    }

    /// Pointer left the span; animation keeps running
    pub fn leave(&mut self) {
        self.hovering = false;
    }

    /// One display frame
    pub fn frame(&mut self) -> FrameOutcome {
        if !self.is_animating() {
            return FrameOutcome::Stopped;
        }

        let now = self.clock.now();
        let duration = self.config.duration;
        self.waves.retain(|w| !w.is_expired(now, duration));

        if self.waves.is_empty() {
            self.stop();
            return FrameOutcome::Stopped;
        }

        let text = self.render_at(now);
        self.surface.set_text(&text);
        FrameOutcome::Continue
    }

    /// Text the span would show at `now` under the current waves
    pub fn render_at(&self, now: Millis) -> String {
        scramble(&self.original, &self.waves, now, &self.config, &self.alphabet)
    }

    /// Drop all waves and return the span to its original state
    ///
    /// Safe to call repeatedly and in any phase. Cancelling a pending frame
    /// callback is the frame loop owner's job.
    pub fn teardown(&mut self) {
        self.waves.clear();
        self.hovering = false;
        self.stop();
    }

    fn start(&mut self) {
        if self.captured_width.is_none() {
            if let Some(bounds) = self.surface.bounds().filter(Bounds::is_measurable) {
                self.surface.lock_width(bounds.width);
                self.captured_width = Some(bounds.width);
            }
        }
        self.surface.set_active(true);
        self.phase = RevealPhase::Animating;
    }

    fn stop(&mut self) {
        self.surface.set_text(&self.original_text);
        self.surface.set_active(false);
        if self.captured_width.take().is_some() {
            self.surface.release_width();
        }
        self.phase = RevealPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::text::MemorySpan;

    fn reveal(text: &str, duration: f64) -> (Reveal<MemorySpan, ManualClock>, ManualClock) {
        let clock = ManualClock::new(0.0);
        let config = GlitchConfig {
            duration,
            spread: 1.0,
            ..GlitchConfig::default()
        };
        let span = MemorySpan::new(text).with_bounds(100.0, 200.0);
        (Reveal::new(span, config, clock.clone()), clock)
    }

    #[test]
    fn test_cursor_mapping() {
        let (r, _) = reveal("0123456789", 1000.0);
        assert_eq!(r.cursor_for(100.0), 0);
        assert_eq!(r.cursor_for(200.0), 5);
        assert_eq!(r.cursor_for(209.0), 5);
        assert_eq!(r.cursor_for(211.0), 6);
        // Clamped at both ends
        assert_eq!(r.cursor_for(50.0), 0);
        assert_eq!(r.cursor_for(300.0), 9);
        assert_eq!(r.cursor_for(f64::NAN), 0);
    }

    #[test]
    fn test_cursor_without_geometry_is_zero() {
        let span = MemorySpan::new("secret");
        let r = Reveal::new(span, GlitchConfig::default(), ManualClock::new(0.0));
        assert_eq!(r.cursor_for(500.0), 0);

        let zero_width = MemorySpan::new("secret").with_bounds(0.0, 0.0);
        let r = Reveal::new(zero_width, GlitchConfig::default(), ManualClock::new(0.0));
        assert_eq!(r.cursor_for(500.0), 0);
    }

    #[test]
    fn test_enter_starts_animation_and_locks_width() {
        let (mut r, _) = reveal("classified", 1000.0);
        assert_eq!(r.phase(), RevealPhase::Idle);

        assert!(r.enter(150.0));
        assert!(r.is_animating());
        assert!(r.is_hovering());
        assert!(r.surface().is_active());
        assert_eq!(r.surface().locked_width(), Some(200.0));
        assert_eq!(r.captured_width(), Some(200.0));
        assert_eq!(r.waves().len(), 1);
        assert_eq!(r.waves()[0].origin, 3);
    }

    #[test]
    fn test_no_width_lock_without_geometry() {
        let span = MemorySpan::new("classified");
        let mut r = Reveal::new(span, GlitchConfig::default(), ManualClock::new(0.0));
        assert!(r.enter(10.0));
        assert!(r.is_animating());
        assert_eq!(r.surface().locked_width(), None);
        assert_eq!(r.waves()[0].origin, 0);
    }

    #[test]
    fn test_leave_does_not_stop() {
        let (mut r, clock) = reveal("classified", 1000.0);
        r.enter(150.0);
        r.leave();
        assert!(!r.is_hovering());
        clock.advance(16.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);
        assert!(r.is_animating());
    }

    #[test]
    fn test_waves_expire_and_restore_original() {
        let (mut r, clock) = reveal("classified", 1000.0);
        r.enter(200.0);

        clock.set(300.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);
        assert_ne!(r.surface().text(), "classified");

        clock.set(999.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);

        clock.set(1000.0);
        assert_eq!(r.frame(), FrameOutcome::Stopped);
        assert_eq!(r.phase(), RevealPhase::Idle);
        assert_eq!(r.surface().text(), "classified");
        assert!(!r.surface().is_active());
        assert_eq!(r.surface().locked_width(), None);
        assert_eq!(r.captured_width(), None);
        assert!(r.waves().is_empty());
    }

    #[test]
    fn test_reentry_accumulates_waves() {
        let text = "abcdefghijklmnopqrst";
        let clock = ManualClock::new(0.0);
        let config = GlitchConfig {
            duration: 1000.0,
            spread: 1.0,
            ..GlitchConfig::default()
        };
        // 20 chars over 200px: 10px per char
        let span = MemorySpan::new(text).with_bounds(0.0, 200.0);
        let mut r = Reveal::new(span, config, clock.clone());

        assert!(r.enter(0.0));
        clock.set(100.0);
        // Second entry while animating: no new loop, one more wave
        assert!(!r.enter(190.0));
        assert_eq!(r.waves().len(), 2);
        assert_eq!(r.waves()[0].origin, 0);
        assert_eq!(r.waves()[1].origin, 19);
        assert_ne!(r.waves()[0].id, r.waves()[1].id);

        clock.set(200.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);
        // Both wavefronts are scrambled at once: the first wave's shell
        // covers distances 2..=4 from index 0, the second's reaches index 19
        let shown: Vec<char> = r.surface().text().chars().collect();
        let original: Vec<char> = text.chars().collect();
        assert_ne!(shown[2], original[2]);
        assert_ne!(shown[19], original[19]);
        assert_eq!(shown[10], original[10]);

        // The first wave expires at 1000, the second keeps going
        clock.set(1000.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);
        assert_eq!(r.waves().len(), 1);

        clock.set(1100.0);
        assert_eq!(r.frame(), FrameOutcome::Stopped);
        assert_eq!(r.surface().text(), text);
    }

    #[test]
    fn test_frame_when_idle_is_inert() {
        let (mut r, _) = reveal("secret", 1000.0);
        assert_eq!(r.frame(), FrameOutcome::Stopped);
        assert_eq!(r.surface().render_count(), 0);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let (mut r, clock) = reveal("classified", 1000.0);
        r.enter(200.0);
        clock.set(200.0);
        r.frame();

        r.teardown();
        assert_eq!(r.phase(), RevealPhase::Idle);
        assert!(r.waves().is_empty());
        assert_eq!(r.surface().text(), "classified");
        assert_eq!(r.surface().locked_width(), None);
        assert!(!r.surface().is_active());

        r.teardown();
        assert_eq!(r.surface().text(), "classified");
        assert_eq!(r.frame(), FrameOutcome::Stopped);
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let config = GlitchConfig {
            spread: 0.0,
            ..GlitchConfig::default()
        };
        let r = Reveal::new(MemorySpan::new("x"), config, ManualClock::new(0.0));
        assert_eq!(r.config(), &GlitchConfig::default());
    }

    #[test]
    fn test_empty_text_animates_without_panicking() {
        let (mut r, clock) = reveal("", 100.0);
        assert!(r.enter(150.0));
        assert_eq!(r.cursor(), 0);
        clock.set(50.0);
        assert_eq!(r.frame(), FrameOutcome::Continue);
        assert_eq!(r.surface().text(), "");
        clock.set(100.0);
        assert_eq!(r.frame(), FrameOutcome::Stopped);
    }
}
