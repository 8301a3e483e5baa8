//! Wave math
//!
//! A wave starts at a character index and grows outward until its duration
//! runs out. Characters inside the radius are "affected"; the ones in a thin
//! shell just inside the wavefront show decoy glyphs that shift over time.
//! Everything here is pure so it can be checked against a fixed clock.

use crate::clock::Millis;

use super::config::GlitchConfig;

/// Intensity band (radius minus distance) that shows decoy glyphs
pub const WAVE_THRESHOLD: f64 = 3.0;
/// Spacing of decoy glyphs between neighbouring characters
pub const CHAR_MULTIPLIER: usize = 3;
/// Decoy glyphs advance once per step
pub const ANIM_STEP_MS: f64 = 40.0;
/// Extra radius so the wave clears the far edge before it expires
pub const WAVE_BUFFER: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub origin: usize,
    pub started_at: Millis,
    pub id: u64,
}

/// Result of evaluating all waves at one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharEffect {
    pub affected: bool,
    pub glyph: char,
}

impl Wave {
    pub fn new(origin: usize, started_at: Millis, id: u64) -> Self {
        Self {
            origin,
            started_at,
            id,
        }
    }

    pub fn age(&self, now: Millis) -> Millis {
        now - self.started_at
    }

    pub fn is_expired(&self, now: Millis, duration: Millis) -> bool {
        self.age(now) >= duration
    }

    /// Radius at `now` over a text of `len` characters
    pub fn radius(&self, now: Millis, len: usize, config: &GlitchConfig) -> f64 {
        let progress = (self.age(now) / config.duration).clamp(0.0, 1.0);
        let origin = self.origin as f64;
        let max_distance = origin.max(len as f64 - origin - 1.0);
        progress * (max_distance + WAVE_BUFFER) / config.spread
    }
}

/// Combine every wave's effect on character `index`
///
/// "Affected" is OR-ed across waves. When several shells cover the same
/// character, the last wave in `waves` picks the glyph.
pub fn evaluate_char(
    index: usize,
    original: &[char],
    waves: &[Wave],
    now: Millis,
    config: &GlitchConfig,
    alphabet: &[char],
) -> CharEffect {
    let mut effect = CharEffect {
        affected: false,
        glyph: original.get(index).copied().unwrap_or(' '),
    };

    for wave in waves {
        if wave.is_expired(now, config.duration) {
            continue;
        }
        let radius = wave.radius(now, original.len(), config);
        let distance = index.abs_diff(wave.origin);
        let d = distance as f64;

        if d > radius {
            continue;
        }
        effect.affected = true;

        let intensity = (radius - d).max(0.0);
        if intensity > 0.0 && intensity <= WAVE_THRESHOLD && !alphabet.is_empty() {
            let step = (wave.age(now) / ANIM_STEP_MS).floor().max(0.0) as usize;
            let pick = (distance * CHAR_MULTIPLIER + step) % alphabet.len();
            effect.glyph = alphabet[pick];
        }
    }

    effect
}

/// Render the whole text under the given waves
pub fn scramble(
    original: &[char],
    waves: &[Wave],
    now: Millis,
    config: &GlitchConfig,
    alphabet: &[char],
) -> String {
    original
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            if config.preserve_spaces && ch == ' ' {
                return ' ';
            }
            let effect = evaluate_char(i, original, waves, now, config, alphabet);
            if effect.affected {
                effect.glyph
            } else {
                ch
            }
        })
        .collect()
}
