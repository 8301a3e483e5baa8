//! Glitch engine configuration

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

/// Default decoy alphabet
pub const DEFAULT_CHARS: &str = ".,·-─~+:;=*π\"\"┐┌┘┴┬╗╔╝╚╬╠╣╩╦║░▒▓█▄▀▌▐■!?&#$@0123456789*";

/// Per-span animation settings
///
/// Every field is optional when read from JavaScript; missing ones take the
/// defaults below.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GlitchConfig {
    /// Lifetime of one wave, in milliseconds
    pub duration: f64,

    /// Decoy glyphs, indexed in order
    pub chars: String,

    /// Keep literal spaces untouched
    pub preserve_spaces: bool,

    /// Divides the wave radius; smaller values spread faster
    pub spread: f64,
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self {
            duration: 800.0,
            chars: DEFAULT_CHARS.to_string(),
            preserve_spaces: true,
            spread: 0.8,
        }
    }
}

impl GlitchConfig {
    /// Settings used for redactions inside typed documents
    pub fn redaction() -> Self {
        Self {
            duration: 1000.0,
            spread: 0.6,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ViewerError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "duration must be a positive number of milliseconds, got {}",
                self.duration
            )));
        }
        if !(self.spread.is_finite() && self.spread > 0.0) {
            return Err(ViewerError::InvalidConfig(format!(
                "spread must be positive, got {}",
                self.spread
            )));
        }
        Ok(())
    }

    pub fn alphabet(&self) -> Vec<char> {
        self.chars.chars().collect()
    }
}
