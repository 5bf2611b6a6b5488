//! Volume control
//!
//! Percent in the UI, normalized linear gain at the engine.

/// Volume level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,
}

impl Volume {
    /// Create new volume at `level` percent (clamped to 100)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
        }
    }

    /// Set from an unchecked percent, clamping to 0-100
    pub fn set_percent(&mut self, percent: i32) {
        self.level = percent.clamp(0, 100) as u8;
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Engine volume in `[0.0, 1.0]`
    pub fn gain(&self) -> f32 {
        f32::from(self.level) / 100.0
    }

    /// Readout next to the slider
    pub fn readout(&self) -> String {
        self.level.to_string()
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}
