//! Transport state mirrored from engine events
//!
//! Position and duration are whatever the engine last reported; the
//! controller only reads them to validate seeks and to feed the UI.

/// On-screen transport (position, duration, volume)
#[derive(Debug, Clone, PartialEq)]
pub struct Transport {
    /// Last reported position in seconds
    position_secs: f64,

    /// Last reported duration in seconds (may be NaN/infinite while loading)
    duration_secs: f64,

    /// Output volume (0.0-1.0)
    volume: f32,
}

impl Transport {
    /// Create transport state with an initial volume
    pub fn new(volume: f32) -> Self {
        Self {
            position_secs: 0.0,
            duration_secs: 0.0,
            volume: clamp_volume(volume),
        }
    }

    /// Record an engine time update
    pub fn update(&mut self, current_secs: f64, duration_secs: f64) {
        self.position_secs = if current_secs.is_finite() {
            current_secs.max(0.0)
        } else {
            0.0
        };
        self.duration_secs = duration_secs;
    }

    /// Forget position and duration (new source bound or unloaded)
    pub fn reset(&mut self) {
        self.position_secs = 0.0;
        self.duration_secs = 0.0;
    }

    /// Move the position back to the start
    pub fn rewind(&mut self) {
        self.position_secs = 0.0;
    }

    /// Current position in seconds
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    /// Duration in seconds, if the engine reported a usable one
    pub fn duration_secs(&self) -> Option<f64> {
        self.has_valid_duration().then_some(self.duration_secs)
    }

    /// Whether the duration is finite and positive
    pub fn has_valid_duration(&self) -> bool {
        self.duration_secs.is_finite() && self.duration_secs > 0.0
    }

    /// Playback progress in `[0, 1]` (0 without a valid duration)
    pub fn progress(&self) -> f64 {
        match self.duration_secs() {
            Some(duration) => (self.position_secs / duration).clamp(0.0, 1.0),
            None => 0.0,
        }
    }

    /// Absolute seek target for a fraction of the track
    ///
    /// `None` unless the duration is valid. The fraction is clamped to `[0, 1]`.
    pub fn seek_target(&self, fraction: f64) -> Option<f64> {
        if !fraction.is_finite() {
            return None;
        }
        self.duration_secs()
            .map(|duration| fraction.clamp(0.0, 1.0) * duration)
    }

    /// Record a successful seek
    pub fn set_position(&mut self, position_secs: f64) {
        self.position_secs = position_secs;
    }

    /// Output volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Set output volume (clamped to `[0, 1]`)
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        self.volume = clamp_volume(volume);
        self.volume
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        1.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_requires_valid_duration() {
        let mut transport = Transport::default();
        transport.update(30.0, f64::NAN);
        assert_eq!(transport.progress(), 0.0);
        assert!(transport.duration_secs().is_none());

        transport.update(30.0, f64::INFINITY);
        assert_eq!(transport.progress(), 0.0);

        transport.update(30.0, 120.0);
        assert_eq!(transport.progress(), 0.25);
        assert_eq!(transport.duration_secs(), Some(120.0));
    }

    #[test]
    fn seek_target_scales_duration() {
        let mut transport = Transport::default();
        transport.update(0.0, 200.0);

        assert_eq!(transport.seek_target(0.5), Some(100.0));
        assert_eq!(transport.seek_target(1.5), Some(200.0));
        assert_eq!(transport.seek_target(-0.2), Some(0.0));
        assert_eq!(transport.seek_target(f64::NAN), None);
    }

    #[test]
    fn seek_target_without_duration() {
        let mut transport = Transport::default();
        transport.update(0.0, 0.0);
        assert_eq!(transport.seek_target(0.5), None);
    }

    #[test]
    fn volume_clamped() {
        let mut transport = Transport::new(3.0);
        assert_eq!(transport.volume(), 1.0);

        assert_eq!(transport.set_volume(-1.0), 0.0);
        assert_eq!(transport.set_volume(0.4), 0.4);
    }

    #[test]
    fn reset_clears_position_and_duration() {
        let mut transport = Transport::new(0.5);
        transport.update(42.0, 100.0);
        transport.reset();

        assert_eq!(transport.position_secs(), 0.0);
        assert!(!transport.has_valid_duration());
        assert_eq!(transport.volume(), 0.5);
    }
}
