//! Time management for the frame loop.
//!
//! The display collaborator owns the real clock; each frame it hands us an
//! absolute animation time and the delta since the previous frame, both in
//! seconds.

/// Per-frame timing supplied by the display callback.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Absolute animation time in seconds.
    pub time: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Viewport size in pixels (width, height).
    pub viewport: (f32, f32),
}

impl FrameInput {
    pub fn new(time: f32, delta: f32) -> Self {
        Self {
            time,
            delta,
            viewport: (1280.0, 720.0),
        }
    }

    /// Width / height of the viewport, 1.0 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.viewport.1 > 0.0 {
            self.viewport.0 / self.viewport.1
        } else {
            1.0
        }
    }
}

/// Tracks frame timing for the gameplay loop.
#[derive(Debug, Default)]
pub struct Time {
    /// Absolute time of the current frame.
    now: f32,
    /// Duration of the last frame.
    delta: f32,
    /// Frame count since start.
    frame_count: u64,
}

impl Time {
    /// Create a new time tracker at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update timing at the start of a new frame.
    pub fn update(&mut self, frame: &FrameInput) {
        self.now = frame.time;
        self.delta = frame.delta.max(0.0);
        self.frame_count += 1;
    }

    /// Absolute time of the current frame in seconds.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_tracks_collaborator_clock() {
        let mut time = Time::new();
        time.update(&FrameInput::new(1.5, 0.25));
        assert_eq!(time.now(), 1.5);
        assert_eq!(time.delta_seconds(), 0.25);
        assert_eq!(time.frame_count(), 1);
        assert!((time.fps() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn negative_delta_is_clamped() {
        let mut time = Time::new();
        time.update(&FrameInput::new(0.0, -1.0));
        assert_eq!(time.delta_seconds(), 0.0);
        assert_eq!(time.fps(), 0.0);
    }
}
