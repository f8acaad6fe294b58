//! Jump arc for the player: rise on a parabola, then decay back to the ground.

/// Where the player is in a jump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// Vertical offset state machine for a single actor.
#[derive(Debug, Clone)]
pub struct JumpState {
    phase: JumpPhase,
    /// Apex height; also the rise-phase speed factor.
    jump_distance: f32,
    /// Time the jump started (t0).
    start_time: f32,
    /// Time the apex was reached (t1).
    fall_start_time: f32,
    height: f32,
}

impl JumpState {
    pub fn new(jump_distance: f32) -> Self {
        Self {
            phase: JumpPhase::Grounded,
            jump_distance,
            start_time: 0.0,
            fall_start_time: 0.0,
            height: 0.0,
        }
    }

    /// Start a jump at `now`. Ignored unless grounded; returns whether it took.
    pub fn trigger(&mut self, now: f32) -> bool {
        if self.phase != JumpPhase::Grounded {
            return false;
        }
        self.phase = JumpPhase::Rising;
        self.start_time = now;
        self.height = 0.0;
        true
    }

    /// Advance to `now` and return the current height offset.
    ///
    /// Rising follows `2·D·Δt − Δt²/2` from t0 and snaps to D at the apex.
    /// Falling subtracts `(now − t1)²/2` every call, so the descent depends on
    /// how often it is ticked.
    pub fn update(&mut self, now: f32) -> f32 {
        match self.phase {
            JumpPhase::Grounded => {}
            JumpPhase::Rising => {
                let dt = now - self.start_time;
                self.height = 2.0 * self.jump_distance * dt - 0.5 * dt * dt;
                if self.height >= self.jump_distance {
                    self.height = self.jump_distance;
                    self.fall_start_time = now;
                    self.phase = JumpPhase::Falling;
                }
            }
            JumpPhase::Falling => {
                let dt = now - self.fall_start_time;
                self.height -= 0.5 * dt * dt;
                if self.height <= 0.0 {
                    self.height = 0.0;
                    self.phase = JumpPhase::Grounded;
                }
            }
        }
        self.height
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn is_rising(&self) -> bool {
        self.phase == JumpPhase::Rising
    }

    pub fn is_falling(&self) -> bool {
        self.phase == JumpPhase::Falling
    }

    /// Rising or falling.
    pub fn is_airborne(&self) -> bool {
        self.phase != JumpPhase::Grounded
    }
}
