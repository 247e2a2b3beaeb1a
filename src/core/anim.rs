use super::constants::{
    PARK_COORD, PULSE_MAX_SCALE, PULSE_MIN_SCALE, PULSE_STEP, PULSE_TRIGGER_PROBABILITY,
};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use rand::Rng;

/// Per-object transform mutated by animation rules each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec2, // radians about x and y
    pub scale: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec2::ZERO,
            scale: Vec2::ONE,
        }
    }
}

impl Transform {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            position: Vec3::new(x, y, 0.0),
            ..Self::default()
        }
    }

    /// Model matrix: scale, then XYZ Euler rotation, then translation.
    pub fn matrix(&self) -> Mat4 {
        let rot = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_scale_rotation_translation(self.scale.extend(1.0), rot, self.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("rule window [{0}, {0}] is empty")]
    EmptyWindow(f32),
    #[error("rule window ends at {end} before it starts at {start}")]
    InvertedWindow { start: f32, end: f32 },
    #[error("rule window bounds must be finite")]
    NonFinite,
}

/// Scroll window a segment rule is active in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollWindow {
    start: f32,
    end: f32,
}

impl ScrollWindow {
    pub fn new(start: f32, end: f32) -> Result<Self, RuleError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(RuleError::NonFinite);
        }
        if start == end {
            return Err(RuleError::EmptyWindow(start));
        }
        if end < start {
            return Err(RuleError::InvertedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Normalized progress of `offset` through the window; not clamped.
    #[inline]
    pub fn percent(&self, offset: f32) -> f32 {
        (offset - self.start) / (self.end - self.start)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveRule {
    pub window: ScrollWindow,
    pub from: Vec2,
    pub to: Vec2,
}

impl MoveRule {
    pub fn new(start: f32, end: f32, from: Vec2, to: Vec2) -> Result<Self, RuleError> {
        Ok(Self {
            window: ScrollWindow::new(start, end)?,
            from,
            to,
        })
    }

    /// Position for `offset`. Before the window the object is parked far
    /// off-screen rather than held at `from`.
    pub fn position_at(&self, offset: f32) -> Vec2 {
        let p = self.window.percent(offset);
        if p < 0.0 {
            Vec2::splat(PARK_COORD)
        } else if p >= 1.0 {
            self.to
        } else {
            self.from + (self.to - self.from) * p
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotateRule {
    pub window: ScrollWindow,
}

impl RotateRule {
    pub fn new(start: f32, end: f32) -> Result<Self, RuleError> {
        Ok(Self {
            window: ScrollWindow::new(start, end)?,
        })
    }

    /// One full turn on x and y across the window, zero outside it.
    pub fn angle_at(&self, offset: f32) -> f32 {
        let p = self.window.percent(offset);
        if (0.0..=1.0).contains(&p) {
            p * std::f32::consts::TAU
        } else {
            0.0
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PulseState {
    #[default]
    Idle,
    Shrinking,
    Growing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseScaleRule {
    pub threshold: f32,
}

impl PulseScaleRule {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    /// Advance the pulse automaton by one frame.
    pub fn step<R: Rng>(
        &self,
        offset: f32,
        state: &mut PulseState,
        scale: &mut Vec2,
        rng: &mut R,
    ) {
        if offset <= self.threshold {
            *state = PulseState::Idle;
            *scale = Vec2::ONE;
            return;
        }
        match *state {
            PulseState::Idle => {
                if rng.gen::<f64>() <= PULSE_TRIGGER_PROBABILITY {
                    *state = PulseState::Shrinking;
                }
            }
            PulseState::Shrinking => {
                let s = (scale.x - PULSE_STEP).max(PULSE_MIN_SCALE);
                *scale = Vec2::splat(s);
                if s <= PULSE_MIN_SCALE {
                    *state = PulseState::Growing;
                }
            }
            PulseState::Growing => {
                let s = (scale.x + PULSE_STEP).min(PULSE_MAX_SCALE);
                *scale = Vec2::splat(s);
                if s >= PULSE_MAX_SCALE {
                    *scale = Vec2::splat(PULSE_MAX_SCALE);
                    *state = PulseState::Idle;
                }
            }
        }
    }
}

/// Animation attached to a scene object, evaluated once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationRule {
    Move(MoveRule),
    Rotate(RotateRule),
    PulseScale(PulseScaleRule),
    /// Vertical parallax: `y = base_y + offset`.
    Follow { base_y: f32 },
}

impl AnimationRule {
    pub fn evaluate<R: Rng>(
        &self,
        offset: f32,
        transform: &mut Transform,
        pulse: &mut PulseState,
        rng: &mut R,
    ) {
        match self {
            AnimationRule::Move(m) => {
                let p = m.position_at(offset);
                transform.position.x = p.x;
                transform.position.y = p.y;
            }
            AnimationRule::Rotate(r) => {
                transform.rotation = Vec2::splat(r.angle_at(offset));
            }
            AnimationRule::PulseScale(s) => s.step(offset, pulse, &mut transform.scale, rng),
            AnimationRule::Follow { base_y } => {
                transform.position.y = base_y + offset;
            }
        }
    }
}

impl From<MoveRule> for AnimationRule {
    fn from(r: MoveRule) -> Self {
        AnimationRule::Move(r)
    }
}

impl From<RotateRule> for AnimationRule {
    fn from(r: RotateRule) -> Self {
        AnimationRule::Rotate(r)
    }
}

impl From<PulseScaleRule> for AnimationRule {
    fn from(r: PulseScaleRule) -> Self {
        AnimationRule::PulseScale(r)
    }
}
