//! Entity models: the player vehicle and everything that falls toward it
//!
//! Each entity owns its per-frame update rule. Nothing here knows about
//! spawning, collisions or the game phase; `GameState` orchestrates that.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Colour tag for entities (the renderer maps these to actual colours)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NeonColor {
    #[default]
    Cyan,
    Magenta,
    Yellow,
    Lime,
}

impl NeonColor {
    pub const ALL: [NeonColor; 4] = [
        NeonColor::Cyan,
        NeonColor::Magenta,
        NeonColor::Yellow,
        NeonColor::Lime,
    ];

    /// Pick a colour uniformly at random
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Boost state of the player vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoostState {
    #[default]
    Inactive,
    Active,
}

/// Trail point for player rendering (bottom-center of the vehicle)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
}

/// The player-controlled vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub boost_speed: f32,
    pub boost: BoostState,
    /// Boost meter, always within [0, MAX_BOOST]
    pub boost_meter: f32,
    pub color: NeonColor,
    /// Recent positions, newest first
    pub trail: VecDeque<TrailPoint>,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (SCREEN_WIDTH / 2.0 - PLAYER_WIDTH / 2.0).floor(),
                SCREEN_HEIGHT - PLAYER_BOTTOM_OFFSET,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            boost_speed: PLAYER_BOOST_SPEED,
            boost: BoostState::Inactive,
            boost_meter: 0.0,
            color: NeonColor::Cyan,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_boosting(&self) -> bool {
        self.boost == BoostState::Active
    }

    /// Speed applied by `move_toward` this frame
    pub fn current_speed(&self) -> f32 {
        if self.is_boosting() {
            self.boost_speed
        } else {
            self.speed
        }
    }

    /// Center of the vehicle's bounding box
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Shift horizontally, keeping the vehicle fully on screen
    pub fn move_toward(&mut self, direction: Direction) {
        let step = match direction {
            Direction::Left => -self.current_speed(),
            Direction::Right => self.current_speed(),
        };
        let max_x = SCREEN_WIDTH - self.size.x;
        self.pos.x = (self.pos.x + step).clamp(0.0, max_x);
    }

    /// Start boosting if the meter is above the activation threshold
    pub fn activate_boost(&mut self) {
        if self.boost_meter > BOOST_THRESHOLD {
            self.boost = BoostState::Active;
        }
    }

    pub fn deactivate_boost(&mut self) {
        self.boost = BoostState::Inactive;
    }

    /// Top up the meter (pickup reward), capped at max
    pub fn add_boost(&mut self, amount: f32) {
        self.boost_meter = (self.boost_meter + amount).clamp(0.0, MAX_BOOST);
    }

    /// Advance trail and boost meter by one frame
    pub fn update(&mut self) {
        self.trail.push_front(TrailPoint {
            pos: Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y),
        });
        self.trail.truncate(TRAIL_LENGTH);

        match self.boost {
            BoostState::Active => {
                self.boost_meter -= BOOST_DRAIN_RATE;
                if self.boost_meter <= 0.0 {
                    self.boost = BoostState::Inactive;
                }
            }
            BoostState::Inactive => {
                self.boost_meter += BOOST_FILL_RATE;
            }
        }
        self.boost_meter = self.boost_meter.clamp(0.0, MAX_BOOST);
    }
}

/// A falling rectangular hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed, fixed at spawn time
    pub speed: f32,
    pub color: NeonColor,
    /// Glow pulse in [0, 1]
    pub pulse: f32,
    /// +1.0 or -1.0
    pub pulse_direction: f32,
}

impl Obstacle {
    /// Random size and lane position, just above the visible area
    pub fn spawn(rng: &mut impl Rng, speed: f32) -> Self {
        let width = rng.random_range(OBSTACLE_MIN_WIDTH..=OBSTACLE_MAX_WIDTH) as f32;
        let height = rng.random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT) as f32;
        let max_x = (SCREEN_WIDTH - width) as u32;
        let x = rng.random_range(0..=max_x) as f32;
        Self {
            pos: Vec2::new(x, -height),
            size: Vec2::new(width, height),
            speed,
            color: NeonColor::random(rng),
            pulse: 0.0,
            pulse_direction: 1.0,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;

        self.pulse += 0.1 * self.pulse_direction;
        if self.pulse >= 1.0 || self.pulse <= 0.0 {
            self.pulse_direction = -self.pulse_direction;
        }
        self.pulse = self.pulse.clamp(0.0, 1.0);
    }

    /// Top edge has passed below the screen
    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// A falling score orb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Center
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub color: NeonColor,
    /// Pulse phase in [0, TAU)
    pub pulse: f32,
    pub pulse_speed: f32,
    pub value: u32,
}

impl Pickup {
    pub fn spawn(rng: &mut impl Rng, speed: f32) -> Self {
        let radius = PICKUP_RADIUS;
        let x = rng.random_range(radius as u32..=(SCREEN_WIDTH - radius) as u32) as f32;
        Self {
            pos: Vec2::new(x, -radius * 2.0),
            radius,
            speed,
            color: NeonColor::random(rng),
            pulse: 0.0,
            pulse_speed: rng.random_range(0.05..0.1),
            value: PICKUP_VALUES[rng.random_range(0..PICKUP_VALUES.len())],
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.pulse = (self.pulse + self.pulse_speed).rem_euclid(TAU);
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT + self.radius
    }
}

/// Emission pattern of a particle burst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleMode {
    /// Omni-directional, fast
    Crash,
    /// Mostly upward, slow
    Pickup,
}

/// Short-lived decorative spark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining frames
    pub lifetime: i32,
    pub size: f32,
    pub color: NeonColor,
    pub mode: ParticleMode,
}

impl Particle {
    pub fn spawn(rng: &mut impl Rng, pos: Vec2, color: NeonColor, mode: ParticleMode) -> Self {
        let size = rng.random_range(2..=8) as f32;
        let lifetime = rng.random_range(20..=PARTICLE_MAX_LIFETIME);
        let vel = match mode {
            ParticleMode::Crash => {
                let speed: f32 = rng.random_range(2.0..10.0);
                let angle: f32 = rng.random_range(0.0..TAU);
                Vec2::new(angle.cos(), angle.sin()) * speed
            }
            ParticleMode::Pickup => {
                Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(-5.0..-1.0))
            }
        };
        Self {
            pos,
            vel,
            lifetime,
            size,
            color,
            mode,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.lifetime -= 1;
        self.size = (self.size - 0.1).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.lifetime <= 0
    }

    /// Fade factor for rendering (1.0 = freshly spawned at max lifetime)
    pub fn alpha(&self) -> f32 {
        (self.lifetime as f32 / PARTICLE_MAX_LIFETIME as f32).clamp(0.0, 1.0)
    }
}
