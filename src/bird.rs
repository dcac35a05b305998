use crate::config::GameConfig;
use crate::entity::Renderable;
use crate::geometry::Rect;
use crate::sprite::Sprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Waiting,
    Flying,
    Stopped,
}

/// How far the bird image is turned, picked from its vertical speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tilt {
    Climb,
    Level,
    Dip,
    Dive,
}

impl Tilt {
    const ALL: [Tilt; 4] = [Tilt::Climb, Tilt::Level, Tilt::Dip, Tilt::Dive];

    /// First matching bucket wins.
    pub fn for_velocity(v: f32) -> Tilt {
        if v >= 7.0 {
            Tilt::Dive
        } else if v >= 5.0 {
            Tilt::Dip
        } else if v >= -2.0 {
            Tilt::Level
        } else {
            Tilt::Climb
        }
    }

    /// Counter-clockwise rotation applied to the image.
    pub fn degrees(self) -> f32 {
        match self {
            Tilt::Climb => 45.0,
            Tilt::Level => 0.0,
            Tilt::Dip => -45.0,
            Tilt::Dive => -90.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Wing cycle: up, mid, down, mid.
const FRAME_SEQUENCE: [usize; 4] = [0, 1, 2, 1];

// ── Bird ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bird {
    /// `images[frame][tilt]`, rotated once up front.
    images: Vec<[Sprite; 4]>,
    rect: Rect,
    y: f32,
    base_y: f32,
    velocity: f32,
    acceleration: f32,
    flap_impulse: f32,
    frame: usize,
    frame_ticks: u32,
    phase: Phase,
    angle: f32,
    tilt: Tilt,
    cfg: BirdConfig,
}

#[derive(Clone, Debug, PartialEq)]
struct BirdConfig {
    gravity: f32,
    death_velocity: f32,
    death_gravity: f32,
    bob_amplitude: f32,
    bob_step: f32,
    bob_wrap: f32,
    animation_period: u32,
}

impl Bird {
    /// `frames` are the wing-up, wing-mid and wing-down images.
    pub fn new(frames: [Sprite; 3], cfg: &GameConfig) -> Self {
        let images: Vec<[Sprite; 4]> = frames
            .iter()
            .map(|f| Tilt::ALL.map(|t| f.rotated(t.degrees())))
            .collect();
        let w = frames[1].width() as i32;
        let h = frames[1].height() as i32;
        let y = cfg.bird_y;
        Bird {
            images,
            rect: Rect::new(cfg.bird_x, y as i32, w, h),
            y,
            base_y: y,
            velocity: 0.0,
            acceleration: cfg.gravity,
            flap_impulse: cfg.flap_impulse,
            frame: 1,
            frame_ticks: 0,
            phase: Phase::Waiting,
            angle: 0.0,
            tilt: Tilt::Level,
            cfg: BirdConfig {
                gravity: cfg.gravity,
                death_velocity: cfg.death_velocity,
                death_gravity: cfg.death_gravity,
                bob_amplitude: cfg.bob_amplitude,
                bob_step: cfg.bob_step,
                bob_wrap: cfg.bob_wrap,
                animation_period: cfg.animation_period,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Exact vertical position of the top edge.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    /// Index into the up/mid/down images currently shown.
    pub fn wing_frame(&self) -> usize {
        FRAME_SEQUENCE[self.frame]
    }

    fn set_y(&mut self, y: f32) {
        self.y = y;
        self.rect.top = y.floor() as i32;
    }

    pub fn update(&mut self) {
        match self.phase {
            Phase::Waiting => {
                self.animate();
                let y = self.base_y + self.angle.sin() * self.cfg.bob_amplitude;
                self.set_y(y);
                self.angle += self.cfg.bob_step;
                if self.angle >= self.cfg.bob_wrap {
                    self.angle = 0.0;
                }
                self.tilt = Tilt::Level;
            }
            Phase::Flying => {
                self.animate();
                self.velocity += self.acceleration;
                self.set_y(self.y + self.velocity);
                self.tilt = Tilt::for_velocity(self.velocity);
            }
            Phase::Stopped => {}
        }
    }

    fn animate(&mut self) {
        self.frame_ticks += 1;
        if self.frame_ticks == self.cfg.animation_period {
            self.frame = (self.frame + 1) % FRAME_SEQUENCE.len();
            self.frame_ticks = 0;
        }
    }

    /// Additive upward kick; ignored once the bird has stopped.
    pub fn flap(&mut self) {
        if self.phase != Phase::Stopped {
            self.velocity += self.flap_impulse;
        }
    }

    /// Waiting → Flying.
    pub fn take_off(&mut self) {
        if self.phase == Phase::Waiting {
            self.phase = Phase::Flying;
        }
    }

    /// Hard fall after flying over a pipe: snap above the screen and drop
    /// fast with stronger gravity.
    pub fn crash(&mut self) {
        self.velocity = self.cfg.death_velocity;
        self.acceleration = self.cfg.death_gravity;
        self.set_y(-(self.rect.height as f32));
    }

    /// Halts motion and animation.
    pub fn stop(&mut self) {
        self.phase = Phase::Stopped;
    }

    /// Back to bobbing at the spawn point with no speed.
    pub fn reset(&mut self) {
        self.phase = Phase::Waiting;
        self.velocity = 0.0;
        self.acceleration = self.cfg.gravity;
    }
}

impl Renderable for Bird {
    fn sprite(&self) -> &Sprite {
        &self.images[self.wing_frame()][self.tilt.index()]
    }

    fn rect(&self) -> Rect {
        self.rect
    }
}
