// ── Game configuration ──────────────────────────────────────────────────────

/// Tunables of a game session. `Default` holds the values the game is
/// balanced around; only presentation settings (fps, volume) are exposed on
/// the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub fps: u32,
    pub volume: f32,

    pub ground_top: i32,
    /// Bird spawn point; `y` is also the centre line of the waiting bob.
    pub bird_x: i32,
    pub bird_y: f32,

    pub gravity: f32,
    pub flap_impulse: f32,
    pub death_velocity: f32,
    pub death_gravity: f32,

    pub bob_amplitude: f32,
    pub bob_step: f32,
    /// Close to 2π but not exact; the bob restarts once the angle reaches it.
    pub bob_wrap: f32,
    pub animation_period: u32,

    pub pipe_gap: i32,
    pub pipe_height: i32,
    pub gap_min: i32,
    pub gap_max: i32,
    pub pipe_speed: i32,
    /// Recycled pairs jump to `pipe width * respawn_factor`.
    pub respawn_factor: i32,
    pub pair_count: usize,

    pub settle_margin: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let screen_height = 512;
        GameConfig {
            screen_width: 288,
            screen_height,
            fps: 60,
            volume: 0.3,
            ground_top: 400,
            bird_x: 100,
            bird_y: screen_height as f32 / 3.0,
            gravity: 0.10,
            flap_impulse: -5.0,
            death_velocity: 10.0,
            death_gravity: 0.20,
            bob_amplitude: 10.0,
            bob_step: 0.1,
            bob_wrap: 6.28,
            animation_period: 7,
            pipe_gap: 150,
            pipe_height: 320,
            gap_min: 150,
            gap_max: 350,
            pipe_speed: 1,
            respawn_factor: 10,
            pair_count: 3,
            settle_margin: 10,
        }
    }
}

impl GameConfig {
    /// Horizontal position of the first pair when a round is set up.
    pub fn start_delay(&self) -> f32 {
        self.screen_width as f32 * 1.5
    }

    /// Horizontal distance between consecutive pairs at setup.
    pub fn pair_interval(&self) -> f32 {
        (self.screen_width as f32 / 1.5).floor()
    }
}
