//! The round state machine and the per-frame loop.

use std::io;

use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::assets::Artwork;
use crate::audio::{AudioSink, Sounds};
use crate::bird::{Bird, Phase};
use crate::canvas::Canvas;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::entity::{Image, Renderable};
use crate::font::TextBox;
use crate::input::{InputEvent, InputSource};
use crate::pipe::{ObstacleConfig, ObstacleSet, PipeSprites};
use crate::sprite::Rgb;
use crate::strip::ScrollingStrip;

const TEXT_FG: Rgb = Rgb(0, 0, 0);
const TEXT_BG: Rgb = Rgb(222, 216, 149);
const TEXT_SCALE: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Game {
    cfg: GameConfig,
    rng: StdRng,
    background: Image,
    ground: ScrollingStrip,
    pipes: ObstacleSet,
    bird: Bird,
    message: Image,
    restart: Image,
    score_box: TextBox,
    high_score_box: TextBox,
    sounds: Sounds,
    score: u32,
    high_score: u32,
    frame: u64,
}

impl Game {
    pub fn new(cfg: GameConfig, art: Artwork, sounds: Sounds, mut rng: StdRng) -> Self {
        let pipes = ObstacleSet::new(
            ObstacleConfig::from(&cfg),
            PipeSprites {
                upper: art.pipe_upper,
                lower: art.pipe_lower,
            },
            &mut rng,
        );
        let bird = Bird::new(art.bird, &cfg);
        let restart_top = (cfg.screen_height as f32 / 3.0) as i32;
        Game {
            background: Image::new(art.background, 0, 0),
            ground: ScrollingStrip::new(art.base, 0, cfg.ground_top),
            message: Image::new(art.message, 50, 10),
            restart: Image::new(art.restart, 80, restart_top),
            score_box: TextBox::new(80, 430, TEXT_SCALE, TEXT_FG, TEXT_BG),
            high_score_box: TextBox::new(50, 470, TEXT_SCALE, TEXT_FG, TEXT_BG),
            pipes,
            bird,
            sounds,
            rng,
            cfg,
            score: 0,
            high_score: 0,
            frame: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.pipes
    }

    pub fn ground(&self) -> &ScrollingStrip {
        &self.ground
    }

    pub fn phase(&self) -> Phase {
        self.bird.phase()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn frames(&self) -> u64 {
        self.frame
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle(&mut self, ev: InputEvent, audio: &mut dyn AudioSink) -> Control {
        match ev {
            InputEvent::Quit | InputEvent::EscapeKey => return Control::Quit,
            InputEvent::PrimaryAction => match self.bird.phase() {
                Phase::Waiting => {
                    audio.play(&self.sounds.swoosh);
                    self.bird.take_off();
                    self.bird.flap();
                    // start the pipes moving
                    self.pipes.set_scrolling(true);
                    info!("round started");
                }
                Phase::Stopped => self.replay(),
                Phase::Flying => {
                    if !self.ground.is_stopped() {
                        audio.play(&self.sounds.wing);
                        self.bird.flap();
                    }
                }
            },
        }
        Control::Continue
    }

    fn replay(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.score = 0;
        self.bird.reset();
        self.pipes.rebuild(&mut self.rng);
        self.ground.set_stopped(false);
        info!("new round, high score {}", self.high_score);
    }

    // ── Frame ───────────────────────────────────────────────────────────

    /// Draws the current state back to front, advancing each part right
    /// after it has been drawn, and runs the collision checks.
    pub fn frame(&mut self, canvas: &mut dyn Canvas, audio: &mut dyn AudioSink) {
        canvas.draw(&self.background);

        // draw the pipes and move them from right to left
        for p in self.pipes.iter() {
            canvas.draw(p);
        }
        self.pipes.update(&mut self.rng);

        canvas.draw(&self.bird);
        self.bird.update();

        self.check_score(audio);
        self.check_collisions(audio);

        match self.bird.phase() {
            Phase::Waiting => canvas.draw(&self.message),
            Phase::Stopped => canvas.draw(&self.restart),
            Phase::Flying => {}
        }

        for tile in self.ground.tiles() {
            canvas.blit(self.ground.sprite(), tile);
        }
        self.ground.update();

        let (s, r) = self.score_box.render(&format!("Score: {}", self.score));
        canvas.blit(&s, r);
        let (s, r) = self
            .high_score_box
            .render(&format!(" High Score: {}", self.high_score));
        canvas.blit(&s, r);

        self.frame += 1;
        trace!(
            "frame {}: y={:.2} v={:.2}",
            self.frame,
            self.bird.y(),
            self.bird.velocity()
        );
    }

    /// First uncounted upper pipe the bird has fully passed scores a point.
    fn check_score(&mut self, audio: &mut dyn AudioSink) {
        let left = self.bird.rect().left;
        let passed = self
            .pipes
            .iter()
            .position(|p| {
                p.sibling().is_some() && !p.score_counted() && left >= p.rect().right()
            });
        if let Some(i) = passed {
            audio.play(&self.sounds.point);
            self.score += 1;
            self.pipes.mark_counted(i);
            debug!("score {}", self.score);
        }
    }

    fn freeze(&mut self) {
        self.ground.set_stopped(true);
        self.pipes.set_scrolling(false);
    }

    /// Hit and die cues, only the first time the world freezes.
    fn crash_cues(&self, audio: &mut dyn AudioSink) {
        if !self.ground.is_stopped() {
            audio.play(&self.sounds.hit);
            audio.play(&self.sounds.die);
        }
    }

    fn check_collisions(&mut self, audio: &mut dyn AudioSink) {
        let ground_top = self.ground.top();

        let body = self.bird.rect();
        if self.pipes.iter().any(|p| p.rect().intersects(&body)) || body.bottom() >= ground_top {
            if !self.ground.is_stopped() {
                info!("bird hit something at score {}", self.score);
            }
            self.crash_cues(audio);
            self.freeze();
        }

        // flying over the top of a pipe
        for i in 0..self.pipes.pipes().len() {
            let p = &self.pipes.pipes()[i];
            if p.sibling().is_some() && self.bird.rect().intersects(&p.kill_zone()) {
                info!("bird flew over pipe pair {}", i / 2);
                self.bird.crash();
                self.crash_cues(audio);
                self.freeze();
            }
        }

        if self.bird.rect().bottom() + self.cfg.settle_margin >= ground_top {
            if self.bird.phase() != Phase::Stopped {
                info!("round over: score {}", self.score);
            }
            self.bird.stop();
            self.freeze();
        }
    }
}

// ── Main loop ───────────────────────────────────────────────────────────────

/// Poll, update, draw, present and pace, until a quit event arrives. The
/// frame in which quit is seen still completes.
pub fn run(
    game: &mut Game,
    input: &mut dyn InputSource,
    canvas: &mut dyn Canvas,
    audio: &mut dyn AudioSink,
    clock: &mut dyn Clock,
) -> io::Result<()> {
    let fps = game.config().fps;
    let mut running = true;
    while running {
        for ev in input.poll()? {
            if game.handle(ev, audio) == Control::Quit {
                running = false;
            }
        }
        game.frame(canvas, audio);
        canvas.present()?;
        clock.tick(fps);
    }
    info!(
        "quit after {} frames: score {}, high score {}",
        game.frames(),
        game.score(),
        game.high_score()
    );
    Ok(())
}
