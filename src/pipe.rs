//! Pipe obstacles. Pipes live in pairs sharing one gap; the set is built
//! once per round and pairs are recycled in place as they leave the screen.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entity::Renderable;
use crate::geometry::Rect;
use crate::sprite::Sprite;

/// Height of the box above an upper pipe that counts as flying over it.
const KILL_ZONE_HEIGHT: i32 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipeKind {
    Upper,
    Lower,
}

#[derive(Clone, Debug)]
pub struct Pipe {
    kind: PipeKind,
    sprite: Sprite,
    rect: Rect,
    /// Index of the lower member in the owning set; only uppers have one.
    sibling: Option<usize>,
    scrolling: bool,
    score_counted: bool,
}

impl Pipe {
    fn new(kind: PipeKind, sprite: Sprite, left: i32, top: i32) -> Self {
        let rect = Rect::new(left, top, sprite.width() as i32, sprite.height() as i32);
        Pipe {
            kind,
            sprite,
            rect,
            sibling: None,
            scrolling: false,
            score_counted: false,
        }
    }

    pub fn kind(&self) -> PipeKind {
        self.kind
    }

    pub fn sibling(&self) -> Option<usize> {
        self.sibling
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    pub fn score_counted(&self) -> bool {
        self.score_counted
    }

    /// Unbounded box standing on top of the pipe.
    pub fn kill_zone(&self) -> Rect {
        let mut zone = Rect::new(self.rect.left, 0, self.rect.width, KILL_ZONE_HEIGHT);
        zone.set_bottom(self.rect.top);
        zone
    }
}

impl Renderable for Pipe {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn rect(&self) -> Rect {
        self.rect
    }
}

#[derive(Clone, Debug)]
pub struct PipeSprites {
    pub upper: Sprite,
    pub lower: Sprite,
}

/// Layout and motion constants for the obstacle course.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleConfig {
    pub pair_count: usize,
    pub start_delay: f32,
    pub interval: f32,
    pub gap: i32,
    pub pipe_height: i32,
    pub gap_range: (i32, i32),
    pub speed: i32,
    pub respawn_factor: i32,
}

impl From<&GameConfig> for ObstacleConfig {
    fn from(cfg: &GameConfig) -> Self {
        ObstacleConfig {
            pair_count: cfg.pair_count,
            start_delay: cfg.start_delay(),
            interval: cfg.pair_interval(),
            gap: cfg.pipe_gap,
            pipe_height: cfg.pipe_height,
            gap_range: (cfg.gap_min, cfg.gap_max),
            speed: cfg.pipe_speed,
            respawn_factor: cfg.respawn_factor,
        }
    }
}

/// Fixed ring of pipe pairs, stored upper-then-lower for each pair.
#[derive(Clone, Debug)]
pub struct ObstacleSet {
    pipes: Vec<Pipe>,
    sprites: PipeSprites,
    cfg: ObstacleConfig,
}

impl ObstacleSet {
    pub fn new(cfg: ObstacleConfig, sprites: PipeSprites, rng: &mut impl Rng) -> Self {
        let mut set = ObstacleSet {
            pipes: Vec::with_capacity(cfg.pair_count * 2),
            sprites,
            cfg,
        };
        set.rebuild(rng);
        set
    }

    /// Throws the course away and lays out fresh pairs, frozen until the
    /// next round starts.
    pub fn rebuild(&mut self, rng: &mut impl Rng) {
        self.pipes.clear();
        for c in 0..self.cfg.pair_count {
            // top of bottom pipe
            let gap_start = self.draw_gap(rng);
            let left = (self.cfg.start_delay + self.cfg.interval * c as f32) as i32;
            let lower_idx = self.pipes.len() + 1;

            let mut upper = Pipe::new(
                PipeKind::Upper,
                self.sprites.upper.clone(),
                left,
                self.upper_top(gap_start),
            );
            upper.sibling = Some(lower_idx);
            let lower = Pipe::new(PipeKind::Lower, self.sprites.lower.clone(), left, gap_start);
            self.pipes.push(upper);
            self.pipes.push(lower);
        }
        debug!("laid out {} pipe pairs", self.cfg.pair_count);
    }

    fn draw_gap(&self, rng: &mut impl Rng) -> i32 {
        let (lo, hi) = self.cfg.gap_range;
        rng.gen_range(lo..=hi)
    }

    fn upper_top(&self, gap_start: i32) -> i32 {
        gap_start - self.cfg.gap - self.cfg.pipe_height
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pipe> {
        self.pipes.iter()
    }

    pub fn mark_counted(&mut self, idx: usize) {
        self.pipes[idx].score_counted = true;
    }

    pub fn set_scrolling(&mut self, scrolling: bool) {
        for p in &mut self.pipes {
            p.scrolling = scrolling;
        }
    }

    pub fn is_scrolling(&self) -> bool {
        self.pipes.iter().any(|p| p.scrolling)
    }

    /// Slides every scrolling pipe left, then recycles each pair whose upper
    /// member has just left the screen.
    pub fn update(&mut self, rng: &mut impl Rng) {
        for p in &mut self.pipes {
            if p.scrolling {
                p.rect.left -= self.cfg.speed;
            }
        }
        for i in 0..self.pipes.len() {
            let p = &self.pipes[i];
            if !p.scrolling || p.rect.right() != 0 {
                continue;
            }
            if let Some(j) = p.sibling {
                self.recycle(i, j, rng);
            }
        }
    }

    fn recycle(&mut self, upper: usize, lower: usize, rng: &mut impl Rng) {
        let left = self.pipes[upper].rect.width * self.cfg.respawn_factor;
        let gap_start = self.draw_gap(rng);
        let top = self.upper_top(gap_start);

        let up = &mut self.pipes[upper];
        up.rect.left = left;
        up.rect.top = top;
        up.score_counted = false;

        let low = &mut self.pipes[lower];
        low.rect.left = left;
        low.rect.top = gap_start;
        debug!("recycled pair {} at x={left}, gap at {gap_start}", upper / 2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn course(seed: u64) -> (ObstacleSet, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let cfg = ObstacleConfig::from(&GameConfig::default());
        let sprites = PipeSprites {
            upper: Sprite::new(52, 320),
            lower: Sprite::new(52, 320),
        };
        (ObstacleSet::new(cfg, sprites, &mut rng), rng)
    }

    fn move_pair(set: &mut ObstacleSet, pair: usize, left: i32) {
        set.pipes[pair * 2].rect.left = left;
        set.pipes[pair * 2 + 1].rect.left = left;
    }

    #[test]
    fn three_pairs_spaced_from_the_start_delay() {
        let (set, _) = course(1);
        assert_eq!(set.pipes().len(), 6);
        let lefts: Vec<i32> = set.iter().map(|p| p.rect().left).collect();
        assert_eq!(lefts, vec![432, 432, 624, 624, 816, 816]);
    }

    #[test]
    fn pairs_share_one_gap() {
        let (set, _) = course(7);
        for pair in set.pipes().chunks(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            assert_eq!(upper.kind(), PipeKind::Upper);
            assert_eq!(lower.kind(), PipeKind::Lower);
            assert_eq!(lower.rect().top - upper.rect().bottom(), 150);
            assert!((150..=350).contains(&lower.rect().top));
            assert!(upper.sibling().is_some());
            assert!(lower.sibling().is_none());
        }
    }

    #[test]
    fn new_course_is_frozen() {
        let (mut set, mut rng) = course(3);
        assert!(!set.is_scrolling());
        set.update(&mut rng);
        assert_eq!(set.pipes()[0].rect().left, 432);
    }

    #[test]
    fn scrolls_one_pixel_per_tick() {
        let (mut set, mut rng) = course(3);
        set.set_scrolling(true);
        set.update(&mut rng);
        let lefts: Vec<i32> = set.iter().map(|p| p.rect().left).collect();
        assert_eq!(lefts, vec![431, 431, 623, 623, 815, 815]);
    }

    #[test]
    fn kill_zone_sits_on_top_of_the_pipe() {
        let (set, _) = course(5);
        let upper = &set.pipes()[0];
        let zone = upper.kill_zone();
        assert_eq!(zone.bottom(), upper.rect().top);
        assert_eq!(zone.left, upper.rect().left);
        assert_eq!(zone.height, KILL_ZONE_HEIGHT);
    }

    #[test]
    fn recycle_resets_the_score_flag() {
        let (mut set, mut rng) = course(11);
        set.set_scrolling(true);
        set.mark_counted(0);
        move_pair(&mut set, 0, -51);
        set.update(&mut rng);
        assert!(!set.pipes()[0].score_counted);
        assert_eq!(set.pipes()[0].rect().left, 520);
        assert_eq!(set.pipes()[1].rect().left, 520);
    }

    #[test]
    fn frozen_pair_is_not_recycled() {
        let (mut set, mut rng) = course(11);
        move_pair(&mut set, 0, -52);
        set.update(&mut rng);
        assert_eq!(set.pipes()[0].rect().left, -52);
    }

    #[test]
    fn rebuild_restores_layout() {
        let (mut set, mut rng) = course(2);
        set.set_scrolling(true);
        for _ in 0..500 {
            set.update(&mut rng);
        }
        set.rebuild(&mut rng);
        assert!(!set.is_scrolling());
        assert_eq!(set.pipes()[4].rect().left, 816);
        assert!(set.iter().all(|p| !p.score_counted));
    }

    proptest! {
        #[test]
        fn recycled_pair_respawns_far_right(seed in any::<u64>(), pair in 0usize..3) {
            let (mut set, mut rng) = course(seed);
            set.set_scrolling(true);
            move_pair(&mut set, pair, -51);
            set.mark_counted(pair * 2);
            set.update(&mut rng);

            let upper = &set.pipes()[pair * 2];
            let lower = &set.pipes()[pair * 2 + 1];
            prop_assert_eq!(upper.rect().left, 520);
            prop_assert_eq!(lower.rect().left, 520);
            prop_assert!((150..=350).contains(&lower.rect().top));
            prop_assert_eq!(upper.rect().top, lower.rect().top - 150 - 320);
            prop_assert!(!upper.score_counted);
            prop_assert_eq!(upper.kill_zone().bottom(), upper.rect().top);
        }

        #[test]
        fn ring_keeps_every_pair(ticks in 0usize..3000, seed in any::<u64>()) {
            let (mut set, mut rng) = course(seed);
            set.set_scrolling(true);
            for _ in 0..ticks {
                set.update(&mut rng);
            }
            prop_assert_eq!(set.pipes().len(), 6);
            for pair in set.pipes().chunks(2) {
                prop_assert_eq!(pair[0].rect().left, pair[1].rect().left);
                prop_assert!(pair[0].rect().right() > 0);
            }
        }
    }
}
