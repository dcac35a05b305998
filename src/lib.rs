//! # flappy-term
//!
//! A sprite-based Flappy Bird for the terminal.
//!
//! ## Layout
//!
//! ```text
//! game.rs      - round state machine and the per-frame loop
//! bird.rs      - gravity, flaps, wing animation and tilt
//! pipe.rs      - pipe pairs recycled in place as they scroll off
//! strip.rs     - endlessly scrolling ground
//! entity.rs    - things with an image and a position
//!
//! canvas.rs    - pixel buffer and half-block terminal presenter
//! input.rs     - keyboard / mouse events
//! audio.rs     - cue playback and synthesized cues
//! assets.rs    - built-in or on-disk images and sounds
//! clock.rs     - frame pacing
//! ```
//!
//! The game logic only talks to its surroundings through the `Canvas`,
//! `InputSource`, `AudioSink`, `AssetProvider` and `Clock` traits, so the
//! whole loop can be driven headless.

#![deny(unsafe_code)]

pub mod art;
pub mod assets;
pub mod audio;
pub mod bird;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod font;
pub mod game;
pub mod geometry;
pub mod input;
pub mod pipe;
pub mod sprite;
pub mod strip;

pub use assets::{Artwork, AssetProvider, BuiltinAssets, DirAssets};
pub use audio::{AudioSink, Clip, RodioSink, SilentSink, Sounds};
pub use bird::{Bird, Phase, Tilt};
pub use canvas::{Canvas, PixelBuf, TerminalCanvas};
pub use clock::{Clock, FrameClock};
pub use config::GameConfig;
pub use entity::{Image, Renderable};
pub use error::AssetError;
pub use game::{Control, Game, run};
pub use geometry::Rect;
pub use input::{InputEvent, InputSource, ScriptedInput, TerminalInput};
pub use pipe::{ObstacleSet, Pipe, PipeKind};
pub use sprite::{Rgb, Sprite};
pub use strip::ScrollingStrip;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
