//! Where images and sounds come from.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::art::{self, Wing};
use crate::audio::{self, Clip, ClipData, Sounds};
use crate::error::AssetError;
use crate::sprite::{Rgb, Sprite};

pub const BACKGROUND: &str = "background-day.png";
pub const BASE: &str = "base.png";
pub const PIPE_LOWER: &str = "pipe-green-lower.png";
pub const PIPE_UPPER: &str = "pipe-green-upper.png";
pub const BIRD_UP: &str = "yellowbird-upflap.png";
pub const BIRD_MID: &str = "yellowbird-midflap.png";
pub const BIRD_DOWN: &str = "yellowbird-downflap.png";
pub const MESSAGE: &str = "message.png";
pub const RESTART: &str = "restart.png";

pub const SWOOSH: &str = "swoosh.ogg";
pub const WING: &str = "wing.ogg";
pub const POINT: &str = "point.ogg";
pub const HIT: &str = "hit.ogg";
pub const DIE: &str = "die.ogg";

pub trait AssetProvider {
    fn load_image(&mut self, name: &str) -> Result<Sprite, AssetError>;
    fn load_sound(&mut self, name: &str) -> Result<Clip, AssetError>;
}

/// Every image the game draws.
#[derive(Clone, Debug)]
pub struct Artwork {
    pub background: Sprite,
    pub base: Sprite,
    pub pipe_lower: Sprite,
    pub pipe_upper: Sprite,
    /// Wing up, mid, down.
    pub bird: [Sprite; 3],
    pub message: Sprite,
    pub restart: Sprite,
}

impl Artwork {
    pub fn load(assets: &mut dyn AssetProvider) -> Result<Self, AssetError> {
        Ok(Artwork {
            background: assets.load_image(BACKGROUND)?,
            base: assets.load_image(BASE)?,
            pipe_lower: assets.load_image(PIPE_LOWER)?,
            pipe_upper: assets.load_image(PIPE_UPPER)?,
            bird: [
                assets.load_image(BIRD_UP)?,
                assets.load_image(BIRD_MID)?,
                assets.load_image(BIRD_DOWN)?,
            ],
            message: assets.load_image(MESSAGE)?,
            restart: assets.load_image(RESTART)?,
        })
    }
}

impl Sounds {
    pub fn load(assets: &mut dyn AssetProvider) -> Result<Self, AssetError> {
        Ok(Sounds {
            swoosh: assets.load_sound(SWOOSH)?,
            wing: assets.load_sound(WING)?,
            point: assets.load_sound(POINT)?,
            hit: assets.load_sound(HIT)?,
            die: assets.load_sound(DIE)?,
        })
    }
}

// ── Built-in ────────────────────────────────────────────────────────────────

/// Paints images and synthesizes sounds; needs nothing on disk.
#[derive(Debug, Default)]
pub struct BuiltinAssets;

impl AssetProvider for BuiltinAssets {
    fn load_image(&mut self, name: &str) -> Result<Sprite, AssetError> {
        let sprite = match name {
            BACKGROUND => art::background(),
            BASE => art::base(),
            PIPE_LOWER => art::pipe_lower(),
            PIPE_UPPER => art::pipe_upper(),
            BIRD_UP => art::bird(Wing::Up),
            BIRD_MID => art::bird(Wing::Mid),
            BIRD_DOWN => art::bird(Wing::Down),
            MESSAGE => art::message(),
            RESTART => art::restart(),
            _ => return Err(AssetError::Unknown(name.to_string())),
        };
        Ok(sprite)
    }

    fn load_sound(&mut self, name: &str) -> Result<Clip, AssetError> {
        let clip = match name {
            SWOOSH => audio::synth_swoosh(),
            WING => audio::synth_wing(),
            POINT => audio::synth_point(),
            HIT => audio::synth_hit(),
            DIE => audio::synth_die(),
            _ => return Err(AssetError::Unknown(name.to_string())),
        };
        Ok(clip)
    }
}

// ── From disk ───────────────────────────────────────────────────────────────

/// Loads `images/<name>` and `audio/<name>` below a root folder.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        info!("Loading assets from {}", root.display());
        DirAssets { root }
    }

    fn path(&self, folder: &str, name: &str) -> Result<PathBuf, AssetError> {
        let path = self.root.join(folder).join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(AssetError::Missing(path))
        }
    }
}

/// Alpha below half counts as transparent.
fn decode_png(path: &Path) -> Result<Sprite, AssetError> {
    let img = image::open(path)
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (w, h) = img.dimensions();
    let px = img
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            (a >= 128).then_some(Rgb(r, g, b))
        })
        .collect();
    Ok(Sprite::from_pixels(w as usize, h as usize, px))
}

impl AssetProvider for DirAssets {
    fn load_image(&mut self, name: &str) -> Result<Sprite, AssetError> {
        let path = self.path("images", name)?;
        debug!("image {}", path.display());
        decode_png(&path)
    }

    fn load_sound(&mut self, name: &str) -> Result<Clip, AssetError> {
        let path = self.path("audio", name)?;
        debug!("sound {}", path.display());
        let bytes = fs::read(&path).map_err(|source| AssetError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Clip::new(name, ClipData::Encoded(Arc::from(bytes))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_provides_every_asset() {
        let mut assets = BuiltinAssets;
        let art = Artwork::load(&mut assets).unwrap();
        assert_eq!(art.pipe_lower.height(), 320);
        assert_eq!(art.bird[1].width(), 34);
        let sounds = Sounds::load(&mut assets).unwrap();
        assert_eq!(sounds.point.name(), POINT);
    }

    #[test]
    fn builtin_rejects_unknown_names() {
        let err = BuiltinAssets.load_image("redbird.png").unwrap_err();
        assert!(matches!(err, AssetError::Unknown(ref n) if n == "redbird.png"));
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let mut assets = DirAssets::new("/nonexistent/flappy");
        let err = assets.load_image(BASE).unwrap_err();
        match err {
            AssetError::Missing(p) => assert!(p.ends_with("images/base.png")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            assets.load_sound(WING),
            Err(AssetError::Missing(_))
        ));
    }
}
