//! Procedural construction of the tree scene.
//!
//! The builder runs once at startup and produces a [`SceneGroup`]: a cone of
//! rainbow-coloured particles, a spiral of photo billboards and a text label
//! above the apex. Everything is positioned relative to the group so the
//! animation only ever touches [`SceneGroup::transform`].

use crate::animation::GroupTransform;
use crate::color::hsl_to_rgb;
use crate::constants::*;
use crate::error::ConfigError;
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

/// Two-line label rasterised onto an off-screen bitmap by the frontend.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelConfig {
    pub title: String,
    pub subtitle: String,
    pub font: String,
    pub bitmap_size: [u32; 2],
    pub line_y: [f32; 2],
    pub gradient: Vec<(f32, String)>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            title: LABEL_TITLE.to_string(),
            subtitle: LABEL_SUBTITLE.to_string(),
            font: LABEL_FONT.to_string(),
            bitmap_size: LABEL_BITMAP_SIZE,
            line_y: LABEL_LINE_Y,
            gradient: LABEL_GRADIENT
                .iter()
                .map(|(offset, color)| (*offset, color.to_string()))
                .collect(),
        }
    }
}

impl LabelConfig {
    pub fn lines(&self) -> [&str; 2] {
        [&self.title, &self.subtitle]
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub height: f32,
    pub base_radius: f32,
    pub photo_urls: Vec<String>,
    pub label: LabelConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            height: TREE_HEIGHT,
            base_radius: TREE_BASE_RADIUS,
            photo_urls: Vec::new(),
            label: LabelConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_photos<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photo_urls = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        for (field, value) in [("height", self.height), ("base_radius", self.base_radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// sRGB colour from the height ramp.
    pub color: [f32; 3],
}

/// Point samples filling the cone. Immutable once built.
#[derive(Clone, Debug)]
pub struct ParticleCloud {
    particles: Vec<Particle>,
}

impl ParticleCloud {
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DecalTexture {
    /// Raster image fetched by URL; stays transparent if loading fails.
    Image(String),
    /// Bitmap produced from the label at startup.
    Text(LabelConfig),
}

/// Camera-facing textured quad positioned relative to the group.
#[derive(Clone, Debug, PartialEq)]
pub struct Decal {
    pub position: Vec3,
    pub scale: Vec2,
    pub texture: DecalTexture,
}

#[derive(Clone, Debug)]
pub struct SceneGroup {
    pub particles: ParticleCloud,
    pub photos: Vec<Decal>,
    pub label: Decal,
    pub transform: GroupTransform,
}

impl SceneGroup {
    /// Photos followed by the label, in the order the renderer allocates
    /// decal slots.
    pub fn decals(&self) -> impl Iterator<Item = &Decal> {
        self.photos.iter().chain(std::iter::once(&self.label))
    }

    pub fn decal_count(&self) -> usize {
        self.photos.len() + 1
    }
}

pub struct SceneBuilder {
    config: SceneConfig,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn build_seeded(&self, seed: u64) -> SceneGroup {
        self.build(&mut StdRng::seed_from_u64(seed))
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> SceneGroup {
        let particles = generate_particles(
            rng,
            self.config.particle_count,
            self.config.height,
            self.config.base_radius,
        );
        let photos = photo_decals(&self.config.photo_urls);
        let label = label_decal(&self.config.label);
        log::debug!(
            "[scene] built {} particles, {} photo decals",
            particles.len(),
            photos.len()
        );
        SceneGroup {
            particles,
            photos,
            label,
            transform: GroupTransform::default(),
        }
    }
}

/// Fill a cone of `height` with `count` particles.
///
/// Radii are drawn uniformly rather than by area, so each horizontal slice is
/// denser near the trunk.
pub fn generate_particles<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    height: f32,
    base_radius: f32,
) -> ParticleCloud {
    let particles = (0..count)
        .map(|_| {
            let y = rng.gen_range(0.0..=height);
            let max_radius = (1.0 - y / height) * base_radius;
            let radius = max_radius * rng.gen::<f32>();
            let angle = rng.gen_range(0.0..TAU);
            Particle {
                position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
                color: height_color(y, height),
            }
        })
        .collect();
    ParticleCloud { particles }
}

#[inline]
pub fn height_color(y: f32, height: f32) -> [f32; 3] {
    hsl_to_rgb(y / height, PARTICLE_SATURATION, PARTICLE_LIGHTNESS)
}

/// Angle of photo `index` out of `count`, as a fraction of a full turn.
#[inline]
pub fn photo_angle(index: usize, count: usize) -> f32 {
    (index as f32 / count as f32) * TAU
}

#[inline]
pub fn photo_height(index: usize) -> f32 {
    PHOTO_BASE_HEIGHT + index as f32 * PHOTO_HEIGHT_STEP
}

pub fn photo_decals(urls: &[String]) -> Vec<Decal> {
    let count = urls.len();
    urls.iter()
        .enumerate()
        .map(|(i, url)| {
            let angle = photo_angle(i, count);
            Decal {
                position: Vec3::new(
                    angle.cos() * PHOTO_RING_RADIUS,
                    photo_height(i),
                    angle.sin() * PHOTO_RING_RADIUS,
                ),
                scale: Vec2::splat(PHOTO_SCALE),
                texture: DecalTexture::Image(url.clone()),
            }
        })
        .collect()
}

pub fn label_decal(label: &LabelConfig) -> Decal {
    Decal {
        position: Vec3::new(0.0, LABEL_HEIGHT, 0.0),
        scale: Vec2::from(LABEL_SCALE),
        texture: DecalTexture::Text(label.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_degenerate_configs() {
        let mut config = SceneConfig::default();
        assert!(config.validate().is_ok());
        config.particle_count = 0;
        assert_eq!(config.validate(), Err(ConfigError::NoParticles));

        let config = SceneConfig {
            height: 0.0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { field: "height", .. })
        ));

        let config = SceneConfig {
            base_radius: f32::NAN,
            ..SceneConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "base_radius",
                ..
            })
        ));
    }

    #[test]
    fn same_seed_builds_same_cloud() {
        let builder = SceneBuilder::new(SceneConfig::default()).unwrap();
        let a = builder.build_seeded(7);
        let b = builder.build_seeded(7);
        assert_eq!(a.particles.particles(), b.particles.particles());
    }

    #[test]
    fn label_sits_above_apex() {
        let decal = label_decal(&LabelConfig::default());
        assert!(decal.position.y > TREE_HEIGHT);
        assert_eq!(decal.scale, Vec2::new(3.8, 1.8));
        match decal.texture {
            DecalTexture::Text(label) => assert_eq!(label.lines()[0], "Merry Christmas"),
            other => panic!("unexpected texture {other:?}"),
        }
    }

    #[test]
    fn decals_list_photos_then_label() {
        let config = SceneConfig::default().with_photos(["a.png", "b.png"]);
        let scene = SceneBuilder::new(config).unwrap().build_seeded(1);
        let kinds: Vec<bool> = scene
            .decals()
            .map(|d| matches!(d.texture, DecalTexture::Image(_)))
            .collect();
        assert_eq!(kinds, vec![true, true, false]);
        assert_eq!(scene.decal_count(), 3);
    }
}
