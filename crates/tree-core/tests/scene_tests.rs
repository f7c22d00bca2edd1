// Host-side tests for procedural scene generation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;
use tree_core::*;

fn photo_urls(k: usize) -> Vec<String> {
    (1..=k).map(|i| format!("./img{i}.png")).collect()
}

fn build(seed: u64) -> SceneGroup {
    let config = SceneConfig::default().with_photos(photo_urls(7));
    SceneBuilder::new(config).unwrap().build_seeded(seed)
}

#[test]
fn particle_count_is_fixed_by_config() {
    let scene = build(1);
    assert_eq!(scene.particles.len(), PARTICLE_COUNT);

    let small = SceneConfig {
        particle_count: 12,
        ..SceneConfig::default()
    };
    let scene = SceneBuilder::new(small).unwrap().build_seeded(1);
    assert_eq!(scene.particles.len(), 12);
}

#[test]
fn particles_stay_inside_the_cone() {
    for seed in [1, 2, 3] {
        let scene = build(seed);
        for p in scene.particles.particles() {
            let y = p.position.y;
            assert!((0.0..=TREE_HEIGHT).contains(&y), "height {y} out of range");
            let radius = (p.position.x * p.position.x + p.position.z * p.position.z).sqrt();
            let limit = (1.0 - y / TREE_HEIGHT) * TREE_BASE_RADIUS;
            assert!(radius <= limit + 1e-5, "radius {radius} exceeds {limit} at y={y}");
        }
    }
}

#[test]
fn colour_depends_only_on_height() {
    let scene = build(4);
    for p in scene.particles.particles() {
        let expected = color::hsl_to_rgb(
            p.position.y / TREE_HEIGHT,
            PARTICLE_SATURATION,
            PARTICLE_LIGHTNESS,
        );
        assert_eq!(p.color, expected);
        assert_eq!(p.color, height_color(p.position.y, TREE_HEIGHT));
    }
}

#[test]
fn hue_increases_with_height_until_violet() {
    // Sample the ramp below the wrap point: red at the base, through green and
    // blue, toward violet near the apex.
    let base = height_color(0.0, TREE_HEIGHT);
    let green = height_color(TREE_HEIGHT / 3.0, TREE_HEIGHT);
    let blue = height_color(TREE_HEIGHT * 2.0 / 3.0, TREE_HEIGHT);
    assert!(base[0] > base[1] && base[0] > base[2]);
    assert!(green[1] > green[0] && green[1] > green[2]);
    assert!(blue[2] > blue[0] && blue[2] > blue[1]);
    let violet = height_color(TREE_HEIGHT * 0.8, TREE_HEIGHT);
    assert!(violet[2] > violet[1] && violet[0] > violet[1]);
}

#[test]
fn radius_draws_favour_the_trunk() {
    // Uniform radius draws put about half the points inside half the local
    // radius; area-uniform sampling would put only a quarter there.
    let scene = build(9);
    let inner = scene
        .particles
        .particles()
        .iter()
        .filter(|p| {
            let y = p.position.y;
            let limit = (1.0 - y / TREE_HEIGHT) * TREE_BASE_RADIUS;
            let r = (p.position.x * p.position.x + p.position.z * p.position.z).sqrt();
            r <= 0.5 * limit
        })
        .count();
    let frac = inner as f32 / scene.particles.len() as f32;
    assert!(frac > 0.4 && frac < 0.6, "inner fraction {frac}");
}

#[test]
fn photos_spiral_evenly_around_the_tree() {
    let scene = build(5);
    let k = scene.photos.len();
    assert_eq!(k, 7);
    for (i, decal) in scene.photos.iter().enumerate() {
        let expected_angle = i as f32 / k as f32 * TAU;
        assert!((photo_angle(i, k) - expected_angle).abs() < 1e-6);
        assert!((decal.position.y - (0.8 + 0.6 * i as f32)).abs() < 1e-5);

        let angle = decal.position.z.atan2(decal.position.x).rem_euclid(TAU);
        assert!((angle - expected_angle).abs() < 1e-4, "decal {i} at {angle}");
        let r = (decal.position.x.powi(2) + decal.position.z.powi(2)).sqrt();
        assert!((r - PHOTO_RING_RADIUS).abs() < 1e-5);
        assert_eq!(decal.scale, glam::Vec2::splat(PHOTO_SCALE));
        assert_eq!(decal.texture, DecalTexture::Image(format!("./img{}.png", i + 1)));
    }
}

#[test]
fn scene_without_photos_still_has_a_label() {
    let scene = SceneBuilder::new(SceneConfig::default())
        .unwrap()
        .build_seeded(3);
    assert!(scene.photos.is_empty());
    assert_eq!(scene.decal_count(), 1);
    assert_eq!(scene.label.position, glam::Vec3::new(0.0, LABEL_HEIGHT, 0.0));
}

#[test]
fn builder_accepts_any_rng() {
    let builder = SceneBuilder::new(SceneConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let scene = builder.build(&mut rng);
    assert_eq!(scene.transform, GroupTransform::default());
}

#[test]
fn builder_rejects_invalid_config() {
    let config = SceneConfig {
        particle_count: 0,
        ..SceneConfig::default()
    };
    assert!(matches!(SceneBuilder::new(config), Err(ConfigError::NoParticles)));
}
