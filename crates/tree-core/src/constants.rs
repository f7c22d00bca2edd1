use glam::Vec3;

// Shared scene and control tuning constants used by the web frontend and tests.

// Particle cloud
pub const PARTICLE_COUNT: usize = 3500;
pub const TREE_HEIGHT: f32 = 6.0;
pub const TREE_BASE_RADIUS: f32 = 2.5; // radius at y = 0, shrinking linearly to 0 at the apex
pub const PARTICLE_SIZE: f32 = 0.06; // world-space edge length of one point quad

// Height-to-colour ramp (HSL)
pub const PARTICLE_SATURATION: f32 = 0.8;
pub const PARTICLE_LIGHTNESS: f32 = 0.5;

// Photo decals, arranged as a rising spiral around the trunk
pub const PHOTO_BASE_HEIGHT: f32 = 0.8;
pub const PHOTO_HEIGHT_STEP: f32 = 0.6;
pub const PHOTO_RING_RADIUS: f32 = 1.8;
pub const PHOTO_SCALE: f32 = 0.9;

// Text label above the apex
pub const LABEL_HEIGHT: f32 = 6.8;
pub const LABEL_SCALE: [f32; 2] = [3.8, 1.8];
pub const LABEL_TITLE: &str = "Merry Christmas";
pub const LABEL_SUBTITLE: &str = "Happy New Year";
pub const LABEL_BITMAP_SIZE: [u32; 2] = [512, 256];
pub const LABEL_FONT: &str = "bold 56px \"PingFang SC\", Arial";
pub const LABEL_LINE_Y: [f32; 2] = [90.0, 160.0];
// (offset, css colour) stops of the horizontal fill gradient
pub const LABEL_GRADIENT: [(f32, &str); 3] = [(0.0, "#ffd700"), (0.5, "#ffffff"), (1.0, "#ff4d4d")];

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 3.0, 10.0);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 3.0, 0.0); // straight down -Z from the eye

// Control law
pub const ROTATION_GAIN: f32 = 3.0; // radians per unit of hand offset from centre
pub const HAND_X_CENTER: f32 = 0.5;
pub const NEUTRAL_HAND_SPAN: f32 = 0.18; // span that maps to scale 1
pub const SCALE_GAIN: f32 = 6.0;
pub const SCALE_MIN: f32 = 0.6;
pub const SCALE_MAX: f32 = 2.5;
pub const SMOOTHING_FACTOR: f32 = 0.1; // fraction of the remaining gap closed per tick

// Gesture defaults before any hand is seen
pub const DEFAULT_HAND_X: f32 = 0.5;
pub const DEFAULT_HAND_SIZE: f32 = 0.15;

// MediaPipe hand skeleton indices
pub const LANDMARK_INDEX_MCP: usize = 5;
pub const LANDMARK_MIDDLE_MCP: usize = 9;
pub const LANDMARK_PINKY_MCP: usize = 17;

// Detector and capture settings
pub const DETECTOR_MAX_HANDS: u32 = 1;
pub const DETECTOR_MODEL_COMPLEXITY: u32 = 1;
pub const DETECTOR_MIN_DETECTION_CONFIDENCE: f32 = 0.7;
pub const DETECTOR_MIN_TRACKING_CONFIDENCE: f32 = 0.7;
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
