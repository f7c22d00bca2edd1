// Page wiring and asset locations for the web frontend.

// DOM element ids provided by index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "video";

// Photo decals, relative to the page
pub const PHOTO_URLS: [&str; 7] = [
    "./img1.png",
    "./img2.png",
    "./img3.png",
    "./img4.png",
    "./img5.png",
    "./img6.png",
    "./img7.png",
];

// MediaPipe Hands model files are resolved against this base
pub const HANDS_CDN_BASE: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands/";

// Background clear colour
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Frame-rate report interval for debug logging
pub const FPS_REPORT_INTERVAL_SEC: f32 = 5.0;

// Initial capacity of the pending decal upload queue (photos + label)
pub const MAX_DECALS: usize = 16;

// Samples per pixel for the scene pass; WebGPU accepts 1 or 4
pub const MSAA_SAMPLES: u32 = 4;
