//! Bindings for the MediaPipe `Hands` and camera_utils `Camera` globals, and
//! conversion of detector results into core landmark lists.

use js_sys::{Array, Object, Promise, Reflect};
use tree_core::{
    HandLandmarks, Landmark, CAPTURE_HEIGHT, CAPTURE_WIDTH, DETECTOR_MAX_HANDS,
    DETECTOR_MIN_DETECTION_CONFIDENCE, DETECTOR_MIN_TRACKING_CONFIDENCE,
    DETECTOR_MODEL_COMPLEXITY,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `Hands` from `@mediapipe/hands`, loaded by a script tag.
    pub type Hands;

    #[wasm_bindgen(constructor, catch)]
    pub fn new(config: &JsValue) -> Result<Hands, JsValue>;

    #[wasm_bindgen(method, js_name = setOptions)]
    pub fn set_options(this: &Hands, options: &JsValue);

    #[wasm_bindgen(method, js_name = onResults)]
    pub fn on_results(this: &Hands, callback: &js_sys::Function);

    #[wasm_bindgen(method, catch)]
    pub fn send(this: &Hands, inputs: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method)]
    pub fn close(this: &Hands) -> Promise;

    /// `Camera` from `@mediapipe/camera_utils`.
    #[wasm_bindgen(js_name = Camera)]
    pub type MpCamera;

    #[wasm_bindgen(constructor, js_class = "Camera", catch)]
    pub fn new(video: &web_sys::HtmlVideoElement, options: &JsValue) -> Result<MpCamera, JsValue>;

    #[wasm_bindgen(method, js_class = "Camera")]
    pub fn start(this: &MpCamera) -> Promise;

    #[wasm_bindgen(method, js_class = "Camera")]
    pub fn stop(this: &MpCamera) -> Promise;
}

#[derive(Clone, Copy, Debug)]
pub struct DetectorConfig {
    pub max_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_hands: DETECTOR_MAX_HANDS,
            model_complexity: DETECTOR_MODEL_COMPLEXITY,
            min_detection_confidence: DETECTOR_MIN_DETECTION_CONFIDENCE,
            min_tracking_confidence: DETECTOR_MIN_TRACKING_CONFIDENCE,
        }
    }
}

impl DetectorConfig {
    pub fn to_js(&self) -> Result<JsValue, JsValue> {
        object(&[
            ("maxNumHands", JsValue::from(self.max_hands)),
            ("modelComplexity", JsValue::from(self.model_complexity)),
            (
                "minDetectionConfidence",
                JsValue::from(self.min_detection_confidence),
            ),
            (
                "minTrackingConfidence",
                JsValue::from(self.min_tracking_confidence),
            ),
        ])
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: CAPTURE_WIDTH,
            height: CAPTURE_HEIGHT,
        }
    }
}

pub fn object(entries: &[(&str, JsValue)]) -> Result<JsValue, JsValue> {
    let obj = Object::new();
    for (key, value) in entries {
        Reflect::set(&obj, &JsValue::from_str(key), value)?;
    }
    Ok(obj.into())
}

/// Read `multiHandLandmarks` from a results object. Anything missing or
/// malformed reads as "no hands".
pub fn parse_hands(results: &JsValue) -> Vec<HandLandmarks> {
    let hands = match Reflect::get(results, &JsValue::from_str("multiHandLandmarks")) {
        Ok(v) if Array::is_array(&v) => Array::from(&v),
        _ => return Vec::new(),
    };
    hands
        .iter()
        .filter(|hand| Array::is_array(hand))
        .map(|hand| Array::from(&hand).iter().map(|p| parse_landmark(&p)).collect())
        .collect()
}

fn parse_landmark(point: &JsValue) -> Landmark {
    let coord = |name: &str| {
        Reflect::get(point, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .map(|v| v as f32)
            .unwrap_or(f32::NAN)
    };
    Landmark::new(coord("x"), coord("y"), coord("z"))
}
