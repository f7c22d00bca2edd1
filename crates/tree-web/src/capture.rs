//! Camera capture and hand detection feeding the shared gesture signals.
//!
//! The camera pipeline calls `onFrame` and waits on the returned promise, so
//! one frame's detection finishes before the next is delivered. Detector
//! failures on a frame are logged and swallowed; a denied camera leaves the
//! signals at their neutral defaults.

use crate::constants::HANDS_CDN_BASE;
use crate::hands::{self, CaptureConfig, DetectorConfig, Hands, MpCamera};
use js_sys::{Promise, Reflect};
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{HandSignals, SignalUpdate};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys as web;

pub struct GestureTracking {
    hands: Hands,
    camera: MpCamera,
    video: web::HtmlVideoElement,
    _locate_file: Closure<dyn FnMut(String) -> String>,
    _on_results: Closure<dyn FnMut(JsValue)>,
    _on_frame: Closure<dyn FnMut() -> Promise>,
}

pub fn start_tracking(
    video: web::HtmlVideoElement,
    signals: Rc<RefCell<HandSignals>>,
    detector: DetectorConfig,
    capture: CaptureConfig,
) -> anyhow::Result<GestureTracking> {
    let locate_file = Closure::wrap(
        Box::new(|file: String| format!("{HANDS_CDN_BASE}{file}")) as Box<dyn FnMut(String) -> String>
    );
    let hands_config = hands::object(&[("locateFile", locate_file.as_ref().clone())])
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let hands = Hands::new(&hands_config)
        .map_err(|e| anyhow::anyhow!("MediaPipe Hands unavailable: {:?}", e))?;
    hands.set_options(&detector.to_js().map_err(|e| anyhow::anyhow!("{:?}", e))?);

    let on_results = Closure::wrap(Box::new(move |results: JsValue| {
        let detected = hands::parse_hands(&results);
        match signals.borrow_mut().apply_detection(&detected) {
            Ok(SignalUpdate::Updated) => {}
            Ok(SignalUpdate::Held) => log::trace!("[gesture] no hand, holding"),
            Err(e) => log::debug!("[gesture] skipped detection: {}", e),
        }
    }) as Box<dyn FnMut(JsValue)>);
    hands.on_results(on_results.as_ref().unchecked_ref());

    let hands_for_frame = hands.clone();
    let video_for_frame = video.clone();
    let on_frame = Closure::wrap(Box::new(move || {
        let hands = hands_for_frame.clone();
        let video = video_for_frame.clone();
        future_to_promise(async move {
            if let Err(e) = detect_frame(&hands, &video).await {
                log::debug!("[gesture] detector failed on frame: {:?}", e);
            }
            Ok(JsValue::UNDEFINED)
        })
    }) as Box<dyn FnMut() -> Promise>);

    let camera_options = hands::object(&[
        ("onFrame", on_frame.as_ref().clone()),
        ("width", JsValue::from(capture.width)),
        ("height", JsValue::from(capture.height)),
    ])
    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let camera = MpCamera::new(&video, &camera_options)
        .map_err(|e| anyhow::anyhow!("MediaPipe Camera unavailable: {:?}", e))?;

    let start = camera.start();
    spawn_local(async move {
        match JsFuture::from(start).await {
            Ok(_) => log::info!("[gesture] camera started"),
            Err(e) => log::warn!(
                "[gesture] camera unavailable, holding neutral signals: {:?}",
                e
            ),
        }
    });

    Ok(GestureTracking {
        hands,
        camera,
        video,
        _locate_file: locate_file,
        _on_results: on_results,
        _on_frame: on_frame,
    })
}

async fn detect_frame(hands: &Hands, video: &web::HtmlVideoElement) -> Result<(), JsValue> {
    let inputs = hands::object(&[("image", video.clone().into())])?;
    JsFuture::from(hands.send(&inputs)?).await?;
    Ok(())
}

impl GestureTracking {
    /// Release the camera while the page sits in the back/forward cache.
    /// The detector and its callbacks stay alive for `resume`.
    pub fn suspend(&self) {
        let stopped = self.camera.stop();
        spawn_local(async move {
            _ = JsFuture::from(stopped).await;
        });
        release_media_stream(&self.video);
        log::info!("[gesture] tracking suspended");
    }

    /// Reacquire the camera after `suspend`.
    pub fn resume(&self) {
        let start = self.camera.start();
        spawn_local(async move {
            match JsFuture::from(start).await {
                Ok(_) => log::info!("[gesture] tracking resumed"),
                Err(e) => log::warn!(
                    "[gesture] camera unavailable after resume, holding signals: {:?}",
                    e
                ),
            }
        });
    }

    /// Stop frame delivery, release the camera device and close the detector.
    ///
    /// The callbacks are kept alive until both promises settle so a late
    /// `onFrame` or `onResults` never reaches a dropped closure.
    pub fn stop(self) {
        let stopped = self.camera.stop();
        let closed = self.hands.close();
        release_media_stream(&self.video);
        spawn_local(async move {
            _ = JsFuture::from(stopped).await;
            _ = JsFuture::from(closed).await;
            drop(self);
        });
        log::info!("[gesture] tracking stopped");
    }
}

/// Stop every track on the video element's stream and detach it.
pub fn release_media_stream(video: &web::HtmlVideoElement) {
    let src = Reflect::get(video, &JsValue::from_str("srcObject")).unwrap_or(JsValue::NULL);
    if let Ok(stream) = src.dyn_into::<web::MediaStream>() {
        for track in stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
    }
    _ = Reflect::set(video, &JsValue::from_str("srcObject"), &JsValue::NULL);
}
