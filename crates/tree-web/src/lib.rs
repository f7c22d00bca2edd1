#![cfg(target_arch = "wasm32")]
mod capture;
mod constants;
mod dom;
mod frame;
mod hands;
mod lifecycle;
mod render;
mod text;

use constants::{CANVAS_ID, PHOTO_URLS, VIDEO_ID};
use frame::{DecalQueue, FrameContext};
use hands::{CaptureConfig, DetectorConfig};
use lifecycle::{LifecycleAction, PageLifecycle, PageTransition};
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::DecalImage;
use std::cell::RefCell;
use std::rc::Rc;
use tree_core::{DecalTexture, HandSignals, SceneBuilder, SceneConfig, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gesture-tree starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, CANVAS_ID)?;
    let video: web::HtmlVideoElement = dom::element_by_id(&document, VIDEO_ID)?;

    // Canvas backing store follows CSS size * devicePixelRatio
    let viewport = Rc::new(RefCell::new(Viewport::new(canvas.width(), canvas.height())));
    dom::sync_canvas_backing_size(&canvas, &mut viewport.borrow_mut());
    {
        let canvas = canvas.clone();
        let viewport = viewport.clone();
        dom::add_window_listener("resize", move || {
            dom::sync_canvas_backing_size(&canvas, &mut viewport.borrow_mut());
        });
    }

    let builder = SceneBuilder::new(SceneConfig::default().with_photos(PHOTO_URLS))?;
    let scene = builder.build(&mut StdRng::from_entropy());

    // cloned so no borrow is held across the await
    let camera = viewport.borrow().camera.clone();
    let gpu = frame::init_gpu(&canvas, &scene, &camera).await;
    let pending = frame::decal_queue();
    queue_label(&document, &scene, &pending);
    for (index, photo) in scene.photos.iter().enumerate() {
        if let DecalTexture::Image(url) = &photo.texture {
            spawn_photo_load(&document, index, url.clone(), pending.clone());
        }
    }

    let signals = Rc::new(RefCell::new(HandSignals::default()));
    let mut tracking = match capture::start_tracking(
        video,
        signals.clone(),
        DetectorConfig::default(),
        CaptureConfig::default(),
    ) {
        Ok(t) => Some(t),
        Err(e) => {
            log::warn!("[gesture] tracking disabled: {:?}", e);
            None
        }
    };

    let ctx = Rc::new(RefCell::new(FrameContext::new(
        signals,
        scene.transform,
        viewport,
        gpu,
        pending,
    )));
    let animation = frame::start_loop(ctx);

    let mut page = PageLifecycle::new();
    let handle_transition = move |transition: PageTransition| {
        match page.on_transition(transition) {
            LifecycleAction::Suspend => {
                animation.stop();
                if let Some(t) = &tracking {
                    t.suspend();
                }
            }
            LifecycleAction::Resume => {
                animation.resume();
                if let Some(t) = &tracking {
                    t.resume();
                }
            }
            LifecycleAction::Teardown => {
                animation.stop();
                if let Some(t) = tracking.take() {
                    t.stop();
                }
            }
            LifecycleAction::Ignore => log::debug!(
                "[page] {:?} ignored (suspended={}, torn_down={})",
                transition,
                page.is_suspended(),
                page.is_torn_down()
            ),
        }
    };
    let handle_transition = Rc::new(RefCell::new(handle_transition));
    {
        let handle = handle_transition.clone();
        dom::add_window_event_listener("pagehide", move |e| {
            let persisted = dom::page_persisted(&e);
            (&mut *handle.borrow_mut())(PageTransition::Hide { persisted });
        });
    }
    dom::add_window_event_listener("pageshow", move |e| {
        let persisted = dom::page_persisted(&e);
        (&mut *handle_transition.borrow_mut())(PageTransition::Show { persisted });
    });
    Ok(())
}

fn queue_label(document: &web::Document, scene: &tree_core::SceneGroup, pending: &DecalQueue) {
    let DecalTexture::Text(label) = &scene.label.texture else {
        return;
    };
    match text::rasterize_label(document, label) {
        Ok(bitmap) => pending
            .borrow_mut()
            .push((scene.photos.len(), DecalImage::Canvas(bitmap))),
        Err(e) => log::warn!("[decal] label rasterization failed: {:?}", e),
    }
}

/// Fetch and decode one photo, queueing it for upload. A failure leaves the
/// slot transparent.
fn spawn_photo_load(document: &web::Document, index: usize, url: String, pending: DecalQueue) {
    let img = match document
        .create_element("img")
        .map_err(|e| anyhow::anyhow!("{:?}", e))
        .and_then(|el| {
            el.dyn_into::<web::HtmlImageElement>()
                .map_err(|e| anyhow::anyhow!("{:?}", e))
        }) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("[decal] cannot create image for {}: {:?}", url, e);
            return;
        }
    };
    img.set_src(&url);
    spawn_local(async move {
        match JsFuture::from(img.decode()).await {
            Ok(_) => pending.borrow_mut().push((index, DecalImage::Image(img))),
            Err(e) => log::warn!("[decal] failed to load {}: {:?}", url, e),
        }
    });
}
