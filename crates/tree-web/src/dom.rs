use tree_core::{backing_size, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> anyhow::Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
        .dyn_into::<T>()
        .map_err(|e| anyhow::anyhow!("#{id} has unexpected type: {:?}", e))
}

#[inline]
pub fn add_window_listener(event: &str, mut handler: impl FnMut() + 'static) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn add_window_event_listener(event: &str, mut handler: impl FnMut(web::Event) + 'static) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(
            Box::new(move |e: web::Event| handler(e)) as Box<dyn FnMut(web::Event)>
        );
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// `persisted` flag of a `pagehide`/`pageshow` event; anything else reads
/// as not persisted.
pub fn page_persisted(event: &web::Event) -> bool {
    event
        .dyn_ref::<web::PageTransitionEvent>()
        .is_some_and(|e| e.persisted())
}

/// Match the canvas backing store to its CSS box times the device pixel
/// ratio and report the new size to the viewport.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &mut Viewport) {
    if let Some(w) = web::window() {
        let rect = canvas.get_bounding_client_rect();
        let (w_px, h_px) = backing_size(rect.width(), rect.height(), w.device_pixel_ratio());
        if canvas.width() != w_px || canvas.height() != h_px {
            canvas.set_width(w_px);
            canvas.set_height(h_px);
        }
        if viewport.resize(w_px, h_px) {
            log::debug!("[viewport] {}x{} aspect={:.3}", w_px, h_px, viewport.aspect());
        }
    }
}
