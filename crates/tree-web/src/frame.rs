use crate::constants::{FPS_REPORT_INTERVAL_SEC, MAX_DECALS};
use crate::render::{self, DecalImage};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tree_core::{ControlLaw, GroupTransform, HandSignals, Viewport};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Decal pixels waiting to be uploaded on the next frame, keyed by slot.
pub type DecalQueue = Rc<RefCell<Vec<(usize, DecalImage)>>>;

pub fn decal_queue() -> DecalQueue {
    Rc::new(RefCell::new(Vec::with_capacity(MAX_DECALS)))
}

pub struct FrameContext<'a> {
    pub signals: Rc<RefCell<HandSignals>>,
    pub transform: GroupTransform,
    pub law: ControlLaw,
    pub viewport: Rc<RefCell<Viewport>>,
    pub gpu: Option<render::GpuState<'a>>,
    pub pending_decals: DecalQueue,
    pub clock: FrameClock,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        signals: Rc<RefCell<HandSignals>>,
        transform: GroupTransform,
        viewport: Rc<RefCell<Viewport>>,
        gpu: Option<render::GpuState<'a>>,
        pending_decals: DecalQueue,
    ) -> Self {
        Self {
            signals,
            transform,
            law: ControlLaw::default(),
            viewport,
            gpu,
            pending_decals,
            clock: FrameClock::new(),
        }
    }

    pub fn frame(&mut self) {
        self.clock.tick();

        // Signals are copied so the detector callback never waits on a frame
        let signals = *self.signals.borrow();
        self.law.tick(&mut self.transform, signals);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        for (index, image) in self.pending_decals.borrow_mut().drain(..) {
            match gpu.set_decal_image(index, &image) {
                Ok(()) => log::debug!(
                    "[decal] slot {} uploaded ({} ready)",
                    index,
                    gpu.loaded_decals()
                ),
                Err(e) => log::warn!("[decal] slot {} upload failed: {:?}", index, e),
            }
        }

        let viewport = self.viewport.borrow();
        let (width, height) = viewport.size();
        gpu.resize_if_needed(width, height);
        if let Err(e) = gpu.render(&viewport.camera, &self.transform) {
            log::error!("render error: {:?}", e);
        }
    }
}

/// Wall-clock frame counter that periodically reports the frame rate.
pub struct FrameClock {
    window_start: Instant,
    frames: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            window_start: Instant::now(),
            frames: 0,
        }
    }

    pub fn tick(&mut self) {
        self.frames += 1;
        let elapsed = self.window_start.elapsed().as_secs_f32();
        if elapsed >= FPS_REPORT_INTERVAL_SEC {
            log::debug!("[frame] {:.1} fps", self.frames as f32 / elapsed);
            self.frames = 0;
            self.window_start = Instant::now();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    scene: &tree_core::SceneGroup,
    camera: &tree_core::PerspectiveCamera,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, scene, camera).await {
        Ok(g) => {
            log::info!("[gpu] ready");
            Some(g)
        }
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Running animation loop. Dropping the handle does not stop it.
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

impl LoopHandle {
    /// Cancel the scheduled frame and prevent any further ones.
    pub fn stop(&self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        log::info!("[frame] loop stopped");
    }

    /// Re-arm a stopped loop. No-op while running.
    pub fn resume(&self) {
        if self.running.replace(true) {
            return;
        }
        self.pending.set(schedule(&self.tick));
        log::info!("[frame] loop resumed");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let running = Rc::new(Cell::new(true));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let pending_tick = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        pending_tick.set(schedule(&tick_clone));
    }) as Box<dyn FnMut()>));
    pending.set(schedule(&tick));

    LoopHandle {
        running,
        pending,
        tick,
    }
}

fn schedule(tick: &TickClosure) -> Option<i32> {
    let w = web::window()?;
    let tick = tick.borrow();
    let callback = tick.as_ref()?;
    w.request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}
