//! Browser-backed intersection service and frame scheduler.
//!
//! Both hold a JS closure that calls back into the engine through the shared
//! [`EngineSlot`], which is filled once the engine has been built.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use js_sys::Array;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use vip25_reveal_core::{FrameScheduler, IntersectionEntry, IntersectionService, ObserverOptions};

use crate::EngineSlot;

pub struct DomIntersectionService {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl DomIntersectionService {
    pub fn new(options: &ObserverOptions, slot: EngineSlot) -> Result<Self, JsValue> {
        let threshold = options.threshold;
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                let Some(engine) = slot.get().and_then(Weak::upgrade) else {
                    return;
                };
                engine.handle_intersections(&entries_from_js(&entries, threshold));
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        init.set_root_margin(&options.root_margin.to_string());
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for DomIntersectionService {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Convert an observer batch. The browser reports any overlap as
/// intersecting; only elements that reached `threshold` count.
pub fn entries_from_js(entries: &Array, threshold: f64) -> Vec<IntersectionEntry<Element>> {
    entries
        .iter()
        .map(|v| {
            let entry: IntersectionObserverEntry = v.unchecked_into();
            let ratio = entry.intersection_ratio();
            IntersectionEntry {
                target: entry.target(),
                is_intersecting: entry.is_intersecting() && ratio >= threshold,
                intersection_ratio: ratio,
            }
        })
        .collect()
}

impl IntersectionService<Element> for DomIntersectionService {
    fn register(&self, node: &Element) {
        // observing an already observed target is a no-op in the browser
        self.observer.observe(node);
    }

    fn unregister_all(&self) {
        self.observer.disconnect();
    }
}

/// Runs [`vip25_reveal_core::RevealEngine::on_animation_frame`] from
/// `requestAnimationFrame`.
pub struct DomFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
    /// Id of the outstanding request, cancelled on drop.
    request: Rc<Cell<Option<i32>>>,
}

impl DomFrameScheduler {
    pub fn new(window: Window, slot: EngineSlot) -> Self {
        let request = Rc::new(Cell::new(None));
        let fired = request.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            fired.set(None);
            if let Some(engine) = slot.get().and_then(Weak::upgrade) {
                engine.on_animation_frame();
            }
        });
        Self {
            window,
            callback,
            request,
        }
    }
}

impl FrameScheduler for DomFrameScheduler {
    fn request_frame(&self) {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => self.request.set(Some(id)),
            Err(e) => warn!("requestAnimationFrame failed: {e:?}"),
        }
    }
}

impl Drop for DomFrameScheduler {
    fn drop(&mut self) {
        if let Some(id) = self.request.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }
}
