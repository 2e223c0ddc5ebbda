use std::cell::OnceCell;
use std::rc::{Rc, Weak};

use log::{info, LevelFilter};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vip25_reveal_core::{RevealEngine, RevealSettings};

pub mod dom;
pub mod forms;
pub mod logger;
pub mod observer;

use crate::dom::DomDocument;
use crate::observer::{DomFrameScheduler, DomIntersectionService};

pub type SiteEngine = RevealEngine<DomDocument, DomIntersectionService, DomFrameScheduler>;

/// Late-bound engine reference shared by the observer and frame closures.
pub type EngineSlot = Rc<OnceCell<Weak<SiteEngine>>>;

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn js_err(e: JsValue) -> JsError {
    JsError::new(&format!("{e:?}"))
}

/// Live site wiring. Keep it referenced for the page's lifetime. Dropping it
/// removes the form listeners, disconnects the observer and cancels any
/// outstanding animation frame.
#[wasm_bindgen]
pub struct SiteHandle {
    engine: Rc<SiteEngine>,
    _listeners: Vec<forms::Listener>,
}

#[wasm_bindgen]
impl SiteHandle {
    #[wasm_bindgen(js_name = registered_count)]
    pub fn registered_count(&self) -> usize {
        self.engine.registered_count()
    }

    #[wasm_bindgen(js_name = pending_count)]
    pub fn pending_count(&self) -> usize {
        self.engine.pending_count()
    }

    /// Current reveal settings as a JS object.
    pub fn settings(&self) -> Result<JsValue, JsError> {
        swb::to_value(self.engine.settings())
            .map_err(|e| JsError::new(&format!("settings error: {e}")))
    }

    /// Disconnect the observer and drop pending reveals.
    pub fn teardown(&self) {
        self.engine.teardown();
    }
}

/// Wire reveals, forms and skill tags. Call once the DOM is parsed.
/// `settings` is an optional partial `RevealSettings` object, e.g.
///   init_site({ base_duration_ms: 400, observer: { threshold: 0.1 } })
#[wasm_bindgen(js_name = init_site)]
pub fn init_site(settings: JsValue) -> Result<SiteHandle, JsError> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Info);

    let settings: RevealSettings = if jsvalue_is_undefined_or_null(&settings) {
        RevealSettings::default()
    } else {
        swb::from_value(settings).map_err(|e| JsError::new(&format!("settings error: {e}")))?
    };

    let window = web_sys::window().ok_or_else(|| JsError::new("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsError::new("no document"))?;

    let slot: EngineSlot = Rc::new(OnceCell::new());
    let observer = DomIntersectionService::new(&settings.observer, slot.clone()).map_err(js_err)?;
    let frames = DomFrameScheduler::new(window.clone(), slot.clone());
    let engine = Rc::new(RevealEngine::new(
        DomDocument::new(document.clone()),
        observer,
        frames,
        settings,
    ));
    let _ = slot.set(Rc::downgrade(&engine));

    let report = engine.initialize();
    let listeners = forms::bind(&window, &document).map_err(js_err)?;
    info!(
        "site ready: {} reveal elements, {} listeners",
        report.registered,
        listeners.len()
    );

    Ok(SiteHandle {
        engine,
        _listeners: listeners,
    })
}

/// Adjust console verbosity: "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen(js_name = set_log_level)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level '{level}'")))?;
    logger::init(filter);
    Ok(())
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
