//! Browser wiring: builds the three controllers from the live document and
//! hooks them up to `scroll`, `resize` and `click` events.
//!
//! A page opts in either by embedding its configuration as
//! `<script type="application/json" id="docsite-interact-config">` (mounted
//! automatically when the module starts) or by calling `initDocsite()` from
//! its own script.

mod logger;
mod nodes;

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::config::InteractConfig;
use crate::copy::CodeBlockCopyController;
use crate::error::{InteractError, Result};
use crate::scroll::ScrollSectionTracker;
use crate::theme::ThemeController;

use nodes::{
    describe, AnimationFrames, BrowserTimers, WebClipboard, WebCodeBlock, WebLabel,
    WebLegacyCopy, WebNavLink, WebRoot, WebSection, WebStorage, WebViewport,
};

/// Id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "docsite-interact-config";

thread_local! {
    static MOUNTED: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen(start)]
pub fn start() {
    logger::install();
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(block) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        log::debug!("[init] no #{CONFIG_ELEMENT_ID}; waiting for initDocsite()");
        return;
    };
    let json = block.text_content().unwrap_or_default();
    let config = match InteractConfig::from_json(&json) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("[init] {e}; using defaults");
            InteractConfig::default()
        }
    };
    when_ready(&document, move || mount_once(&config));
}

/// Mount with an explicit JSON configuration, or the defaults when omitted.
#[wasm_bindgen(js_name = initDocsite)]
pub fn init_docsite(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    logger::install();
    let config = match config_json {
        Some(json) => InteractConfig::from_json(&json).map_err(to_js)?,
        None => InteractConfig::default(),
    };
    let document = page()?.1;
    when_ready(&document, move || mount_once(&config));
    Ok(())
}

fn to_js(err: InteractError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn page() -> std::result::Result<(Window, Document), JsValue> {
    let window = web_sys::window().ok_or_else(|| to_js(missing("window")))?;
    let document = window.document().ok_or_else(|| to_js(missing("document")))?;
    Ok((window, document))
}

fn missing(what: &str) -> InteractError {
    InteractError::MissingElement {
        what: what.to_string(),
    }
}

fn when_ready(document: &Document, mount: impl FnOnce() + 'static) {
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| mount()).forget();
    } else {
        mount();
    }
}

fn mount_once(config: &InteractConfig) {
    if MOUNTED.with(|m| m.replace(true)) {
        log::debug!("[init] already mounted");
        return;
    }
    let Ok((window, document)) = page() else {
        return;
    };

    // Each behavior stands alone; one failing to mount leaves the others.
    if let Err(e) = mount_scroll(&window, &document, config) {
        log::warn!("[init] scroll tracking disabled: {e}");
    }
    if let Err(e) = mount_copy(&window, &document, config) {
        log::warn!("[init] copy buttons disabled: {e}");
    }
    if config.theme_enabled {
        if let Err(e) = mount_theme(&window, &document, config) {
            log::warn!("[init] theme toggle disabled: {e}");
        }
    }
}

fn query_all(root: &Document, selector: &str) -> Result<Vec<Element>> {
    let list = root
        .query_selector_all(selector)
        .map_err(|e| InteractError::config(format!("selector {selector:?}: {}", describe(&e))))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn mount_scroll(window: &Window, document: &Document, config: &InteractConfig) -> Result<()> {
    let sections = query_all(document, &config.section_selector)?
        .into_iter()
        .map(|el| WebSection::new(el, window.clone()))
        .collect();
    let links = query_all(document, &config.nav_link_selector)?
        .into_iter()
        .map(|el| WebNavLink::new(el, &config.active_class))
        .collect();
    let tracker = Rc::new(ScrollSectionTracker::new(
        sections,
        links,
        WebViewport(window.clone()),
        AnimationFrames::default(),
        config.header_offset_px,
    ));
    tracker.refresh();

    for event in ["scroll", "resize"] {
        let tracker = Rc::clone(&tracker);
        EventListener::new(window, event, move |_| tracker.on_scroll()).forget();
    }
    Ok(())
}

fn mount_copy(window: &Window, document: &Document, config: &InteractConfig) -> Result<()> {
    let controller = Rc::new(CodeBlockCopyController::new(
        WebClipboard::new(window.clone()),
        WebLegacyCopy::new(document.clone()),
        BrowserTimers,
        config,
    ));
    let containers = query_all(document, &config.code_block_selector)?
        .into_iter()
        .map(|el| WebCodeBlock::new(el, document.clone()));

    for block in controller.attach(containers) {
        let button = block.button().0.clone();
        let controller = Rc::clone(&controller);
        EventListener::new(&button, "click", move |_| {
            let controller = Rc::clone(&controller);
            let block = Rc::clone(&block);
            wasm_bindgen_futures::spawn_local(async move {
                controller.copy(&block).await;
            });
        })
        .forget();
    }
    Ok(())
}

fn mount_theme(window: &Window, document: &Document, config: &InteractConfig) -> Result<()> {
    let root = document
        .document_element()
        .ok_or_else(|| missing("document element"))?;
    let toggle = document
        .query_selector(&config.theme_toggle_selector)
        .map_err(|e| InteractError::config(describe(&e)))?;
    let storage = WebStorage(window.local_storage().ok().flatten());

    let controller = Rc::new(ThemeController::new(
        WebRoot(root),
        storage,
        toggle.clone().map(WebLabel),
        config,
    ));
    controller.init();

    if let Some(toggle) = toggle {
        EventListener::new(&toggle, "click", move |_| {
            controller.toggle();
        })
        .forget();
    } else {
        log::debug!("[theme] no toggle matches {:?}", config.theme_toggle_selector);
    }
    Ok(())
}
