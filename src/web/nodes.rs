//! `web-sys` implementations of the page boundary traits.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlDocument, HtmlTextAreaElement, Storage, Window};

use crate::dom::{
    sole_code_text, Clipboard, CodeContainer, FrameScheduler, LabelTarget, LegacyCopy,
    NavLinkNode, PreferenceStore, SectionNode, ThemeDocument, TimerScheduler, Viewport,
};
use crate::error::{InteractError, Result};

/// Best-effort human readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub struct WebSection {
    element: Element,
    window: Window,
}

impl WebSection {
    pub fn new(element: Element, window: Window) -> Self {
        Self { element, window }
    }
}

impl SectionNode for WebSection {
    fn section_id(&self) -> String {
        self.element.id()
    }

    fn layout_top(&self) -> f64 {
        let scroll = self.window.scroll_y().unwrap_or(0.0);
        self.element.get_bounding_client_rect().top() + scroll
    }
}

pub struct WebNavLink {
    element: Element,
    active_class: String,
}

impl WebNavLink {
    pub fn new(element: Element, active_class: &str) -> Self {
        Self {
            element,
            active_class: active_class.to_string(),
        }
    }
}

impl NavLinkNode for WebNavLink {
    fn href(&self) -> Option<String> {
        self.element.get_attribute("href")
    }

    fn is_active(&self) -> bool {
        self.element.class_list().contains(&self.active_class)
    }

    fn set_active(&self, active: bool) {
        let classes = self.element.class_list();
        let result = if active {
            classes.add_1(&self.active_class)
        } else {
            classes.remove_1(&self.active_class)
        };
        if let Err(e) = result {
            log::warn!("[scroll] class update failed: {}", describe(&e));
        }
        let result = if active {
            self.element.set_attribute("aria-current", "location")
        } else {
            self.element.remove_attribute("aria-current")
        };
        if let Err(e) = result {
            log::warn!("[scroll] aria-current update failed: {}", describe(&e));
        }
    }
}

pub struct WebViewport(pub Window);

impl Viewport for WebViewport {
    fn scroll_y(&self) -> f64 {
        self.0.scroll_y().unwrap_or(0.0)
    }
}

/// Holds the pending `requestAnimationFrame` handle; dropping it would cancel
/// the callback. One frame is pending at a time, a new request replaces it.
#[derive(Default)]
pub struct AnimationFrames {
    pending: Rc<RefCell<Option<AnimationFrame>>>,
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&self, task: Box<dyn FnOnce()>) {
        let slot = Rc::clone(&self.pending);
        let handle = request_animation_frame(move |_| {
            slot.borrow_mut().take();
            task();
        });
        *self.pending.borrow_mut() = Some(handle);
    }
}

pub struct BrowserTimers;

impl TimerScheduler for BrowserTimers {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let _ = Timeout::new(delay_ms, task).forget();
    }
}

/// A button or toggle whose text content is its label.
pub struct WebLabel(pub Element);

impl LabelTarget for WebLabel {
    fn set_label(&self, label: &str) {
        self.0.set_text_content(Some(label));
    }
}

pub struct WebCodeBlock {
    element: Element,
    document: Document,
}

impl WebCodeBlock {
    pub fn new(element: Element, document: Document) -> Self {
        Self { element, document }
    }
}

impl CodeContainer for WebCodeBlock {
    type Button = WebLabel;

    fn code_text(&self) -> Option<String> {
        let codes = self.element.query_selector_all("code").ok()?;
        let texts = (0..codes.length())
            .filter_map(|i| codes.item(i))
            .map(|node| node.text_content().unwrap_or_default());
        sole_code_text(texts)
    }

    fn attach_button(&self, label: &str) -> Option<WebLabel> {
        let button = self.document.create_element("button").ok()?;
        let _ = button.set_attribute("type", "button");
        let _ = button.set_attribute("class", "copy-button");
        let _ = button.set_attribute("aria-label", "Copy code to clipboard");
        button.set_text_content(Some(label));
        self.element.append_child(&button).ok()?;
        Some(WebLabel(button))
    }
}

/// `navigator.clipboard.writeText`, looked up dynamically so that insecure
/// contexts and older engines fall through to the legacy path.
pub struct WebClipboard {
    window: Window,
}

impl WebClipboard {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn write_fn(&self) -> Option<(JsValue, Function)> {
        let clipboard = Reflect::get(&self.window.navigator(), &"clipboard".into()).ok()?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return None;
        }
        let write = Reflect::get(&clipboard, &"writeText".into())
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        Some((clipboard, write))
    }
}

impl Clipboard for WebClipboard {
    fn is_available(&self) -> bool {
        self.write_fn().is_some()
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        let (clipboard, write) = self.write_fn().ok_or(InteractError::ClipboardUnavailable)?;
        let rejected = |e: JsValue| InteractError::ClipboardRejected {
            details: describe(&e),
        };
        let promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(rejected)?
            .dyn_into::<Promise>()
            .map_err(rejected)?;
        JsFuture::from(promise).await.map_err(rejected)?;
        Ok(())
    }
}

pub struct WebLegacyCopy {
    document: Document,
}

impl WebLegacyCopy {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl LegacyCopy for WebLegacyCopy {
    fn copy_text(&self, text: &str) -> Result<()> {
        let failed = |e: JsValue| InteractError::LegacyCopyFailed {
            details: describe(&e),
        };
        let body = self.document.body().ok_or_else(|| InteractError::MissingElement {
            what: "document body".to_string(),
        })?;
        let html = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| InteractError::LegacyCopyFailed {
                details: "document does not support execCommand".to_string(),
            })?;

        let field = self
            .document
            .create_element("textarea")
            .map_err(failed)?
            .dyn_into::<HtmlTextAreaElement>()
            .map_err(|_| InteractError::LegacyCopyFailed {
                details: "textarea element has unexpected type".to_string(),
            })?;
        field.set_value(text);
        let _ = field.set_attribute(
            "style",
            "position:fixed;top:0;left:0;width:1px;height:1px;opacity:0;pointer-events:none;",
        );
        body.append_child(&field).map_err(failed)?;
        field.select();
        let copied = html.exec_command("copy");
        field.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(InteractError::LegacyCopyFailed {
                details: "copy command was not enabled".to_string(),
            }),
            Err(e) => Err(failed(e)),
        }
    }
}

/// `localStorage`, when the origin allows it.
pub struct WebStorage(pub Option<Storage>);

impl PreferenceStore for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self.0.as_ref().ok_or_else(|| InteractError::Storage {
            details: "localStorage unavailable".to_string(),
        })?;
        storage
            .set_item(key, value)
            .map_err(|e| InteractError::Storage {
                details: describe(&e),
            })
    }
}

/// The `<html>` element.
pub struct WebRoot(pub Element);

impl ThemeDocument for WebRoot {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.0.set_attribute(name, value) {
            log::warn!("[theme] setting {name} failed: {}", describe(&e));
        }
    }
}
