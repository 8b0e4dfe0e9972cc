//! In-memory page used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::{
    Clipboard, CodeContainer, FrameScheduler, LabelTarget, LegacyCopy, NavLinkNode,
    PreferenceStore, SectionNode, ThemeDocument, TimerScheduler, Viewport,
};
use crate::error::{InteractError, Result};

pub struct FakeSection {
    pub id: String,
    pub top: Cell<f64>,
}

impl FakeSection {
    pub fn new(id: &str, top: f64) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            top: Cell::new(top),
        })
    }
}

impl SectionNode for FakeSection {
    fn section_id(&self) -> String {
        self.id.clone()
    }

    fn layout_top(&self) -> f64 {
        self.top.get()
    }
}

/// Navigation link counting every actual class change.
pub struct FakeLink {
    pub href: Option<String>,
    pub active: Cell<bool>,
    pub mutations: Cell<usize>,
}

impl FakeLink {
    pub fn new(href: &str) -> Rc<Self> {
        Rc::new(Self {
            href: Some(href.to_string()),
            active: Cell::new(false),
            mutations: Cell::new(0),
        })
    }
}

impl NavLinkNode for FakeLink {
    fn href(&self) -> Option<String> {
        self.href.clone()
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn set_active(&self, active: bool) {
        self.active.set(active);
        self.mutations.set(self.mutations.get() + 1);
    }
}

#[derive(Default)]
pub struct FakeViewport {
    pub y: Cell<f64>,
}

impl Viewport for Rc<FakeViewport> {
    fn scroll_y(&self) -> f64 {
        self.y.get()
    }
}

/// Frame callbacks queued until the test renders a frame.
#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<Box<dyn FnOnce()>>>,
    pub requests: Cell<usize>,
}

impl ManualFrames {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Run every callback queued before this frame.
    pub fn render_frame(&self) {
        let due: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        for task in due {
            task();
        }
    }
}

impl FrameScheduler for Rc<ManualFrames> {
    fn request_frame(&self, task: Box<dyn FnOnce()>) {
        self.requests.set(self.requests.get() + 1);
        self.queue.borrow_mut().push(task);
    }
}

/// Simulated clock: timers only fire when the test advances time.
#[derive(Default)]
pub struct ManualClock {
    now_ms: Cell<u64>,
    pending: RefCell<Vec<(u64, Box<dyn FnOnce()>)>>,
}

impl ManualClock {
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn advance(&self, ms: u64) {
        let now = self.now_ms.get() + ms;
        self.now_ms.set(now);
        let due: Vec<_> = {
            let mut pending = self.pending.borrow_mut();
            let (due, later): (Vec<_>, Vec<_>) = pending.drain(..).partition(|(at, _)| *at <= now);
            *pending = later;
            due
        };
        for (_, task) in due {
            task();
        }
    }
}

impl TimerScheduler for Rc<ManualClock> {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        let at = self.now_ms.get() + u64::from(delay_ms);
        self.pending.borrow_mut().push((at, task));
    }
}

/// Label that remembers everything it has shown.
#[derive(Default)]
pub struct RecordingLabel {
    pub history: RefCell<Vec<String>>,
}

impl RecordingLabel {
    pub fn current(&self) -> Option<String> {
        self.history.borrow().last().cloned()
    }
}

impl LabelTarget for RecordingLabel {
    fn set_label(&self, label: &str) {
        self.history.borrow_mut().push(label.to_string());
    }
}

pub struct FakeContainer {
    pub code: Option<String>,
    pub button: RefCell<Option<Rc<RecordingLabel>>>,
}

impl FakeContainer {
    pub fn with_code(code: &str) -> Rc<Self> {
        Rc::new(Self {
            code: Some(code.to_string()),
            button: RefCell::new(None),
        })
    }

    pub fn without_code() -> Rc<Self> {
        Rc::new(Self {
            code: None,
            button: RefCell::new(None),
        })
    }

    pub fn button(&self) -> Option<Rc<RecordingLabel>> {
        self.button.borrow().clone()
    }
}

impl CodeContainer for Rc<FakeContainer> {
    type Button = Rc<RecordingLabel>;

    fn code_text(&self) -> Option<String> {
        self.code.clone()
    }

    fn attach_button(&self, label: &str) -> Option<Self::Button> {
        let button = Rc::new(RecordingLabel::default());
        button.set_label(label);
        *self.button.borrow_mut() = Some(Rc::clone(&button));
        Some(button)
    }
}

/// The system clipboard both copy paths write into.
pub type SystemClipboard = Rc<RefCell<Option<String>>>;

pub struct FakeClipboard {
    pub available: bool,
    pub reject: bool,
    pub system: SystemClipboard,
    pub writes: Cell<usize>,
    /// Label of the watched button at the moment the write was issued.
    pub watched: RefCell<Option<Rc<RecordingLabel>>>,
    pub label_at_write: RefCell<Option<String>>,
}

impl FakeClipboard {
    pub fn new(available: bool, reject: bool, system: &SystemClipboard) -> Self {
        Self {
            available,
            reject,
            system: Rc::clone(system),
            writes: Cell::new(0),
            watched: RefCell::new(None),
            label_at_write: RefCell::new(None),
        }
    }
}

impl Clipboard for FakeClipboard {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn write_text(&self, text: &str) -> Result<()> {
        self.writes.set(self.writes.get() + 1);
        if let Some(label) = self.watched.borrow().as_ref() {
            *self.label_at_write.borrow_mut() = label.current();
        }
        if self.reject {
            return Err(InteractError::ClipboardRejected {
                details: "NotAllowedError".to_string(),
            });
        }
        *self.system.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

pub struct FakeLegacyCopy {
    pub fail: bool,
    pub system: SystemClipboard,
    pub calls: Cell<usize>,
}

impl FakeLegacyCopy {
    pub fn new(fail: bool, system: &SystemClipboard) -> Self {
        Self {
            fail,
            system: Rc::clone(system),
            calls: Cell::new(0),
        }
    }
}

impl LegacyCopy for FakeLegacyCopy {
    fn copy_text(&self, text: &str) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(InteractError::LegacyCopyFailed {
                details: "execCommand threw".to_string(),
            });
        }
        *self.system.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub values: RefCell<HashMap<String, String>>,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with(key: &str, value: &str) -> Rc<Self> {
        let store = Self::default();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Rc::new(store)
    }
}

impl PreferenceStore for Rc<MemoryStore> {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(InteractError::Storage {
                details: "QuotaExceededError".to_string(),
            });
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDocument {
    pub attributes: RefCell<HashMap<String, String>>,
}

impl ThemeDocument for Rc<FakeDocument> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}
