//! Boundary between the controllers and the host page.
//!
//! Each controller is constructed from values implementing these traits. The
//! `web` module implements them over `web-sys`; tests implement them with
//! in-memory fakes. Everything runs on one thread, so handles are shared with
//! `Rc` and mutated through `&self`.

use std::rc::Rc;

use crate::error::Result;

/// A content section the navigation can point at.
pub trait SectionNode {
    /// The section's identifier attribute. Empty identifiers are ignored.
    fn section_id(&self) -> String;

    /// Distance from the top of the document, read from current layout.
    fn layout_top(&self) -> f64;
}

/// A navigation link whose reference targets a section.
pub trait NavLinkNode {
    /// Raw reference attribute, e.g. `#install`.
    fn href(&self) -> Option<String>;

    fn is_active(&self) -> bool;

    fn set_active(&self, active: bool);
}

pub trait Viewport {
    /// Current vertical scroll position.
    fn scroll_y(&self) -> f64;
}

/// Runs a task before the next rendered frame.
pub trait FrameScheduler {
    fn request_frame(&self, task: Box<dyn FnOnce()>);
}

/// Fire-and-forget delayed tasks. Scheduled tasks are never cancelled.
pub trait TimerScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Anything with a text label: copy buttons and the theme toggle.
pub trait LabelTarget {
    fn set_label(&self, label: &str);
}

/// A code-sample container, e.g. a `<pre>` element.
pub trait CodeContainer {
    type Button: LabelTarget;

    /// Text content of the embedded code element, verbatim, read on every
    /// call. `None` unless the container holds exactly one code element.
    fn code_text(&self) -> Option<String>;

    /// Insert a copy button carrying `label` into the container.
    fn attach_button(&self, label: &str) -> Option<Self::Button>;
}

/// The platform's asynchronous clipboard.
#[allow(async_fn_in_trait)]
pub trait Clipboard {
    /// Feature check for the asynchronous write capability.
    fn is_available(&self) -> bool;

    /// Resolves once the platform confirms or rejects the write.
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// The legacy synchronous copy path: off-screen editable field, select all,
/// copy command, remove field.
pub trait LegacyCopy {
    fn copy_text(&self, text: &str) -> Result<()>;
}

/// Durable key-value storage scoped to the browsing origin.
pub trait PreferenceStore {
    /// Read errors are reported as `None`.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// The document element carrying the theme attribute.
pub trait ThemeDocument {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);
}

impl<T: SectionNode + ?Sized> SectionNode for Rc<T> {
    fn section_id(&self) -> String {
        (**self).section_id()
    }

    fn layout_top(&self) -> f64 {
        (**self).layout_top()
    }
}

impl<T: NavLinkNode + ?Sized> NavLinkNode for Rc<T> {
    fn href(&self) -> Option<String> {
        (**self).href()
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn set_active(&self, active: bool) {
        (**self).set_active(active)
    }
}

impl<T: LabelTarget + ?Sized> LabelTarget for Rc<T> {
    fn set_label(&self, label: &str) {
        (**self).set_label(label)
    }
}

/// A missing affordance swallows label updates.
impl<T: LabelTarget> LabelTarget for Option<T> {
    fn set_label(&self, label: &str) {
        if let Some(target) = self {
            target.set_label(label);
        }
    }
}

/// Section identifier targeted by a navigation reference.
///
/// Only same-page fragment references (`#id`) target sections; an empty
/// fragment targets nothing.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// The code text of a container, given the text of each code element inside
/// it. A container with zero or several code elements has no copyable text.
pub fn sole_code_text<I>(texts: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut texts = texts.into_iter();
    let first = texts.next()?;
    match texts.next() {
        Some(_) => None,
        None => Some(first),
    }
}
