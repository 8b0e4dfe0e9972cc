//! Scroll-synchronized navigation highlighting.
//!
//! The active section is the last one (in document order) whose adjusted
//! offset, its layout top minus the sticky header height, the page has
//! scrolled past. Above every threshold the first section is active.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::dom::{fragment_target, FrameScheduler, NavLinkNode, SectionNode, Viewport};

/// Index of the active section given each section's adjusted offset.
///
/// Scans from last to first and stops at the first offset `<= scroll_y`;
/// falls back to index 0. Returns `None` only when there are no sections.
pub fn active_index(adjusted_offsets: &[f64], scroll_y: f64) -> Option<usize> {
    if adjusted_offsets.is_empty() {
        return None;
    }
    Some(
        adjusted_offsets
            .iter()
            .rposition(|&offset| offset <= scroll_y)
            .unwrap_or(0),
    )
}

/// Tracks which section is in view and mirrors it onto the navigation links.
///
/// Construct once per page and share it through an `Rc`; scroll notifications
/// go through [`ScrollSectionTracker::on_scroll`], which coalesces them to one
/// recomputation per rendered frame.
pub struct ScrollSectionTracker<S, L, V, F> {
    sections: Vec<S>,
    links: Vec<L>,
    viewport: V,
    frames: F,
    header_offset_px: f64,
    active: RefCell<Option<String>>,
    frame_pending: Cell<bool>,
}

impl<S, L, V, F> ScrollSectionTracker<S, L, V, F>
where
    S: SectionNode + 'static,
    L: NavLinkNode + 'static,
    V: Viewport + 'static,
    F: FrameScheduler + 'static,
{
    /// Sections without an identifier are dropped; links are kept as given.
    pub fn new(
        sections: Vec<S>,
        links: Vec<L>,
        viewport: V,
        frames: F,
        header_offset_px: f64,
    ) -> Self {
        let sections: Vec<S> = sections
            .into_iter()
            .filter(|s| !s.section_id().is_empty())
            .collect();
        log::debug!(
            "[scroll] tracking sections={} links={} header_offset={}",
            sections.len(),
            links.len(),
            header_offset_px
        );
        Self {
            sections,
            links,
            viewport,
            frames,
            header_offset_px,
            active: RefCell::new(None),
            frame_pending: Cell::new(false),
        }
    }

    /// Identifier of the active section for the current layout and scroll
    /// position. Performs one layout read per section.
    pub fn compute_active(&self) -> Option<String> {
        let offsets: Vec<f64> = self
            .sections
            .iter()
            .map(|s| s.layout_top() - self.header_offset_px)
            .collect();
        active_index(&offsets, self.viewport.scroll_y())
            .map(|i| self.sections[i].section_id())
    }

    /// Recompute the active section and update the links now.
    ///
    /// Links are only touched when their state actually changes, so calling
    /// this again with unchanged inputs mutates nothing.
    pub fn refresh(&self) -> Option<String> {
        let active = self.compute_active();
        let changed = self.apply(active.as_deref());
        if changed > 0 {
            log::debug!("[scroll] active={active:?} links_changed={changed}");
        }
        *self.active.borrow_mut() = active.clone();
        active
    }

    /// Scroll notification. Defers the recomputation to the next frame; extra
    /// notifications before that frame are absorbed.
    pub fn on_scroll(self: &Rc<Self>) {
        if self.frame_pending.replace(true) {
            return;
        }
        let tracker = Rc::clone(self);
        self.frames.request_frame(Box::new(move || {
            tracker.frame_pending.set(false);
            tracker.refresh();
        }));
    }

    /// Result of the most recent recomputation.
    pub fn active_id(&self) -> Option<String> {
        self.active.borrow().clone()
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame_pending.get()
    }

    /// Only the first link targeting the active section is marked; later
    /// links to the same section (a second, mobile nav) stay inactive.
    fn apply(&self, active: Option<&str>) -> usize {
        let mut changed = 0;
        let mut claimed = false;
        for link in &self.links {
            let target = link.href();
            let want = match (active, target.as_deref().and_then(fragment_target)) {
                (Some(active), Some(target)) => !claimed && active == target,
                _ => false,
            };
            claimed |= want;
            if link.is_active() != want {
                link.set_active(want);
                changed += 1;
            }
        }
        changed
    }
}
