//! Copy-to-clipboard buttons for code samples.
//!
//! A copy goes through at most two paths: the asynchronous clipboard (when
//! the platform offers it) and then the legacy selection-based command. The
//! outcome of that sequence is a [`CopyOutcome`]; the failure policy maps it
//! onto the button. Labels only change after the outcome is known, and every
//! non-idle label reverts after the configured timeout.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::{FailurePolicy, InteractConfig};
use crate::dom::{Clipboard, CodeContainer, LabelTarget, LegacyCopy, TimerScheduler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Copied,
    Failed,
}

/// Which path ended up handling a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The asynchronous clipboard accepted the text.
    Primary,
    /// The asynchronous clipboard was missing or refused; the legacy command
    /// copied the text.
    Fallback,
    /// Both paths failed.
    FallbackFailed,
}

impl CopyOutcome {
    pub fn button_state(self, policy: FailurePolicy) -> ButtonState {
        match (self, policy) {
            (CopyOutcome::Primary | CopyOutcome::Fallback, _) => ButtonState::Copied,
            (CopyOutcome::FallbackFailed, FailurePolicy::Lenient) => ButtonState::Copied,
            (CopyOutcome::FallbackFailed, FailurePolicy::Strict) => ButtonState::Failed,
        }
    }
}

#[derive(Debug, Clone)]
struct CopyLabels {
    idle: String,
    copied: String,
    failed: String,
}

impl CopyLabels {
    fn for_state(&self, state: ButtonState) -> &str {
        match state {
            ButtonState::Idle => &self.idle,
            ButtonState::Copied => &self.copied,
            ButtonState::Failed => &self.failed,
        }
    }
}

/// A code sample with its injected copy button.
pub struct CopyBlock<C: CodeContainer> {
    container: C,
    button: C::Button,
    state: Cell<ButtonState>,
}

impl<C: CodeContainer> CopyBlock<C> {
    pub fn state(&self) -> ButtonState {
        self.state.get()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn button(&self) -> &C::Button {
        &self.button
    }

    fn show(&self, state: ButtonState, labels: &CopyLabels) {
        self.state.set(state);
        self.button.set_label(labels.for_state(state));
    }
}

pub struct CodeBlockCopyController<P, Y, T> {
    clipboard: P,
    legacy: Y,
    timers: T,
    labels: Rc<CopyLabels>,
    policy: FailurePolicy,
    revert_timeout_ms: u32,
}

impl<P, Y, T> CodeBlockCopyController<P, Y, T>
where
    P: Clipboard,
    Y: LegacyCopy,
    T: TimerScheduler,
{
    pub fn new(clipboard: P, legacy: Y, timers: T, config: &InteractConfig) -> Self {
        Self {
            clipboard,
            legacy,
            timers,
            labels: Rc::new(CopyLabels {
                idle: config.copy_label.clone(),
                copied: config.copied_label.clone(),
                failed: config.failed_label.clone(),
            }),
            policy: config.failure_policy(),
            revert_timeout_ms: config.revert_timeout_ms,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Inject an idle copy button into every container that holds a code
    /// element. Containers without one are skipped.
    pub fn attach<C, I>(&self, containers: I) -> Vec<Rc<CopyBlock<C>>>
    where
        C: CodeContainer,
        I: IntoIterator<Item = C>,
    {
        let mut blocks = Vec::new();
        let mut skipped = 0usize;
        for container in containers {
            if container.code_text().is_none() {
                skipped += 1;
                continue;
            }
            match container.attach_button(&self.labels.idle) {
                Some(button) => blocks.push(Rc::new(CopyBlock {
                    container,
                    button,
                    state: Cell::new(ButtonState::Idle),
                })),
                None => skipped += 1,
            }
        }
        log::debug!(
            "[copy] attached buttons={} skipped={}",
            blocks.len(),
            skipped
        );
        blocks
    }

    /// Put `text` on the clipboard, trying the asynchronous path first.
    pub async fn copy_text(&self, text: &str) -> CopyOutcome {
        if self.clipboard.is_available() {
            match self.clipboard.write_text(text).await {
                Ok(()) => return CopyOutcome::Primary,
                Err(e) => log::warn!("[copy] primary path failed, falling back: {e}"),
            }
        } else {
            log::debug!("[copy] asynchronous clipboard unavailable, using fallback");
        }

        match self.legacy.copy_text(text) {
            Ok(()) => CopyOutcome::Fallback,
            Err(e) => {
                log::warn!("[copy] fallback failed: {e}");
                CopyOutcome::FallbackFailed
            }
        }
    }

    /// Click handler: copy the block's current code text, show the result,
    /// and schedule the revert to idle.
    ///
    /// The code text is read at click time. Each call arms its own revert
    /// timer; overlapping timers all land on the idle label.
    pub async fn copy<C>(&self, block: &Rc<CopyBlock<C>>) -> ButtonState
    where
        C: CodeContainer + 'static,
        C::Button: 'static,
    {
        let Some(text) = block.container.code_text() else {
            log::debug!("[copy] code element disappeared; ignoring click");
            return block.state();
        };

        let outcome = self.copy_text(&text).await;
        let state = outcome.button_state(self.policy);
        block.show(state, &self.labels);
        log::debug!(
            "[copy] outcome={outcome:?} state={state:?} bytes={}",
            text.len()
        );

        let revert_block = Rc::clone(block);
        let labels = Rc::clone(&self.labels);
        self.timers.schedule(
            self.revert_timeout_ms,
            Box::new(move || revert_block.show(ButtonState::Idle, &labels)),
        );
        state
    }
}
