//! Background render orchestration.
//!
//! [`RenderManager::draw`] runs a render on a detached thread and reports
//! through callbacks. [`RenderManager::launch`] wraps the same machinery in
//! a [`RenderHandle`] with a cancel flag and an event channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::{Arc, Mutex, PoisonError};

use prism_core::{RenderSettings, Scene};

use crate::error::{RenderError, RenderResult};
use crate::renderer::{render_validated, RenderOutput};

const RENDER_THREAD_NAME: &str = "prism-render";

/// Lifecycle of a manager's current render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    #[default]
    Idle,
    Rendering,
    Completed,
    Cancelled,
}

/// Message from a render started with [`RenderManager::launch`].
#[derive(Debug)]
pub enum RenderEvent {
    /// Percentage of pixels finished, in `[0, 100]`
    Progress(f64),
    Finished(RenderOutput),
}

/// Runs at most one render at a time.
///
/// Cloning yields another view of the same manager.
#[derive(Debug, Clone, Default)]
pub struct RenderManager {
    state: Arc<Mutex<RenderState>>,
}

impl RenderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RenderState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start rendering `scene` on a background thread and return immediately.
    ///
    /// `on_progress` and `is_cancelled` are called from the render's worker
    /// threads. `on_complete` runs exactly once with the final image, also
    /// when the render was cancelled or one of the other callbacks panicked.
    /// By then the manager accepts a new render.
    pub fn draw<P, C, F>(
        &self,
        settings: RenderSettings,
        scene: Scene,
        on_progress: P,
        is_cancelled: C,
        on_complete: F,
    ) -> RenderResult<()>
    where
        P: Fn(f64) + Send + Sync + 'static,
        C: Fn() -> bool + Send + Sync + 'static,
        F: FnOnce(RenderOutput) + Send + 'static,
    {
        settings.validate()?;

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if *state == RenderState::Rendering {
                return Err(RenderError::AlreadyRendering);
            }
            *state = RenderState::Rendering;
        }

        let state = IdleOnUnwind(Arc::clone(&self.state));
        let spawned = std::thread::Builder::new()
            .name(RENDER_THREAD_NAME.into())
            .spawn(move || {
                let output = render_validated(&settings, &scene, &on_progress, &is_cancelled);

                state.set(if output.cancelled {
                    RenderState::Cancelled
                } else {
                    RenderState::Completed
                });
                on_complete(output);
            });

        if let Err(err) = spawned {
            *self.state.lock().unwrap_or_else(PoisonError::into_inner) = RenderState::Idle;
            return Err(RenderError::Spawn(err));
        }
        Ok(())
    }

    /// Start a render whose progress and result arrive on a [`RenderHandle`].
    pub fn launch(&self, settings: RenderSettings, scene: Scene) -> RenderResult<RenderHandle> {
        let cancel = Arc::new(AtomicBool::new(false));
        let (tx, events) = channel();

        let progress_tx = Mutex::new(tx.clone());
        let cancel_flag = Arc::clone(&cancel);

        self.draw(
            settings,
            scene,
            move |percent| {
                // The receiver may have been dropped; the render still runs to the end
                let _ = progress_tx
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .send(RenderEvent::Progress(percent));
            },
            move || cancel_flag.load(Ordering::Acquire),
            move |output| {
                let _ = tx.send(RenderEvent::Finished(output));
            },
        )?;

        Ok(RenderHandle { cancel, events })
    }
}

/// Puts the manager back to `Idle` if the render thread unwinds.
struct IdleOnUnwind(Arc<Mutex<RenderState>>);

impl IdleOnUnwind {
    fn set(&self, state: RenderState) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

impl Drop for IdleOnUnwind {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.set(RenderState::Idle);
        }
    }
}

/// Caller's side of a launched render.
#[derive(Debug)]
pub struct RenderHandle {
    cancel: Arc<AtomicBool>,
    events: Receiver<RenderEvent>,
}

impl RenderHandle {
    /// Ask the render to stop; pixels already started still finish.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    /// Next pending event, if any, without blocking.
    pub fn try_event(&self) -> Option<RenderEvent> {
        self.events.try_recv().ok()
    }

    /// Block until the next event. `None` once the render thread is gone.
    pub fn recv(&self) -> Option<RenderEvent> {
        self.events.recv().ok()
    }

    /// Block until the render finishes, discarding progress.
    ///
    /// Returns `None` if the render thread died without a result.
    pub fn wait(self) -> Option<RenderOutput> {
        while let Some(event) = self.recv() {
            if let RenderEvent::Finished(output) = event {
                return Some(output);
            }
        }
        None
    }

    /// Cancel-flag-only view, e.g. for a signal handler.
    pub fn canceller(&self) -> Canceller {
        Canceller(Arc::clone(&self.cancel))
    }
}

/// Cloneable trigger for [`RenderHandle::cancel`].
#[derive(Debug, Clone)]
pub struct Canceller(Arc<AtomicBool>);

impl Canceller {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}
