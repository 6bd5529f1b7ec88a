//! The image drawer: per-session generation requests and viewer.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tokio::task::AbortHandle;

use crate::application::services::ImageGenerationService;
use crate::domain::entities::{GeneratedImageRequest, ImageGenerationResult, SaveTarget};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawerError {
    #[error("Entry {0} not found")]
    EntryNotFound(u64),

    #[error("Entry {0} has no image to save")]
    NotCompleted(u64),

    #[error("Viewer is not open")]
    ViewerClosed,
}

/// Currently focused entry in the full-size viewer.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerState {
    pub index: usize,
    pub entry: GeneratedImageRequest,
}

/// Serializable view of a drawer.
#[derive(Debug, Clone, Serialize)]
pub struct DrawerSnapshot {
    pub entries: Vec<GeneratedImageRequest>,
    pub viewer: Option<ViewerState>,
}

struct DrawerEntry {
    request: GeneratedImageRequest,
    task: Option<AbortHandle>,
}

#[derive(Default)]
struct DrawerState {
    next_id: u64,
    entries: Vec<DrawerEntry>,
    viewer: Option<usize>,
}

impl DrawerState {
    fn position(&self, id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.request.id == id)
    }

    fn viewer_state(&self) -> Option<ViewerState> {
        let index = self.viewer?;
        self.entries.get(index).map(|e| ViewerState {
            index,
            entry: e.request.clone(),
        })
    }
}

/// Ordered list of image requests owned by one browser session.
///
/// Submissions append a pending entry immediately and run the generation
/// on a spawned task. All list mutations go through one mutex that is never
/// held across an `.await`. A result arriving for a dismissed entry is
/// dropped.
pub struct Drawer {
    service: Arc<ImageGenerationService>,
    cancel_on_dismiss: bool,
    state: Mutex<DrawerState>,
}

impl Drawer {
    pub fn new(service: Arc<ImageGenerationService>, cancel_on_dismiss: bool) -> Self {
        Self {
            service,
            cancel_on_dismiss,
            state: Mutex::new(DrawerState {
                next_id: 1,
                ..DrawerState::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, DrawerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a pending entry and starts its generation.
    ///
    /// Every call issues a new request; there is no deduplication. Returns
    /// the entry as inserted, still pending.
    pub fn submit(
        self: &Arc<Self>,
        prompt: &str,
        credential_override: Option<String>,
        test_mode: bool,
    ) -> GeneratedImageRequest {
        let entry = {
            let mut state = self.state();
            let id = state.next_id;
            state.next_id += 1;

            let request = GeneratedImageRequest::pending(id, prompt, credential_override, test_mode);
            state.entries.push(DrawerEntry {
                request: request.clone(),
                task: None,
            });
            request
        };

        tracing::debug!(id = entry.id, test_mode, "Drawer entry submitted");

        let drawer: Weak<Drawer> = Arc::downgrade(self);
        let service = self.service.clone();
        let id = entry.id;
        let prompt = prompt.to_string();
        let credential = entry.credential_override.clone();

        let handle = tokio::spawn(async move {
            let result = service
                .generate(&prompt, test_mode, credential.as_deref())
                .await;

            match drawer.upgrade() {
                Some(drawer) => drawer.complete(id, result),
                None => tracing::debug!(id, "Drawer closed, discarding result"),
            }
        });

        let mut state = self.state();
        if let Some(pos) = state.position(id)
            && state.entries[pos].request.state.is_pending()
        {
            state.entries[pos].task = Some(handle.abort_handle());
        }

        entry
    }

    fn complete(&self, id: u64, result: ImageGenerationResult) {
        let mut state = self.state();
        match state.position(id) {
            Some(pos) => {
                let entry = &mut state.entries[pos];
                entry.request.state = result.into();
                entry.request.credential_override = None;
                entry.task = None;
            }
            None => tracing::debug!(id, "Entry was dismissed, discarding result"),
        }
    }

    /// Removes an entry in any state.
    ///
    /// A pending generation keeps running unless the drawer cancels on
    /// dismiss. The viewer stays on a valid entry, or closes when the list
    /// becomes empty.
    pub fn dismiss(&self, id: u64) -> Result<(), DrawerError> {
        let mut state = self.state();
        let pos = state.position(id).ok_or(DrawerError::EntryNotFound(id))?;
        let removed = state.entries.remove(pos);

        if let Some(task) = removed.task
            && self.cancel_on_dismiss
        {
            task.abort();
            tracing::debug!(id, "Cancelled pending generation");
        }

        let len = state.entries.len();
        state.viewer = match state.viewer {
            _ if len == 0 => None,
            Some(current) if current > pos => Some(current - 1),
            Some(current) => Some(current.min(len - 1)),
            None => None,
        };

        Ok(())
    }

    pub fn entries(&self) -> Vec<GeneratedImageRequest> {
        self.state()
            .entries
            .iter()
            .map(|e| e.request.clone())
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<GeneratedImageRequest> {
        let state = self.state();
        state.position(id).map(|pos| state.entries[pos].request.clone())
    }

    pub fn snapshot(&self) -> DrawerSnapshot {
        let state = self.state();
        DrawerSnapshot {
            entries: state.entries.iter().map(|e| e.request.clone()).collect(),
            viewer: state.viewer_state(),
        }
    }

    pub fn len(&self) -> usize {
        self.state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_count(&self) -> usize {
        self.state()
            .entries
            .iter()
            .filter(|e| e.request.state.is_pending())
            .count()
    }

    /// Opens the full-size viewer on an entry.
    pub fn open_viewer(&self, id: u64) -> Result<ViewerState, DrawerError> {
        let mut state = self.state();
        let pos = state.position(id).ok_or(DrawerError::EntryNotFound(id))?;
        state.viewer = Some(pos);
        state.viewer_state().ok_or(DrawerError::EntryNotFound(id))
    }

    /// Moves the viewer forward, wrapping to the first entry.
    pub fn next(&self) -> Result<ViewerState, DrawerError> {
        self.step(|index, len| if index + 1 < len { index + 1 } else { 0 })
    }

    /// Moves the viewer back, wrapping to the last entry.
    pub fn previous(&self) -> Result<ViewerState, DrawerError> {
        self.step(|index, len| if index > 0 { index - 1 } else { len - 1 })
    }

    fn step(&self, advance: impl Fn(usize, usize) -> usize) -> Result<ViewerState, DrawerError> {
        let mut state = self.state();
        let len = state.entries.len();
        let current = state.viewer.filter(|_| len > 0).ok_or(DrawerError::ViewerClosed)?;

        state.viewer = Some(advance(current, len));
        state.viewer_state().ok_or(DrawerError::ViewerClosed)
    }

    pub fn close_viewer(&self) {
        self.state().viewer = None;
    }

    pub fn viewer(&self) -> Option<ViewerState> {
        self.state().viewer_state()
    }

    /// Returns where to fetch a completed image and the name to save it under.
    pub fn save(&self, id: u64) -> Result<SaveTarget, DrawerError> {
        let entry = self.get(id).ok_or(DrawerError::EntryNotFound(id))?;
        let url = entry.url().ok_or(DrawerError::NotCompleted(id))?;
        Ok(SaveTarget::new(url, chrono::Utc::now()))
    }
}

impl Drop for Drawer {
    fn drop(&mut self) {
        if !self.cancel_on_dismiss {
            return;
        }
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        for task in state.entries.iter().filter_map(|e| e.task.as_ref()) {
            task.abort();
        }
    }
}
