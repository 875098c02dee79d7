//! Sequential audio-playback coordination.
//!
//! A page full of exercises creates many independent audio sources — word
//! demonstrations, recognition feedback, avatar speech — all of which may
//! be triggered at any moment. [`AudioPlaybackCoordinator`] serializes
//! them: at most one source plays at a time, feedback clips take priority
//! over word clips, and everything else waits in a queue.
//!
//! The coordinator is explicitly constructed and injected by the
//! application root; create one instance per running app and hand out
//! clones (cloning shares the underlying state).
//!
//! # Lifecycle
//!
//! - [`register`](AudioPlaybackCoordinator::register) binds an opaque
//!   [`AudioSource`] to a logical id and returns the unregister
//!   capability.
//! - [`play`](AudioPlaybackCoordinator::play) either starts the clip
//!   (pre-empting whatever is playing) or enqueues it behind the current
//!   one; it resolves when the start attempt settles.
//! - [`notify_ended`](AudioPlaybackCoordinator::notify_ended) is the
//!   completion signal from the embedding layer's ended-event wiring; it
//!   fires the registered completion callback and advances the queue.
//!
//! Queue advancement can never starve: every operation that could leave
//! the coordinator idle with pending requests ends by re-checking the
//! queue.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pronuncia::playback::{AudioPlaybackCoordinator, PlayerCallbacks};
//!
//! let coordinator = AudioPlaybackCoordinator::new();
//! let registration = coordinator
//!     .register("word-1", Arc::new(clip), PlayerCallbacks::new())
//!     .await;
//!
//! coordinator.play("word-1", false).await?;
//! // ... the ended-event wiring eventually calls:
//! coordinator.notify_ended("word-1").await;
//! ```

pub mod queue;
pub mod source;

pub use source::{AudioSource, SourceError};

use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

use queue::PlaybackQueue;

/// Coordinator-level playback failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The id was never registered, or has been unregistered.
    #[error("no audio source registered under id `{0}`")]
    NotRegistered(String),
    /// The underlying resource failed to start for a reason other than
    /// pre-emption.
    #[error("failed to start playback of `{id}`: {reason}")]
    StartFailed {
        /// The id whose start attempt failed.
        id: String,
        /// The resource's failure description.
        reason: String,
    },
}

/// Playback category, derived from the id.
///
/// Ids containing the substring `"feedback"` are feedback clips; every
/// other id is a word clip. Feedback clips queue with priority, and an
/// immediate play clears pending clips of its own category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Word-demonstration clips (the default).
    Word,
    /// Recognition-feedback clips; jump the queue.
    Feedback,
}

impl Category {
    /// Derive the category of an id.
    pub fn of(id: &str) -> Self {
        if id.contains("feedback") {
            Category::Feedback
        } else {
            Category::Word
        }
    }

    pub(crate) fn high_priority(self) -> bool {
        matches!(self, Category::Feedback)
    }
}

/// Callback invoked when a source's playing state flips.
pub type StateChangeCallback = Arc<dyn Fn(bool) + Send + Sync>;
/// Callback invoked when a clip finishes naturally.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// Notification callbacks attached at registration time.
#[derive(Default, Clone)]
pub struct PlayerCallbacks {
    state_change: Option<StateChangeCallback>,
    complete: Option<CompletionCallback>,
}

impl PlayerCallbacks {
    /// No callbacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify when the source starts or stops playing.
    pub fn on_state_change(mut self, callback: impl Fn(bool) + Send + Sync + 'static) -> Self {
        self.state_change = Some(Arc::new(callback));
        self
    }

    /// Notify when a clip finishes naturally.
    pub fn on_complete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.complete = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for PlayerCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerCallbacks")
            .field("state_change", &self.state_change.is_some())
            .field("complete", &self.complete.is_some())
            .finish()
    }
}

/// Per-id registry entry. The coordinator exclusively owns the source for
/// the lifetime of the registration.
struct PlayerHandle {
    source: Arc<dyn AudioSource>,
    callbacks: PlayerCallbacks,
    category: Category,
    is_playing: bool,
}

#[derive(Default)]
struct CoordinatorState {
    players: FxHashMap<String, PlayerHandle>,
    queue: PlaybackQueue,
    currently_playing: Option<String>,
    draining: bool,
}

/// Serializes playback across independently-registered audio sources.
///
/// Cheap to clone; clones share state. See the [module
/// docs](self) for the lifecycle.
#[derive(Clone, Default)]
pub struct AudioPlaybackCoordinator {
    state: Arc<Mutex<CoordinatorState>>,
}

/// Capability to unregister an id, returned by
/// [`register`](AudioPlaybackCoordinator::register).
pub struct Registration {
    coordinator: AudioPlaybackCoordinator,
    id: String,
}

impl Registration {
    /// The registered id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Unregister the id, stopping it first if it is playing.
    pub async fn unregister(self) {
        self.coordinator.unregister(&self.id).await;
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

impl AudioPlaybackCoordinator {
    /// Create an empty coordinator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an audio source to a logical id.
    ///
    /// Re-registering the same id with the same source (pointer identity)
    /// only replaces the callbacks. Re-registering with a different
    /// source halts and discards the old wiring. Priority and category
    /// are derived from the id (see [`Category`]).
    pub async fn register(
        &self,
        id: impl Into<String>,
        source: Arc<dyn AudioSource>,
        callbacks: PlayerCallbacks,
    ) -> Registration {
        let id = id.into();
        {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            match state.players.entry(id.clone()) {
                Entry::Occupied(mut occupied) => {
                    let handle = occupied.get_mut();
                    if Arc::ptr_eq(&handle.source, &source) {
                        handle.callbacks = callbacks;
                        trace!(id = %id, "re-registered, callbacks replaced");
                    } else {
                        handle.source.halt();
                        let was_playing = handle.is_playing;
                        *handle = PlayerHandle {
                            source,
                            callbacks,
                            category: Category::of(&id),
                            is_playing: false,
                        };
                        if was_playing
                            && state.currently_playing.as_deref() == Some(id.as_str())
                        {
                            state.currently_playing = None;
                        }
                        debug!(id = %id, "re-registered with a new source");
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(PlayerHandle {
                        source,
                        callbacks,
                        category: Category::of(&id),
                        is_playing: false,
                    });
                    debug!(id = %id, "registered");
                }
            }
        }
        self.process_queue().await;
        Registration {
            coordinator: self.clone(),
            id,
        }
    }

    /// Remove an id, stopping it first if it is playing. Unregistering an
    /// unknown id is a silent no-op.
    pub async fn unregister(&self, id: &str) {
        let state_change = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let Some(handle) = state.players.remove(id) else {
                return;
            };
            handle.source.halt();
            state.queue.remove(id);
            if state.currently_playing.as_deref() == Some(id) {
                state.currently_playing = None;
            }
            if handle.is_playing {
                handle.callbacks.state_change
            } else {
                None
            }
        };
        debug!(id = %id, "unregistered");
        if let Some(callback) = state_change {
            callback(false);
        }
        self.process_queue().await;
    }

    /// Request playback of an id.
    ///
    /// Resolves when the start attempt settles (or immediately, for the
    /// enqueue and already-playing paths):
    ///
    /// - unknown id → [`PlaybackError::NotRegistered`];
    /// - already playing → `Ok`, no-op;
    /// - `immediate`, or nothing is playing → pre-empt the current clip,
    ///   clear pending clips of the same category, and start; a genuine
    ///   resource failure surfaces as [`PlaybackError::StartFailed`],
    ///   while a pre-emption abort counts as success;
    /// - otherwise → enqueue (feedback clips at the head) and return
    ///   `Ok` at once.
    pub async fn play(&self, id: &str, immediate: bool) -> Result<(), PlaybackError> {
        let (registered, already_playing, idle) = {
            let state = self.state.lock();
            (
                state.players.contains_key(id),
                state.currently_playing.as_deref() == Some(id),
                state.currently_playing.is_none(),
            )
        };
        if !registered {
            return Err(PlaybackError::NotRegistered(id.to_string()));
        }
        if already_playing {
            trace!(id = %id, "already playing");
            return Ok(());
        }

        if immediate || idle {
            let outcome = self.start_playback(id).await;
            // A failed or aborted start must not stall pending requests.
            self.process_queue().await;
            outcome
        } else {
            {
                let mut state = self.state.lock();
                let high = Category::of(id).high_priority();
                if state.queue.push(id, high) {
                    debug!(id = %id, high_priority = high, "enqueued");
                } else {
                    trace!(id = %id, "already queued");
                }
            }
            self.process_queue().await;
            Ok(())
        }
    }

    /// Completion signal: the clip registered under `id` finished
    /// naturally. Fires the completion callback and advances the queue.
    /// Unknown ids are ignored.
    pub async fn notify_ended(&self, id: &str) {
        let (state_change, complete) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let Some(handle) = state.players.get_mut(id) else {
                return;
            };
            let was_playing = std::mem::replace(&mut handle.is_playing, false);
            let state_change = if was_playing {
                handle.callbacks.state_change.clone()
            } else {
                None
            };
            let complete = handle.callbacks.complete.clone();
            if state.currently_playing.as_deref() == Some(id) {
                state.currently_playing = None;
            }
            (state_change, complete)
        };
        debug!(id = %id, "playback ended");
        if let Some(callback) = state_change {
            callback(false);
        }
        if let Some(callback) = complete {
            callback();
        }
        self.process_queue().await;
    }

    /// Stop an id: halt the resource (pause + rewind), clear it from the
    /// queue, and release the playing slot if it held it.
    pub async fn stop(&self, id: &str) -> Result<(), PlaybackError> {
        let state_change = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let Some(handle) = state.players.get_mut(id) else {
                return Err(PlaybackError::NotRegistered(id.to_string()));
            };
            handle.source.halt();
            let was_playing = std::mem::replace(&mut handle.is_playing, false);
            let state_change = if was_playing {
                handle.callbacks.state_change.clone()
            } else {
                None
            };
            if state.currently_playing.as_deref() == Some(id) {
                state.currently_playing = None;
            }
            state.queue.remove(id);
            state_change
        };
        debug!(id = %id, "stopped");
        if let Some(callback) = state_change {
            callback(false);
        }
        self.process_queue().await;
        Ok(())
    }

    /// Stop every registered source and clear the queue.
    pub fn stop_all(&self) {
        let callbacks: Vec<StateChangeCallback> = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let mut fired = Vec::new();
            for handle in state.players.values_mut() {
                handle.source.halt();
                if std::mem::replace(&mut handle.is_playing, false) {
                    if let Some(callback) = handle.callbacks.state_change.clone() {
                        fired.push(callback);
                    }
                }
            }
            state.queue.clear();
            state.currently_playing = None;
            fired
        };
        debug!("stopped all playback");
        for callback in callbacks {
            callback(false);
        }
    }

    /// The id currently holding the playing slot, if any.
    pub fn currently_playing(&self) -> Option<String> {
        self.state.lock().currently_playing.clone()
    }

    /// Whether the id's source has actually started playing.
    pub fn is_playing(&self, id: &str) -> bool {
        self.state
            .lock()
            .players
            .get(id)
            .is_some_and(|handle| handle.is_playing)
    }

    /// Whether an id is currently registered.
    pub fn is_registered(&self, id: &str) -> bool {
        self.state.lock().players.contains_key(id)
    }

    /// Pending ids in service order.
    pub fn pending(&self) -> Vec<String> {
        self.state.lock().queue.snapshot()
    }

    /// Take the playing slot for `id`: pre-empt whatever holds it, purge
    /// pending requests of the same category, then start the source.
    async fn start_playback(&self, id: &str) -> Result<(), PlaybackError> {
        let (source, preempted) = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            let (source, category) = match state.players.get(id) {
                Some(handle) => (Arc::clone(&handle.source), handle.category),
                None => return Err(PlaybackError::NotRegistered(id.to_string())),
            };

            let mut preempted = None;
            if let Some(current) = state.currently_playing.take() {
                if current == id {
                    state.currently_playing = Some(current);
                    return Ok(());
                }
                if let Some(current_handle) = state.players.get_mut(&current) {
                    current_handle.source.halt();
                    if std::mem::replace(&mut current_handle.is_playing, false) {
                        preempted =
                            Some((current, current_handle.callbacks.state_change.clone()));
                    }
                }
            }

            state.queue.remove(id);
            state.queue.purge_category(category);
            state.currently_playing = Some(id.to_string());
            (source, preempted)
        };

        if let Some((preempted_id, state_change)) = preempted {
            debug!(id = %preempted_id, "pre-empted");
            if let Some(callback) = state_change {
                callback(false);
            }
        }

        debug!(id = %id, "starting playback");
        match source.start().await {
            Ok(()) => {}
            Err(SourceError::Aborted) => {
                // Coordinator-induced: a competing request halted this
                // start. Not a failure from the caller's perspective.
                // Normally the competitor already owns the slot; release
                // it if this id still holds it.
                trace!(id = %id, "start aborted by pre-emption");
                let mut state = self.state.lock();
                if state.currently_playing.as_deref() == Some(id) {
                    state.currently_playing = None;
                }
                return Ok(());
            }
            Err(SourceError::Failed(reason)) => {
                let mut state = self.state.lock();
                if state.currently_playing.as_deref() == Some(id) {
                    state.currently_playing = None;
                }
                drop(state);
                warn!(id = %id, %reason, "playback start failed");
                return Err(PlaybackError::StartFailed {
                    id: id.to_string(),
                    reason,
                });
            }
        }

        let state_change = {
            let mut guard = self.state.lock();
            let state = &mut *guard;
            if state.currently_playing.as_deref() != Some(id) {
                // Pre-empted between start resolution and bookkeeping.
                None
            } else {
                match state.players.get_mut(id) {
                    Some(handle) => {
                        handle.is_playing = true;
                        handle.callbacks.state_change.clone()
                    }
                    None => None,
                }
            }
        };
        if let Some(callback) = state_change {
            callback(true);
        }
        Ok(())
    }

    /// Drain the queue head into the playing slot when idle.
    ///
    /// Single-flight: re-entrant invocations return immediately while an
    /// attempt is in flight; once it settles the queue is re-checked, so
    /// a failed head never blocks the clips behind it.
    async fn process_queue(&self) {
        loop {
            let id = {
                let mut guard = self.state.lock();
                let state = &mut *guard;
                if state.draining
                    || state.currently_playing.is_some()
                    || state.queue.is_empty()
                {
                    return;
                }
                state.draining = true;
                match state.queue.pop() {
                    Some(id) => id,
                    None => {
                        state.draining = false;
                        return;
                    }
                }
            };

            trace!(id = %id, "dequeued");
            let outcome = self.start_playback(&id).await;
            self.state.lock().draining = false;

            match outcome {
                // An aborted start settles Ok but leaves the slot empty;
                // keep draining in that case.
                Ok(()) => {
                    if self.state.lock().currently_playing.is_some() {
                        return;
                    }
                }
                Err(error) => {
                    warn!(id = %id, %error, "queued playback failed, skipping");
                }
            }
        }
    }
}

impl fmt::Debug for AudioPlaybackCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("AudioPlaybackCoordinator")
            .field("currently_playing", &state.currently_playing)
            .field("registered", &state.players.len())
            .field("pending", &state.queue.snapshot())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_derivation() {
        assert_eq!(Category::of("word-1"), Category::Word);
        assert_eq!(Category::of("feedback-1"), Category::Feedback);
        assert_eq!(Category::of("avatar-speech"), Category::Word);
        assert!(Category::Feedback.high_priority());
        assert!(!Category::Word.high_priority());
    }
}
