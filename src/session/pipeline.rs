use super::envelope::{Envelope, ResourceStatus};
use super::fetcher::SessionFetcher;
use super::resource::Resource;
use crate::poll::{start_polling, PollConfig, PollHandle};
use crate::resolve::{ContentResolver, ResolveFailurePolicy};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{watch, Mutex, RwLock};
use tracing::{debug, info, warn};

/// Client-side view of one resource
#[derive(Debug, Clone)]
pub struct ResourceState<C> {
    /// Last status received; `None` until the first response arrives
    pub status: Option<ResourceStatus>,

    /// Resolved content, once completed and resolvable
    pub content: Option<C>,

    /// Last request error, or a surfaced resolution error
    pub error: Option<String>,

    /// Data value the cached content was resolved from
    resolved_from: Option<String>,
    resolved_content: Option<C>,
    resolve_error: Option<String>,
}

impl<C> Default for ResourceState<C> {
    fn default() -> Self {
        Self {
            status: None,
            content: None,
            error: None,
            resolved_from: None,
            resolved_content: None,
            resolve_error: None,
        }
    }
}

impl<C> ResourceState<C> {
    pub fn is_loading(&self) -> bool {
        self.status.is_none() && self.error.is_none()
    }

    pub fn status_is(&self, status: ResourceStatus) -> bool {
        self.status == Some(status)
    }
}

struct PipelineInner<R: Resource> {
    resource: R,
    session_id: String,
    fetcher: SessionFetcher,
    resolver: ContentResolver,
    state: RwLock<ResourceState<R::Content>>,
    status_tx: watch::Sender<ResourceStatus>,
    // Serializes refreshes so each pointer value is resolved at most once
    refresh_lock: Mutex<()>,
}

impl<R: Resource> PipelineInner<R> {
    async fn refresh(&self) {
        let _guard = self.refresh_lock.lock().await;
        let kind = self.resource.kind();

        match self.fetcher.fetch(kind, &self.session_id).await {
            Ok(envelope) => self.apply(envelope).await,
            Err(e) => {
                warn!("Failed to fetch {} for session {}: {}", kind, self.session_id, e);
                self.state.write().await.error = Some(e.to_string());
            }
        }
    }

    async fn apply(&self, envelope: Envelope<Value>) {
        let kind = self.resource.kind();
        let status = envelope.status;

        let (previous, resolved_from) = {
            let state = self.state.read().await;
            (state.status, state.resolved_from.clone())
        };

        if let Some(previous) = previous {
            if !previous.can_transition_to(status) {
                debug!("{} moved from {} back to {}", kind, previous, status);
            }
        }

        let mut content = None;
        let mut error = None;
        let mut resolved = None;
        let data_key = envelope.data.as_ref().map(pointer_key);

        if status.is_completed() {
            if let (Some(data), Some(key)) = (envelope.data, data_key.clone()) {
                if resolved_from.as_deref() != Some(key.as_str()) {
                    debug!("Resolving {} for session {}", kind, self.session_id);
                    match self.resource.materialize(&self.resolver, data).await {
                        Ok(value) => content = Some(value),
                        Err(e) => match self.resolver.policy() {
                            ResolveFailurePolicy::Suppress => {
                                warn!("Treating {} as empty: {}", kind, e);
                                content = Some(None);
                            }
                            ResolveFailurePolicy::Surface => {
                                warn!("Failed to resolve {}: {}", kind, e);
                                content = Some(None);
                                error = Some(e.to_string());
                            }
                        },
                    }
                    resolved = Some(key);
                }
            }
        }

        {
            let mut state = self.state.write().await;
            state.status = Some(status);
            if let Some(key) = resolved {
                state.resolved_from = Some(key);
                state.resolve_error = error;
            }
            if let Some(value) = content {
                state.resolved_content = value;
            }

            // Content is only shown while completed with the data it came from
            let current = status.is_completed()
                && data_key.is_some()
                && data_key == state.resolved_from;
            if current {
                state.content = state.resolved_content.clone();
                state.error = state.resolve_error.clone();
            } else {
                state.content = None;
                state.error = None;
            }
        }

        // Published last so anyone waiting on the status sees resolved content
        let changed = self.status_tx.send_if_modified(|current| {
            if *current != status {
                *current = status;
                true
            } else {
                false
            }
        });

        if changed {
            info!("Session {} {} is {}", self.session_id, kind, status);
        }
    }
}

fn pointer_key(data: &Value) -> String {
    match data {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fetch / poll / resolve pipeline for one resource of one session
///
/// Polls while the resource is `processing` and resolves its content once it
/// completes. Dropping the pipeline stops polling.
pub struct ResourcePipeline<R: Resource> {
    inner: Arc<PipelineInner<R>>,
    status_rx: watch::Receiver<ResourceStatus>,
    poll: PollHandle,
}

impl<R: Resource> ResourcePipeline<R> {
    /// Start the pipeline; nothing is fetched until `refresh` is called
    pub fn spawn(
        resource: R,
        session_id: impl Into<String>,
        fetcher: SessionFetcher,
        resolver: ContentResolver,
        poll: PollConfig,
    ) -> Self {
        let (status_tx, status_rx) = watch::channel(ResourceStatus::NotStarted);

        let inner = Arc::new(PipelineInner {
            resource,
            session_id: session_id.into(),
            fetcher,
            resolver,
            state: RwLock::new(ResourceState::default()),
            status_tx,
            refresh_lock: Mutex::new(()),
        });

        let tick_inner = Arc::clone(&inner);
        let poll = start_polling(status_rx.clone(), poll, move || {
            let inner = Arc::clone(&tick_inner);
            async move { inner.refresh().await }
        });

        Self {
            inner,
            status_rx,
            poll,
        }
    }

    /// Fetch the envelope now and resolve its content if newly completed
    pub async fn refresh(&self) {
        self.inner.refresh().await;
    }

    pub async fn snapshot(&self) -> ResourceState<R::Content> {
        self.inner.state.read().await.clone()
    }

    /// Latest published status
    pub fn status(&self) -> ResourceStatus {
        *self.status_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceStatus> {
        self.status_rx.clone()
    }

    /// Wait until the resource is no longer processing, or polling has ended
    ///
    /// A capped or stopped poll leaves the status at `Processing`; waiting
    /// then ends with the status unchanged.
    pub async fn wait_until_settled(&self) {
        let mut rx = self.status_rx.clone();

        tokio::select! {
            _ = rx.wait_for(|status| !status.is_processing()) => {}
            _ = self.poll.stopped() => {
                if self.status().is_processing() {
                    warn!(
                        "Stopped waiting for {} of session {}: polling has ended",
                        self.inner.resource.kind(),
                        self.inner.session_id
                    );
                }
            }
        }
    }

    /// Stop polling; the last state stays readable
    pub fn stop(&self) {
        self.poll.cancel();
    }

    pub fn is_polling(&self) -> bool {
        !self.poll.is_stopped() && self.status().is_processing()
    }
}
