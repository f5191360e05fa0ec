use super::envelope::ResourceStatus;
use super::fetcher::SessionFetcher;
use super::models::{EmotionSegment, SessionMetadata, TranscriptEntry};
use super::pipeline::{ResourcePipeline, ResourceState};
use super::resource::{
    AudioResource, EmotionResource, MetadataResource, SummaryResource, TranscriptResource,
};
use crate::api::ApiGateway;
use crate::playback::PlaybackView;
use crate::poll::PollConfig;
use crate::resolve::ContentResolver;
use tracing::info;

/// Everything the session detail screen shows, one pipeline per resource
///
/// The five pipelines fetch, poll and resolve independently; nothing waits
/// for all of them. Closing or dropping the detail stops every poll.
pub struct SessionDetail {
    session_id: String,
    pub metadata: ResourcePipeline<MetadataResource>,
    pub summary: ResourcePipeline<SummaryResource>,
    pub transcript: ResourcePipeline<TranscriptResource>,
    pub emotion: ResourcePipeline<EmotionResource>,
    pub audio: ResourcePipeline<AudioResource>,
}

impl SessionDetail {
    /// Start all pipelines and run their first fetch concurrently
    pub async fn open(
        gateway: ApiGateway,
        resolver: ContentResolver,
        session_id: impl Into<String>,
        poll: PollConfig,
    ) -> Self {
        let session_id = session_id.into();
        info!("Opening session {}", session_id);

        let fetcher = SessionFetcher::new(gateway);
        let detail = Self {
            metadata: ResourcePipeline::spawn(
                MetadataResource,
                session_id.clone(),
                fetcher.clone(),
                resolver.clone(),
                poll.clone(),
            ),
            summary: ResourcePipeline::spawn(
                SummaryResource,
                session_id.clone(),
                fetcher.clone(),
                resolver.clone(),
                poll.clone(),
            ),
            transcript: ResourcePipeline::spawn(
                TranscriptResource,
                session_id.clone(),
                fetcher.clone(),
                resolver.clone(),
                poll.clone(),
            ),
            emotion: ResourcePipeline::spawn(
                EmotionResource,
                session_id.clone(),
                fetcher.clone(),
                resolver.clone(),
                poll.clone(),
            ),
            audio: ResourcePipeline::spawn(
                AudioResource,
                session_id.clone(),
                fetcher,
                resolver,
                poll,
            ),
            session_id,
        };

        detail.refresh_all().await;
        detail
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Refetch every resource once
    pub async fn refresh_all(&self) {
        futures::join!(
            self.metadata.refresh(),
            self.summary.refresh(),
            self.transcript.refresh(),
            self.emotion.refresh(),
            self.audio.refresh(),
        );
    }

    /// Wait until no resource is processing any more
    ///
    /// A resource whose polling was capped or stopped counts as settled.
    pub async fn wait_until_settled(&self) {
        futures::join!(
            self.metadata.wait_until_settled(),
            self.summary.wait_until_settled(),
            self.transcript.wait_until_settled(),
            self.emotion.wait_until_settled(),
            self.audio.wait_until_settled(),
        );
    }

    /// Current status of each resource, in `ResourceKind::ALL` order
    pub fn statuses(&self) -> [ResourceStatus; 5] {
        [
            self.metadata.status(),
            self.summary.status(),
            self.transcript.status(),
            self.emotion.status(),
            self.audio.status(),
        ]
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let (metadata, summary, transcript, emotion, audio) = futures::join!(
            self.metadata.snapshot(),
            self.summary.snapshot(),
            self.transcript.snapshot(),
            self.emotion.snapshot(),
            self.audio.snapshot(),
        );

        SessionSnapshot {
            session_id: self.session_id.clone(),
            metadata,
            summary,
            transcript,
            emotion,
            audio,
        }
    }

    /// Stop all polling
    pub fn close(self) {
        info!("Closing session {}", self.session_id);
    }
}

impl Drop for SessionDetail {
    fn drop(&mut self) {
        self.metadata.stop();
        self.summary.stop();
        self.transcript.stop();
        self.emotion.stop();
        self.audio.stop();
    }
}

/// Point-in-time copy of a session detail
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub metadata: ResourceState<SessionMetadata>,
    pub summary: ResourceState<String>,
    pub transcript: ResourceState<Vec<TranscriptEntry>>,
    pub emotion: ResourceState<Vec<EmotionSegment>>,
    pub audio: ResourceState<String>,
}

impl SessionSnapshot {
    /// Playback view model over the resolved transcript and emotions
    pub fn playback(&self) -> PlaybackView {
        PlaybackView::new(
            self.transcript.content.clone().unwrap_or_default(),
            self.emotion.content.clone().unwrap_or_default(),
        )
    }
}
