//! Session resources and the session detail pipeline
//!
//! This module provides:
//! - The `{status, data}` envelope shared by all per-session endpoints
//! - Fetchers for metadata, summary, transcript, emotion and audio
//! - `ResourcePipeline`: fetch, poll while processing, resolve once completed
//! - `SessionDetail`: the five pipelines of one session side by side
//! - List, upload and delete operations

mod detail;
mod envelope;
mod fetcher;
mod format;
mod models;
mod operations;
mod pipeline;
mod resource;
mod upload;

pub use detail::{SessionDetail, SessionSnapshot};
pub use envelope::{Envelope, ResourceStatus};
pub use fetcher::SessionFetcher;
pub use format::{format_date, format_duration, format_participants};
pub use models::{
    DeleteResponse, EmotionScore, EmotionSegment, SessionMetadata, TranscriptEntry,
    UploadResponse,
};
pub use operations::SessionOperations;
pub use pipeline::{ResourcePipeline, ResourceState};
pub use resource::{
    AudioResource, EmotionResource, MetadataResource, Resource, ResourceKind, SummaryResource,
    TranscriptResource,
};
pub use upload::{mime_type_for, UploadError, UploadRequest};
