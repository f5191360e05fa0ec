pub mod api;
pub mod config;
pub mod playback;
pub mod poll;
pub mod report;
pub mod resolve;
pub mod session;

pub use api::{ApiError, ApiGateway, StaticToken, TokenProvider};
pub use config::Config;
pub use playback::{EmotionFilter, EntryHighlighter, FixedDurationHighlighter, PlaybackView};
pub use poll::{start_polling, PollConfig, PollHandle};
pub use resolve::{ContentResolver, ResolveFailurePolicy};
pub use session::{
    Envelope, ResourceKind, ResourceStatus, SessionDetail, SessionFetcher, SessionOperations,
    SessionSnapshot,
};
