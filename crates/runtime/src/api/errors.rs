//! Unified error types surfaced by the runtime API.
//!
//! Wraps session rejections and worker coordination failures so clients can
//! bubble them up with consistent context.
use combat_core::{CombatError, ErrorSeverity, SessionError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The session rejected the request. It has already been narrated on
    /// the event bus.
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("encounter worker command channel closed")]
    CommandChannelClosed,

    #[error("encounter worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("encounter worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("encounter requires content oracles to be configured before starting")]
    MissingContent,

    #[error("encounter requires a roster before starting")]
    MissingRoster,

    #[error("event stream closed before the encounter ended")]
    EventStreamClosed,
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Session(err) => err.severity(),
            Self::MissingContent | Self::MissingRoster => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::EventStreamClosed => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(err) => err.error_code(),
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::MissingRoster => "RUNTIME_MISSING_ROSTER",
            Self::EventStreamClosed => "RUNTIME_EVENT_STREAM_CLOSED",
        }
    }
}
