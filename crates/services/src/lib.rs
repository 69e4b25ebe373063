#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod registry;
pub mod session;
pub mod tips;

pub use study_core::Clock;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError, ValidationError};
pub use registry::{SessionKey, SessionRegistry};
pub use session::StudySession;
pub use tips::StudyTips;
