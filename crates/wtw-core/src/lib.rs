//! Core of the wtwitch front-end: reads the documents wtwitch keeps on disk,
//! reconciles live status with the follow list, and decodes the tool's
//! colorized terminal output.

pub mod channels;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;
pub mod platform;
pub mod reconcile;
pub mod settings;
pub mod snapshot;
pub mod tool;

pub use error::{CoreError, Result};
pub use model::{
    ChannelStatus, LiveStreamRecord, OperationOutcome, SettingsSnapshot, StatusView,
    SubscriptionEntry, VodRecord,
};
