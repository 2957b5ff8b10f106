use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One followed channel from the `subscriptions` list of the wtwitch config.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionEntry {
    pub streamer_id: String,
}

/// A currently-live channel as recorded in the subscription cache.
///
/// Field order is the sort key: id first, then display name, category,
/// title and viewer count.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiveStreamRecord {
    pub streamer_id: String,
    pub display_name: String,
    pub category: String,
    pub title: String,
    pub viewer_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    Live(LiveStreamRecord),
    Offline(String),
}

impl ChannelStatus {
    pub fn streamer_id(&self) -> &str {
        match self {
            ChannelStatus::Live(record) => &record.streamer_id,
            ChannelStatus::Offline(id) => id,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, ChannelStatus::Live(_))
    }
}

/// Reconciled follow list: live channels and offline channels as two
/// separately sorted groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub live: Vec<LiveStreamRecord>,
    pub offline: Vec<String>,
}

impl StatusView {
    /// Both groups stacked, live first.
    pub fn statuses(&self) -> impl Iterator<Item = ChannelStatus> + '_ {
        self.live
            .iter()
            .cloned()
            .map(ChannelStatus::Live)
            .chain(self.offline.iter().cloned().map(ChannelStatus::Offline))
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.offline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty() && self.offline.is_empty()
    }
}

/// A past broadcast from `wtwitch v <channel>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VodRecord {
    /// 1-based position in the tool's listing. Passed back verbatim to
    /// `wtwitch v <channel> <n>` to play this broadcast.
    pub sequence_index: u32,
    pub timestamp: String,
    pub title: String,
    pub duration: String,
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%d.%m.%Y %H:%M"];

impl VodRecord {
    /// Interpret the timestamp text, if it has one of the shapes wtwitch emits.
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        let text = self.timestamp.trim();
        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    }

    /// Title capped at `max` characters, with `...` appended when cut.
    pub fn short_title(&self, max: usize) -> String {
        if self.title.chars().count() <= max {
            return self.title.clone();
        }
        let cut: String = self.title.chars().take(max).collect();
        format!("{}...", cut)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub player: String,
    pub quality: String,
    pub color_output_enabled: bool,
    pub print_offline_subscriptions_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationOutcome {
    Confirmed(String),
    Failed(String),
}

impl OperationOutcome {
    pub fn message(&self) -> &str {
        match self {
            OperationOutcome::Confirmed(msg) | OperationOutcome::Failed(msg) => msg,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, OperationOutcome::Confirmed(_))
    }
}
