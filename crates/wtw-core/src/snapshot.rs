//! Read-only access to the documents wtwitch maintains on disk.
//!
//! wtwitch rewrites `subscription-cache.json` on every status check and
//! `config.json` on every settings change. Nothing here is cached: each read
//! resolves the path again and parses whatever is on disk at that moment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoreError, Result};
use crate::model::{LiveStreamRecord, SettingsSnapshot, SubscriptionEntry};
use crate::platform;

// ── document shapes ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawCache {
    data: Vec<RawLiveStream>,
}

#[derive(Debug, Deserialize)]
struct RawLiveStream {
    user_login: String,
    user_name: String,
    game_name: String,
    title: String,
    viewer_count: u64,
}

#[derive(Debug, Deserialize)]
struct RawSubscriptions {
    subscriptions: Vec<RawSubscription>,
}

#[derive(Debug, Deserialize)]
struct RawSubscription {
    streamer: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettings {
    player: String,
    quality: String,
    colors: RawFlag,
    print_offline_subscriptions: RawFlag,
}

/// wtwitch stores its toggles as the strings `"true"` / `"false"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Text(String),
    Native(bool),
}

impl RawFlag {
    fn decode(self, field: &str) -> Result<bool> {
        match self {
            RawFlag::Native(b) => Ok(b),
            RawFlag::Text(s) => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                other => Err(CoreError::MalformedConfig(format!(
                    "{} must be \"true\" or \"false\", got {:?}",
                    field, other
                ))),
            },
        }
    }
}

// ── parsing ───────────────────────────────────────────────────────────────────

/// Parse the subscription cache into live records, in document order.
pub fn parse_live_snapshot(content: &str) -> Result<Vec<LiveStreamRecord>> {
    let raw: RawCache =
        serde_json::from_str(content).map_err(|e| CoreError::MalformedCache(e.to_string()))?;

    Ok(raw
        .data
        .into_iter()
        .map(|s| LiveStreamRecord {
            streamer_id: s.user_login,
            display_name: s.user_name,
            category: s.game_name,
            title: s.title,
            viewer_count: s.viewer_count,
        })
        .collect())
}

/// Parse the `subscriptions` list of the wtwitch config.
pub fn parse_subscriptions(content: &str) -> Result<Vec<SubscriptionEntry>> {
    let raw: RawSubscriptions =
        serde_json::from_str(content).map_err(|e| CoreError::MalformedConfig(e.to_string()))?;

    Ok(raw
        .subscriptions
        .into_iter()
        .map(|s| SubscriptionEntry {
            streamer_id: s.streamer,
        })
        .collect())
}

/// Parse player, quality and the two output toggles of the wtwitch config.
pub fn parse_settings(content: &str) -> Result<SettingsSnapshot> {
    let raw: RawSettings =
        serde_json::from_str(content).map_err(|e| CoreError::MalformedConfig(e.to_string()))?;

    Ok(SettingsSnapshot {
        player: raw.player,
        quality: raw.quality,
        color_output_enabled: raw.colors.decode("colors")?,
        print_offline_subscriptions_enabled: raw
            .print_offline_subscriptions
            .decode("printOfflineSubscriptions")?,
    })
}

// ── store ─────────────────────────────────────────────────────────────────────

/// Reads the wtwitch documents. Paths without an override are resolved from
/// the environment on every read.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    config_override: Option<PathBuf>,
    cache_override: Option<PathBuf>,
}

impl SnapshotStore {
    /// Store that follows wtwitch's own environment-driven locations.
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Store pinned to explicit document paths.
    pub fn with_paths(config: impl Into<PathBuf>, cache: impl Into<PathBuf>) -> Self {
        Self {
            config_override: Some(config.into()),
            cache_override: Some(cache.into()),
        }
    }

    /// Store with optional per-document overrides.
    pub fn with_overrides(config: Option<PathBuf>, cache: Option<PathBuf>) -> Self {
        Self {
            config_override: config,
            cache_override: cache,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_override
            .clone()
            .unwrap_or_else(platform::wtwitch_config_file)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.cache_override
            .clone()
            .unwrap_or_else(platform::wtwitch_cache_file)
    }

    pub fn read_live_snapshot(&self) -> Result<Vec<LiveStreamRecord>> {
        let path = self.cache_path();
        let live = parse_live_snapshot(&read_document(&path)?)?;
        debug!("read {} live streams from {}", live.len(), path.display());
        Ok(live)
    }

    pub fn read_subscriptions(&self) -> Result<Vec<SubscriptionEntry>> {
        let path = self.config_path();
        let subs = parse_subscriptions(&read_document(&path)?)?;
        debug!("read {} subscriptions from {}", subs.len(), path.display());
        Ok(subs)
    }

    pub fn read_settings(&self) -> Result<SettingsSnapshot> {
        parse_settings(&read_document(&self.config_path())?)
    }
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "player": "mpv",
        "quality": "best",
        "colors": "true",
        "printOfflineSubscriptions": "false",
        "subscriptions": [
            { "streamer": "alice" },
            { "streamer": "bob" }
        ],
        "lastSubscriptionUpdate": "2024-03-01T12:00:00Z"
    }"#;

    #[test]
    fn parses_cache_records() {
        let cache = r#"{"data": [{
            "user_login": "a", "user_name": "Alice", "game_name": "Chess",
            "title": "Live now", "viewer_count": 10, "type": "live"
        }]}"#;
        let live = parse_live_snapshot(cache).unwrap();
        assert_eq!(
            live,
            vec![LiveStreamRecord {
                streamer_id: "a".into(),
                display_name: "Alice".into(),
                category: "Chess".into(),
                title: "Live now".into(),
                viewer_count: 10,
            }]
        );
    }

    #[test]
    fn empty_cache_collection_is_fine() {
        assert!(parse_live_snapshot(r#"{"data": []}"#).unwrap().is_empty());
    }

    #[test]
    fn cache_without_data_is_malformed() {
        assert!(matches!(
            parse_live_snapshot(r#"{"streams": []}"#),
            Err(CoreError::MalformedCache(_))
        ));
        assert!(matches!(
            parse_live_snapshot("not json"),
            Err(CoreError::MalformedCache(_))
        ));
    }

    #[test]
    fn negative_viewer_count_is_malformed() {
        let cache = r#"{"data": [{
            "user_login": "a", "user_name": "A", "game_name": "",
            "title": "", "viewer_count": -1
        }]}"#;
        assert!(matches!(
            parse_live_snapshot(cache),
            Err(CoreError::MalformedCache(_))
        ));
    }

    #[test]
    fn parses_subscriptions_in_order() {
        let subs = parse_subscriptions(CONFIG).unwrap();
        let ids: Vec<&str> = subs.iter().map(|s| s.streamer_id.as_str()).collect();
        assert_eq!(ids, vec!["alice", "bob"]);
    }

    #[test]
    fn config_without_subscriptions_is_malformed() {
        assert!(matches!(
            parse_subscriptions(r#"{"player": "mpv"}"#),
            Err(CoreError::MalformedConfig(_))
        ));
    }

    #[test]
    fn settings_decode_string_flags() {
        let settings = parse_settings(CONFIG).unwrap();
        assert_eq!(settings.player, "mpv");
        assert_eq!(settings.quality, "best");
        assert!(settings.color_output_enabled);
        assert!(!settings.print_offline_subscriptions_enabled);
    }

    #[test]
    fn settings_accept_native_booleans() {
        let doc = r#"{"player": "vlc", "quality": "480p,worst",
                      "colors": false, "printOfflineSubscriptions": true}"#;
        let settings = parse_settings(doc).unwrap();
        assert!(!settings.color_output_enabled);
        assert!(settings.print_offline_subscriptions_enabled);
    }

    #[test]
    fn settings_reject_unknown_flag_text() {
        let doc = r#"{"player": "mpv", "quality": "best",
                      "colors": "yes", "printOfflineSubscriptions": "true"}"#;
        assert!(matches!(parse_settings(doc), Err(CoreError::MalformedConfig(_))));
    }

    #[test]
    fn settings_reject_missing_field() {
        let doc = r#"{"player": "mpv", "colors": "true", "printOfflineSubscriptions": "true"}"#;
        assert!(matches!(parse_settings(doc), Err(CoreError::MalformedConfig(_))));
    }

    #[test]
    fn settings_reject_wrong_type() {
        let doc = r#"{"player": 3, "quality": "best",
                      "colors": "true", "printOfflineSubscriptions": "true"}"#;
        assert!(matches!(parse_settings(doc), Err(CoreError::MalformedConfig(_))));
    }

    #[test]
    fn missing_document_reports_path() {
        let store = SnapshotStore::with_paths("/nonexistent/config.json", "/nonexistent/cache.json");
        match store.read_live_snapshot() {
            Err(CoreError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/cache.json"))
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
