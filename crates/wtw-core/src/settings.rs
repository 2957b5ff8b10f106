use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::extract::{decode_outcome, strip_ansi};
use crate::model::{OperationOutcome, SettingsSnapshot};
use crate::snapshot::SnapshotStore;
use crate::tool::{verb, ToolRunner};

/// Quality presets offered next to free-form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityPreset {
    High,
    Medium,
    Low,
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 3] = [Self::High, Self::Medium, Self::Low];

    /// Value as wtwitch understands it (streamlink quality with fallbacks).
    pub fn value(&self) -> &'static str {
        match self {
            Self::High => "best",
            Self::Medium => "720p,720p60,480p,best",
            Self::Low => "480p,worst",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// The preset a configured quality string corresponds to, if any.
    pub fn classify(quality: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == quality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerChoice {
    Mpv,
    Vlc,
    Custom(String),
}

impl PlayerChoice {
    pub fn classify(player: &str) -> Self {
        match player {
            "mpv" => Self::Mpv,
            "vlc" => Self::Vlc,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Mpv => "mpv",
            Self::Vlc => "vlc",
            Self::Custom(p) => p,
        }
    }
}

/// Reads the current wtwitch settings and submits changes to them.
///
/// Nothing is remembered between calls: wtwitch may rewrite its config at
/// any time, so callers re-fetch with [`SettingsProbe::current_settings`]
/// after every change.
pub struct SettingsProbe<T> {
    store: SnapshotStore,
    tool: T,
}

impl<T: ToolRunner> SettingsProbe<T> {
    pub fn new(store: SnapshotStore, tool: T) -> Self {
        Self { store, tool }
    }

    pub fn current_settings(&self) -> Result<SettingsSnapshot> {
        self.store.read_settings()
    }

    pub fn propose_quality(&self, value: &str) -> Result<OperationOutcome> {
        self.submit(verb::QUALITY, "quality", value)
    }

    pub fn propose_player(&self, value: &str) -> Result<OperationOutcome> {
        self.submit(verb::PLAYER, "player", value)
    }

    pub fn apply_quality_preset(&self, preset: QualityPreset) -> Result<OperationOutcome> {
        self.propose_quality(preset.value())
    }

    pub fn apply_player(&self, choice: &PlayerChoice) -> Result<OperationOutcome> {
        self.propose_player(choice.value())
    }

    /// Turn on colored output and offline-subscription printing if either
    /// is off; the extractor relies on the color markers.
    ///
    /// Returns whatever the toggles printed on stderr, one entry per toggle
    /// that complained.
    pub fn ensure_output_modes(&self) -> Result<Vec<String>> {
        let settings = self.current_settings()?;
        let mut problems = Vec::new();

        if !settings.color_output_enabled {
            info!("enabling wtwitch color output");
            self.toggle(verb::TOGGLE_COLORS, &mut problems)?;
        }
        if !settings.print_offline_subscriptions_enabled {
            info!("enabling wtwitch offline subscription output");
            self.toggle(verb::TOGGLE_OFFLINE, &mut problems)?;
        }
        Ok(problems)
    }

    fn toggle(&self, toggle_verb: &str, problems: &mut Vec<String>) -> Result<()> {
        let out = self.tool.run(&[toggle_verb])?;
        let stderr = strip_ansi(&out.stderr);
        if !stderr.trim().is_empty() {
            warn!("wtwitch {} wrote to stderr: {}", toggle_verb, stderr.trim());
            problems.push(stderr.trim().to_string());
        }
        Ok(())
    }

    fn submit(&self, setting_verb: &str, what: &str, value: &str) -> Result<OperationOutcome> {
        let value = validate_setting(what, value)?;
        let out = self.tool.run(&[setting_verb, value])?;
        Ok(decode_outcome(&out.stdout, &out.stderr))
    }
}

fn validate_setting<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(format!("{} must not be empty", what)));
    }
    Ok(trimmed)
}
