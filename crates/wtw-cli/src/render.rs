//! Plain-text rendering of core results.

use std::fmt::Write;

use wtw_core::extract::stderr_message;
use wtw_core::settings::{PlayerChoice, QualityPreset};
use wtw_core::tool::ToolOutput;
use wtw_core::{SettingsSnapshot, StatusView, VodRecord};

const TITLE_WIDTH: usize = 50;

pub fn status_view(view: &StatusView) -> String {
    let mut out = String::new();
    if view.is_empty() {
        out.push_str("not following anyone\n");
        return out;
    }
    for rec in &view.live {
        let _ = writeln!(
            out,
            "● {:<20} {} ({} viewers)\n    {}",
            rec.display_name, rec.category, rec.viewer_count, rec.title
        );
    }
    for id in &view.offline {
        let _ = writeln!(out, "○ {}", id);
    }
    out
}

pub fn vod_list(channel: &str, vods: &[VodRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}'s VODs", channel);
    for vod in vods {
        let when = vod
            .started_at()
            .map(|t| t.format("%a %d %b %H:%M").to_string())
            .unwrap_or_else(|| vod.timestamp.clone());
        let _ = writeln!(
            out,
            "{:>3}  {}  {:>7}  {}",
            vod.sequence_index,
            when,
            vod.duration,
            vod.short_title(TITLE_WIDTH)
        );
    }
    out
}

pub fn settings(settings: &SettingsSnapshot) -> String {
    let quality = match QualityPreset::classify(&settings.quality) {
        Some(p) => format!("{} ({})", settings.quality, p.label()),
        None => format!("{} (custom)", settings.quality),
    };
    let player = match PlayerChoice::classify(&settings.player) {
        PlayerChoice::Custom(p) => format!("{} (custom)", p),
        known => known.value().to_string(),
    };
    format!(
        "player:  {}\nquality: {}\ncolors:  {}\noffline: {}\n",
        player,
        quality,
        on_off(settings.color_output_enabled),
        on_off(settings.print_offline_subscriptions_enabled)
    )
}

/// What wtwitch complained about on stderr, without color escapes.
pub fn tool_complaint(out: &ToolOutput) -> Option<String> {
    stderr_message(&out.stderr)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wtw_core::LiveStreamRecord;

    #[test]
    fn live_group_precedes_offline() {
        let view = StatusView {
            live: vec![LiveStreamRecord {
                streamer_id: "a".into(),
                display_name: "Alice".into(),
                category: "Chess".into(),
                title: "Live now".into(),
                viewer_count: 10,
            }],
            offline: vec!["b".into()],
        };
        let text = status_view(&view);
        let alice = text.find("Alice").unwrap();
        let bob = text.find("○ b").unwrap();
        assert!(alice < bob);
        assert!(text.contains("(10 viewers)"));
    }

    #[test]
    fn vod_list_keeps_tool_numbering() {
        let vods = vec![VodRecord {
            sequence_index: 3,
            timestamp: "Fri 18:42".into(),
            title: "x".repeat(60),
            duration: "2h".into(),
        }];
        let text = vod_list("alice", &vods);
        assert!(text.contains("  3  Fri 18:42"));
        assert!(text.contains(&format!("{}...", "x".repeat(50))));
    }

    #[test]
    fn tool_complaint_strips_escapes() {
        let out = ToolOutput {
            stderr: "\x1b[31malready following bob\x1b[0m\n".into(),
            ..Default::default()
        };
        assert_eq!(tool_complaint(&out).as_deref(), Some("already following bob"));
        assert_eq!(tool_complaint(&ToolOutput::default()), None);
    }

    #[test]
    fn settings_mark_custom_values() {
        let text = settings(&SettingsSnapshot {
            player: "celluloid".into(),
            quality: "best".into(),
            color_output_enabled: true,
            print_offline_subscriptions_enabled: false,
        });
        assert!(text.contains("celluloid (custom)"));
        assert!(text.contains("best (high)"));
        assert!(text.contains("offline: off"));
    }
}
