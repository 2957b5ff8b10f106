use tracing::{info, warn};

use crate::error::{CoreError, Result};
use crate::extract::{extract_vods, stderr_message};
use crate::model::VodRecord;
use crate::tool::{verb, ToolOutput, ToolRunner};

/// Shortest name accepted when following a channel.
pub const MIN_FOLLOW_NAME_LEN: usize = 3;

/// Per-channel wtwitch actions: status refresh, VODs, playback, follows.
pub struct Channels<T> {
    tool: T,
}

impl<T: ToolRunner> Channels<T> {
    pub fn new(tool: T) -> Self {
        Self { tool }
    }

    /// Ask wtwitch to re-check who is live. This rewrites the subscription
    /// cache; read it again afterwards.
    pub fn refresh_status(&self) -> Result<ToolOutput> {
        self.tool.run(&[verb::CHECK])
    }

    /// Past broadcasts of `channel`, newest first. Empty when the channel
    /// has none; an empty listing with an error on stderr is `ToolFailed`.
    pub fn list_vods(&self, channel: &str) -> Result<Vec<VodRecord>> {
        let channel = channel_id(channel)?;
        let out = self.tool.run(&[verb::VODS, channel])?;
        let vods = extract_vods(&out.stdout);
        if vods.is_empty() {
            if let Some(msg) = stderr_message(&out.stderr) {
                warn!("listing VODs of {} failed: {}", channel, msg);
                return Err(CoreError::ToolFailed(msg));
            }
        }
        info!("{} VODs listed for {}", vods.len(), channel);
        Ok(vods)
    }

    /// Play the VOD at `index` as numbered by [`Channels::list_vods`].
    pub fn play_vod(&self, channel: &str, index: u32) -> Result<ToolOutput> {
        let channel = channel_id(channel)?;
        if index == 0 {
            return Err(CoreError::InvalidInput("VOD numbers start at 1".into()));
        }
        let index = index.to_string();
        self.tool.run(&[verb::VODS, channel, &index])
    }

    pub fn watch(&self, channel: &str) -> Result<ToolOutput> {
        let channel = channel_id(channel)?;
        self.tool.run(&[verb::WATCH, channel])
    }

    pub fn follow(&self, name: &str) -> Result<ToolOutput> {
        let name = name.trim();
        if name.chars().count() < MIN_FOLLOW_NAME_LEN {
            return Err(CoreError::InvalidInput(format!(
                "channel names have at least {} characters",
                MIN_FOLLOW_NAME_LEN
            )));
        }
        self.tool.run(&[verb::SUBSCRIBE, name])
    }

    pub fn unfollow(&self, channel: &str) -> Result<ToolOutput> {
        let channel = channel_id(channel)?;
        self.tool.run(&[verb::UNSUBSCRIBE, channel])
    }
}

fn channel_id(channel: &str) -> Result<&str> {
    let channel = channel.trim();
    if channel.is_empty() {
        return Err(CoreError::InvalidInput("channel must not be empty".into()));
    }
    Ok(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        stdout: String,
        stderr: String,
    }

    impl ToolRunner for Recorder {
        fn run(&self, args: &[&str]) -> Result<ToolOutput> {
            self.calls.borrow_mut().push(args.join(" "));
            Ok(ToolOutput {
                stdout: self.stdout.clone(),
                stderr: self.stderr.clone(),
                exit_code: Some(if self.stderr.is_empty() { 0 } else { 1 }),
            })
        }
    }

    #[test]
    fn verbs_and_arguments() {
        let tool = Recorder::default();
        let channels = Channels::new(&tool);
        channels.refresh_status().unwrap();
        channels.play_vod("alice", 2).unwrap();
        channels.watch(" alice ").unwrap();
        channels.follow("bobby").unwrap();
        channels.unfollow("bobby").unwrap();
        assert_eq!(
            *tool.calls.borrow(),
            vec!["c", "v alice 2", "w alice", "s bobby", "u bobby"]
        );
    }

    #[test]
    fn rejects_bad_input_without_running() {
        let tool = Recorder::default();
        let channels = Channels::new(&tool);
        assert!(matches!(channels.play_vod("alice", 0), Err(CoreError::InvalidInput(_))));
        assert!(matches!(channels.follow(" ab "), Err(CoreError::InvalidInput(_))));
        assert!(matches!(channels.unfollow("  "), Err(CoreError::InvalidInput(_))));
        assert!(matches!(channels.list_vods(""), Err(CoreError::InvalidInput(_))));
        assert!(tool.calls.borrow().is_empty());
    }

    #[test]
    fn list_vods_decodes_listing() {
        let tool = Recorder {
            stdout: "\x1b[96m[2024-03-01 18:42:07]\x1b[0m Speedrun \x1b[93m1h3m\x1b[0m\n".into(),
            ..Default::default()
        };
        let vods = Channels::new(&tool).list_vods("alice").unwrap();
        assert_eq!(vods.len(), 1);
        assert_eq!(vods[0].sequence_index, 1);
        assert_eq!(vods[0].title, "Speedrun");
        assert_eq!(*tool.calls.borrow(), vec!["v alice"]);
    }

    #[test]
    fn failed_listing_is_not_an_empty_one() {
        let tool = Recorder {
            stderr: "\x1b[91mError\x1b[0m: nosuchchannel does not exist.\n".into(),
            ..Default::default()
        };
        match Channels::new(&tool).list_vods("nosuchchannel") {
            Err(CoreError::ToolFailed(msg)) => assert_eq!(msg, "nosuchchannel does not exist."),
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[test]
    fn quiet_empty_listing_means_no_recordings() {
        let tool = Recorder {
            stdout: "alice has no VODs\n".into(),
            ..Default::default()
        };
        assert!(Channels::new(&tool).list_vods("alice").unwrap().is_empty());
    }
}
