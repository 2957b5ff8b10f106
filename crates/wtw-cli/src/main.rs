mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use wtw_core::channels::Channels;
use wtw_core::config::Config;
use wtw_core::reconcile::reconcile_store;
use wtw_core::settings::{PlayerChoice, QualityPreset, SettingsProbe};
use wtw_core::tool::{ToolOutput, ToolRunner};
use wtw_core::OperationOutcome;

#[derive(Parser, Debug)]
#[command(name = "wtw", about = "Front-end for the wtwitch livestream notifier")]
struct Args {
    /// Front-end config file (defaults to <config dir>/wtw/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Show followed channels, live first.
    Status {
        /// Run `wtwitch c` before reading the cache.
        #[arg(long)]
        refresh: bool,
    },
    /// List a channel's past broadcasts.
    Vods { channel: String },
    /// Play the n-th past broadcast of a channel.
    Play { channel: String, index: u32 },
    /// Watch a channel live.
    Watch { channel: String },
    Follow { name: String },
    Unfollow { channel: String },
    /// Set the stream quality.
    Quality {
        value: Option<String>,
        #[arg(long, value_enum, conflicts_with = "value")]
        preset: Option<Preset>,
    },
    /// Set the media player.
    Player { value: String },
    /// Show the current wtwitch settings.
    Settings,
    /// Make sure wtwitch prints colors and offline subscriptions.
    EnsureOutput,
}

impl Cmd {
    /// Commands whose wtwitch output is decoded through the color markers.
    fn decodes_output(&self) -> bool {
        matches!(
            self,
            Cmd::Vods { .. } | Cmd::Quality { .. } | Cmd::Player { .. }
        )
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    High,
    Medium,
    Low,
}

impl From<Preset> for QualityPreset {
    fn from(p: Preset) -> Self {
        match p {
            Preset::High => QualityPreset::High,
            Preset::Medium => QualityPreset::Medium,
            Preset::Low => QualityPreset::Low,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading front-end config")?;

    // RUST_LOG overrides the configured filter. Logs go to stderr so they
    // never mix with listings on stdout.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter.as_str())
        .init();
    tracing::debug!("front-end config: {:?}", config);

    let store = config.snapshot_store();
    let tool = config.wtwitch();
    let channels = Channels::new(&tool);
    let probe = SettingsProbe::new(store.clone(), &tool);

    if args.command.decodes_output() {
        ensure_colored_output(&probe)?;
    }

    match args.command {
        Cmd::Status { refresh } => {
            if refresh {
                channels.refresh_status().context("refreshing live status")?;
            }
            let view = reconcile_store(&store).context("reading wtwitch snapshot")?;
            print!("{}", render::status_view(&view));
        }
        Cmd::Vods { channel } => {
            let vods = channels.list_vods(&channel)?;
            if vods.is_empty() {
                println!("{} has no VODs", channel);
            } else {
                print!("{}", render::vod_list(&channel, &vods));
            }
        }
        Cmd::Play { channel, index } => {
            channels.play_vod(&channel, index)?;
        }
        Cmd::Watch { channel } => {
            channels.watch(&channel)?;
        }
        Cmd::Follow { name } => {
            check_tool(&channels.follow(&name)?)?;
            println!("following {}", name.trim());
        }
        Cmd::Unfollow { channel } => {
            check_tool(&channels.unfollow(&channel)?)?;
            println!("unfollowed {}", channel.trim());
        }
        Cmd::Quality { value, preset } => {
            let outcome = match (preset, value) {
                (Some(p), _) => probe.apply_quality_preset(p.into())?,
                (None, Some(v)) => probe.propose_quality(&v)?,
                (None, None) => anyhow::bail!("give a quality value or --preset"),
            };
            report(outcome)?;
        }
        Cmd::Player { value } => {
            let outcome = probe.apply_player(&PlayerChoice::classify(value.trim()))?;
            report(outcome)?;
        }
        Cmd::Settings => {
            let settings = probe.current_settings()?;
            print!("{}", render::settings(&settings));
        }
        Cmd::EnsureOutput => {
            let problems = probe.ensure_output_modes()?;
            for p in &problems {
                eprintln!("wtwitch: {}", p);
            }
            if !problems.is_empty() {
                anyhow::bail!("wtwitch reported {} problem(s)", problems.len());
            }
        }
    }

    Ok(())
}

/// Switch wtwitch's colors and offline listing back on if they were turned
/// off. Problems the toggles report are printed and returned; the command
/// still runs.
fn ensure_colored_output<T: ToolRunner>(probe: &SettingsProbe<T>) -> Result<Vec<String>> {
    let problems = probe
        .ensure_output_modes()
        .context("enabling wtwitch colored output")?;
    for p in &problems {
        eprintln!("wtwitch: {}", p);
    }
    Ok(problems)
}

/// Anything wtwitch wrote to stderr means the change did not go through.
fn check_tool(out: &ToolOutput) -> Result<()> {
    match render::tool_complaint(out) {
        Some(msg) => anyhow::bail!("wtwitch: {}", msg),
        None => Ok(()),
    }
}

fn report(outcome: OperationOutcome) -> Result<()> {
    match outcome {
        OperationOutcome::Confirmed(msg) => {
            println!("{}", msg);
            Ok(())
        }
        OperationOutcome::Failed(msg) => anyhow::bail!(msg),
    }
}
