//! Decoding of wtwitch's colorized terminal output.
//!
//! wtwitch has no machine-readable output mode, so the color escapes it
//! prints double as field delimiters:
//!
//! ```text
//!   ESC[96m[2024-03-01 18:42:07]ESC[0m  Some stream title ESC[93m3h12mESC[0m
//!   └──── timestamp marker ────┘        └─ title ─┘        └─ duration ─┘
//! ```
//!
//! Settings changes answer with a confirmation framed between a line start
//! and a color reset on stdout, or an error following `ESC[0m: ` on stderr.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::model::{OperationOutcome, VodRecord};

/// Opening marker of a VOD timestamp. Every listing line carrying it counts
/// as one entry of the tool's own numbering.
const TIMESTAMP_MARKER: &str = "[96m[";

/// Message used when the tool printed nothing recognisable at all.
pub const UNKNOWN_ERROR: &str = "unknown error";

// Seconds are dropped from the timestamp; the title runs up to the
// duration marker; the duration is one token ended by the color reset.
static VOD_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\x1b?\[96m\[(?P<ts>\S* \d[^\]]*:\d[^\]]*):\d[^\]]*\]\x1b\[0m\s*(?P<title>\S.*?)\s+\x1b\[93m(?P<dur>[^\s\x1b]+)\x1b\[0m",
    )
    .expect("VOD entry pattern")
});

static CONFIRMATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s(.*)\n\x1b\[0m").expect("confirmation pattern"));

static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[0m: (\S.*?\.)").expect("error pattern"));

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("escape pattern"));

/// Extract the VOD listing printed by `wtwitch v <channel>`.
///
/// Each entry line is matched as a whole, so the three fields of a record
/// always come from the same line. An entry missing a field is skipped but
/// still counts toward the numbering, keeping `sequence_index` aligned with
/// what `wtwitch v <channel> <n>` expects. No timestamp markers at all means
/// the channel has no recordings and yields an empty list.
pub fn extract_vods(raw: &str) -> Vec<VodRecord> {
    let mut vods = Vec::new();
    let mut ordinal: u32 = 0;

    for line in raw.lines().filter(|l| l.contains(TIMESTAMP_MARKER)) {
        ordinal += 1;
        match VOD_ENTRY.captures(line) {
            Some(caps) => vods.push(VodRecord {
                sequence_index: ordinal,
                timestamp: caps["ts"].to_string(),
                title: caps["title"].trim_end().to_string(),
                duration: caps["dur"].to_string(),
            }),
            None => debug!("skipping incomplete VOD entry {}: {:?}", ordinal, line),
        }
    }

    if vods.len() < ordinal as usize {
        warn!(
            "{} of {} VOD entries were incomplete",
            ordinal as usize - vods.len(),
            ordinal
        );
    }
    vods
}

/// Decode the result of a settings change (`wtwitch q` / `wtwitch p`).
///
/// A confirmation on stdout wins over anything on stderr. Returns
/// `ExtractionAmbiguous` when neither frame is present.
pub fn try_decode_outcome(stdout: &str, stderr: &str) -> Result<OperationOutcome> {
    if let Some(caps) = CONFIRMATION.captures(stdout) {
        return Ok(OperationOutcome::Confirmed(caps[1].trim().to_string()));
    }
    if let Some(msg) = framed_error(stderr) {
        return Ok(OperationOutcome::Failed(msg));
    }
    Err(CoreError::ExtractionAmbiguous)
}

/// First error sentence wtwitch framed on stderr, if any.
pub fn framed_error(stderr: &str) -> Option<String> {
    ERROR_LINE.captures(stderr).map(|caps| caps[1].to_string())
}

/// Error text from stderr: the framed sentence if present, otherwise the
/// whole stderr without escapes. `None` when stderr is blank.
pub fn stderr_message(stderr: &str) -> Option<String> {
    framed_error(stderr).or_else(|| {
        let plain = strip_ansi(stderr);
        let plain = plain.trim();
        (!plain.is_empty()).then(|| plain.to_string())
    })
}

/// Like [`try_decode_outcome`], but never fails: unframed output becomes a
/// `Failed` carrying the plain stderr text, or [`UNKNOWN_ERROR`].
pub fn decode_outcome(stdout: &str, stderr: &str) -> OperationOutcome {
    match try_decode_outcome(stdout, stderr) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("{}; stdout={:?} stderr={:?}", e, stdout, stderr);
            OperationOutcome::Failed(
                stderr_message(stderr).unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            )
        }
    }
}

/// Remove ANSI color/control escapes.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
