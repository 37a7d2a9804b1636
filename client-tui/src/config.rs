//! Configuration for the ChessLink client.
//!
//! Every runtime tunable has a compile-time default and, where it makes sense,
//! an environment override. CLI flags in `main.rs` take precedence over both.

use std::path::PathBuf;
use std::time::Duration;

/// Default authority address.
const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:5150";

/// Default slide duration of a move animation (in milliseconds).
const DEFAULT_ANIMATION_MS: u64 = 300;

/// Delay between a board commit and the last-move highlight (in milliseconds).
const HIGHLIGHT_DELAY_MS: u64 = 100;

/// How long the end-of-game notice stays up (in milliseconds).
const NOTICE_DURATION_MS: u64 = 5000;

/// Edge length of one board square in the animation's pixel space.
pub const SQUARE_SIZE_PX: f32 = 64.0;

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Get the authority address.
///
/// Priority:
/// 1. `CHESSLINK_SERVER_ADDR` env variable if set
/// 2. `127.0.0.1:5150` as fallback
pub fn get_server_addr() -> String {
    std::env::var("CHESSLINK_SERVER_ADDR").unwrap_or_else(|_| DEFAULT_SERVER_ADDR.to_string())
}

/// Get the Unix socket path of the authority, if one is configured.
///
/// When set, `CHESSLINK_SOCKET_PATH` wins over the TCP address.
pub fn get_socket_path() -> Option<PathBuf> {
    std::env::var_os("CHESSLINK_SOCKET_PATH").map(PathBuf::from)
}

/// Get the move animation duration.
///
/// Priority:
/// 1. `CHESSLINK_ANIMATION_MS` env variable if set (falls back to default
///    if the value cannot be parsed as a `u64`)
/// 2. `300` ms as fallback
pub fn get_animation_duration() -> Duration {
    let ms = std::env::var("CHESSLINK_ANIMATION_MS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_ANIMATION_MS);
    Duration::from_millis(ms)
}

/// Get the directory where log files are written.
pub fn get_log_dir() -> PathBuf {
    std::env::var_os("CHESSLINK_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
}

/// Timing and geometry used by the synchronization controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingConfig {
    /// Slide duration; also the cosmetic delay before follow-up requests.
    pub animation: Duration,
    pub highlight_delay: Duration,
    pub notice_duration: Duration,
    pub square_size: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            animation: Duration::from_millis(DEFAULT_ANIMATION_MS),
            highlight_delay: Duration::from_millis(HIGHLIGHT_DELAY_MS),
            notice_duration: Duration::from_millis(NOTICE_DURATION_MS),
            square_size: SQUARE_SIZE_PX,
        }
    }
}

impl TimingConfig {
    pub fn from_env() -> Self {
        Self {
            animation: get_animation_duration(),
            ..Self::default()
        }
    }
}
