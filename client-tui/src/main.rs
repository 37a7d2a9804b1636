//! ChessLink terminal client.
//!
//! Connects to a game authority, optionally configures the match (which sides
//! are played here, engine search depth) and runs the board UI until the user
//! quits. All rules and engine play live in the authority.

use std::path::PathBuf;

use chess_client::ClientMessage;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use client_tui::config::{self, TimingConfig};
use client_tui::ui::{self, AppOptions};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Who plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Controller {
    /// Moves come from this terminal.
    Human,
    /// Moves come from the authority's engine.
    Ai,
}

#[derive(Parser, Debug)]
#[command(name = "chesslink", about = "Terminal chess client for a remote game authority")]
struct Cli {
    /// Authority address (host:port). Defaults to `CHESSLINK_SERVER_ADDR` or 127.0.0.1:5150.
    #[arg(short, long)]
    addr: Option<String>,

    /// Connect over a Unix socket instead of TCP. Defaults to `CHESSLINK_SOCKET_PATH`.
    #[arg(short, long)]
    socket: Option<PathBuf>,

    /// Who plays White. Sends a match setup when given.
    #[arg(long, value_enum)]
    white: Option<Controller>,

    /// Who plays Black. Sends a match setup when given.
    #[arg(long, value_enum)]
    black: Option<Controller>,

    /// Engine search depth for AI-controlled sides.
    #[arg(short, long, default_value_t = 2)]
    depth: u8,
}

impl Cli {
    /// Match setup for the authority; `None` leaves its configuration alone.
    ///
    /// At least one side must be played here: the client only asks the
    /// engine to move on behalf of the opponent of a local player.
    fn match_setup(&self) -> Result<Option<ClientMessage>, clap::Error> {
        if self.white.is_none() && self.black.is_none() {
            return Ok(None);
        }
        let white = self.white.unwrap_or(Controller::Human);
        let black = self.black.unwrap_or(Controller::Ai);
        if white == Controller::Ai && black == Controller::Ai {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "at least one of --white and --black must be human",
            ));
        }
        Ok(Some(ClientMessage::ConfigureMatch {
            local_controls_white: white == Controller::Human,
            local_controls_black: black == Controller::Human,
            search_depth: self.depth,
        }))
    }

    fn into_options(self) -> Result<AppOptions, clap::Error> {
        let setup = self.match_setup()?;
        Ok(AppOptions {
            server_addr: self.addr.unwrap_or_else(config::get_server_addr),
            socket_path: self.socket.or_else(config::get_socket_path),
            setup,
            timing: TimingConfig::from_env(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Cli::parse().into_options().unwrap_or_else(|err| err.exit());

    // Set up tracing with file output; the terminal belongs to the UI.
    let log_dir = config::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let file_appender = tracing_appender::rolling::daily(&log_dir, "chesslink-client");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    tracing::info!("ChessLink client starting up");
    ui::run_app(options).await?;
    tracing::info!("ChessLink client shutting down");
    Ok(())
}
