use crate::config::TimingConfig;
use crate::sync::SyncController;
use crate::ui::input::{self, AppAction, Cursor};
use crate::ui::theme::Theme;
use crate::ui::widgets::{BoardGeometry, BoardWidget, GameInfoPanel, MoveHistoryPanel, NoticeDialog};
use chess_client::{ChessClient, ClientMessage, EventStream, Transport};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Frame interval; drives animation and deferred timers (~60fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

const SIDE_PANEL_WIDTH: u16 = 34;
const INFO_PANEL_HEIGHT: u16 = 12;

/// Everything the TUI needs to start a session.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub server_addr: String,
    /// Unix socket to use instead of TCP.
    pub socket_path: Option<PathBuf>,
    /// Match setup sent right after connecting.
    pub setup: Option<ClientMessage>,
    pub timing: TimingConfig,
}

async fn connect(options: &AppOptions) -> anyhow::Result<(ChessClient, EventStream)> {
    #[cfg(unix)]
    if let Some(path) = &options.socket_path {
        tracing::info!(path = %path.display(), "Connecting to authority over Unix socket");
        return ChessClient::connect_uds(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", path.display(), e));
    }

    tracing::info!(addr = %options.server_addr, "Connecting to authority");
    ChessClient::connect(&options.server_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to {}: {}", options.server_addr, e))
}

pub async fn run_app(options: AppOptions) -> anyhow::Result<()> {
    let (mut client, events) = connect(&options).await?;
    if let Some(setup) = options.setup.clone() {
        tracing::info!(?setup, "Sending match setup");
        client.send(setup)?;
    }

    let sync = SyncController::new(client, options.timing);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui_loop(&mut terminal, sync, events, options.timing.square_size).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_ui_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    mut sync: SyncController<ChessClient>,
    mut events: EventStream,
    square_size: f32,
) -> anyhow::Result<()> {
    use crossterm::event::EventStream as TermEventStream;
    use futures::StreamExt;

    let theme = Theme::default();
    tracing::debug!(theme = theme.name(), "Theme selected");
    let mut term_events = TermEventStream::new();
    let mut frame_tick = tokio::time::interval(FRAME_INTERVAL);
    frame_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut cursor = Cursor::default();
    let mut board_area = Rect::default();
    let mut connected = true;

    loop {
        // Wait for whichever comes first: terminal input, authority event, or frame.
        tokio::select! {
            biased;

            maybe_event = term_events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => match input::handle_key(key) {
                    Some(AppAction::Quit) => {
                        tracing::info!("Quit requested");
                        return Ok(());
                    }
                    Some(AppAction::MoveCursor { d_row, d_col }) => cursor.shift(d_row, d_col),
                    Some(AppAction::Activate) => sync.on_cell_activated(cursor.square()),
                    None => {}
                },
                Some(Ok(Event::Mouse(mouse))) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let geometry = BoardGeometry::for_area(board_area);
                        if let Some(square) = geometry.square_at(mouse.column, mouse.row) {
                            cursor.set(square);
                            sync.on_cell_activated(square);
                        }
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                None => return Ok(()),
            },

            maybe_event = events.recv(), if connected => match maybe_event {
                Some(event) => sync.handle_event(event, Instant::now()),
                None => {
                    tracing::warn!("Authority closed the connection");
                    connected = false;
                }
            },

            _ = frame_tick.tick() => {}
        }

        sync.tick(Instant::now());

        terminal.draw(|f| {
            board_area = render(f, &sync, &theme, cursor, connected, square_size);
        })?;
    }
}

/// Draw one frame; returns the board area for mouse hit-testing.
fn render<T: Transport>(
    f: &mut Frame,
    sync: &SyncController<T>,
    theme: &Theme,
    cursor: Cursor,
    connected: bool,
    square_size: f32,
) -> Rect {
    let [board_area, side_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(SIDE_PANEL_WIDTH)])
            .areas(f.area());
    let [info_area, history_area] =
        Layout::vertical([Constraint::Length(INFO_PANEL_HEIGHT), Constraint::Min(0)])
            .areas(side_area);

    f.render_widget(
        BoardWidget::new(sync.scene(), theme, square_size).with_cursor(cursor.square()),
        board_area,
    );
    f.render_widget(
        GameInfoPanel::new(sync.match_state(), sync.phase(), connected, theme),
        info_area,
    );
    f.render_widget(MoveHistoryPanel::new(sync.move_log(), theme), history_area);

    if let Some(message) = sync.scene().notice() {
        f.render_widget(NoticeDialog::new(message, theme), board_area);
    }

    board_area
}
