pub mod board;
pub mod game_info_panel;
pub mod move_history_panel;
pub mod notice_dialog;

pub use board::{BoardGeometry, BoardWidget};
pub use game_info_panel::GameInfoPanel;
pub use move_history_panel::MoveHistoryPanel;
pub use notice_dialog::NoticeDialog;
