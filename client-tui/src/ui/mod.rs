pub mod input;
pub mod render_loop;
pub mod theme;
pub mod widgets;

pub use render_loop::{run_app, AppOptions};
