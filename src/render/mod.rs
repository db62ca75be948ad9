//! Rendering of status reports and log lines into styled output lines.

pub mod colors;
pub mod line;
pub mod log;
pub mod palette;
pub mod status;

pub use line::Line;
pub use log::{DEFAULT_TAG_WIDTH, DEFAULT_WIDTH, LogRenderer, reception_time};
pub use palette::TagPalette;
pub use status::render_report;
