pub mod app;
pub mod output;

pub use app::Plugin;
pub use output::{render_meta, render_metrics, META_HEADER};
