mod format;
mod render;
mod sparkline;

pub use render::draw;
