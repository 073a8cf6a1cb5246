pub mod renderer;

pub use renderer::{fit_grid, Renderer, View};
