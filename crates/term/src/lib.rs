//! Terminal rendering layer: drawing surface, renderer and game view.

pub mod game_view;
pub mod renderer;
pub mod surface;

pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
pub use surface::{Cell, Rgb, Surface, Weight};
