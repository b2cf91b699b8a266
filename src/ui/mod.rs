pub mod hud;
pub mod map_renderer;
