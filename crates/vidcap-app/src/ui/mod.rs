pub mod overlay;
pub mod panels;
pub mod preview;
pub mod theme;

pub use overlay::EguiOverlay;
pub use preview::PreviewSurface;
