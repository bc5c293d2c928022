pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{Camera, CameraTarget, Cameras, ScreenRect};
pub use instance::{DrawInstance, DrawList};
pub use traits::{AssetLoader, NoAssets, Renderer};
