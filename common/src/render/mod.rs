pub mod frame;
pub mod traits;

pub use frame::FrameRenderer;
pub use traits::Canvas;
