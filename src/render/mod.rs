//! Pixel storage and rasterization.

pub mod framebuffer;
pub mod rasterizer;
pub mod viewport;

pub use framebuffer::{FrameBuffer, Rect};
pub use rasterizer::{
    AliasedRasterizer, AntiAliasedRasterizer, Line, LineRasterizer, RasterizerDispatcher,
    RasterizerType,
};
pub use viewport::Viewport;
