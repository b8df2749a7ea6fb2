//! Inkboard Render Library
//!
//! Renderer abstraction and implementations for Inkboard.
//! The default implementation rasterizes on the CPU with tiny-skia.

pub mod pattern;
mod renderer;
pub mod sketch;
mod skia_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use skia_impl::SkiaRenderer;
