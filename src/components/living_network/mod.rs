//! Animated node-link overlay on top of a field of floating photos.

mod animation;
mod component;
pub mod config;
mod dom;
pub mod geometry;
pub mod hash;
mod loader;
mod photo_layer;
pub mod photos;
pub mod random;
mod scene;
pub mod state;
pub mod types;
mod view;

pub use component::LivingNetwork;
pub use config::OverlayConfig;
