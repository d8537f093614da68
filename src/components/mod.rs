//! The components module contains all shared components for the showcase page.

mod app;
mod audio_manager;
mod avatar;
mod icons;
mod navigation;
mod reveal;
mod services;

pub use app::*;
pub use audio_manager::*;
pub use avatar::*;
pub use icons::*;
pub use navigation::*;
pub use reveal::*;
pub use services::*;
