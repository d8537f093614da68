//! Playback - owns the one clip that may be playing at any time.
//! The controller is platform-neutral; each build supplies its own stream backend.

mod controller;
mod events;
mod fault;
mod notice;
mod shortcuts;

#[cfg(not(target_arch = "wasm32"))]
mod desktop_backend;
#[cfg(target_arch = "wasm32")]
mod web_backend;

pub use controller::*;
pub use events::*;
pub use notice::*;
pub use shortcuts::*;

#[cfg(not(target_arch = "wasm32"))]
pub use desktop_backend::*;
#[cfg(target_arch = "wasm32")]
pub use web_backend::*;
