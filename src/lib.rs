pub mod animation;
pub mod clock;
pub mod config;
pub mod error;
pub mod geometry;
#[cfg(feature = "gtk")]
pub mod host;
pub mod logging;
pub mod persistence;
pub mod render;
pub mod state;
pub mod view;

pub use clock::{FrameClock, ManualClock, SystemFrameClock};
pub use config::{load_config, ConfigOverrides, HoldTickConfig};
pub use error::{HoldTickError, HoldTickResult};
pub use geometry::{ArgbColor, GeometrySnapshot};
pub use persistence::PersistedState;
pub use render::RenderScene;
pub use state::{GesturePhase, InputEvent, InputOutcome, ListenerId};
pub use view::HoldTickView;

/// Entrypoint for the demo binary.
#[cfg(feature = "gtk")]
pub fn run() -> HoldTickResult<()> {
    logging::init();
    tracing::info!("starting HoldTick demo");
    host::run()
}
