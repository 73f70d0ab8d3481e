pub mod api;
pub mod bridge;
pub mod core;
pub mod data;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{ShipTuning, SimConfig};
pub use api::types::{BodyId, BodyKind, CelestialBody, DiameterRange};
pub use bridge::protocol::ProtocolLayout;
pub use crate::core::distance::{to_screen_radius, DistanceScale};
pub use crate::core::field::{BodyField, PlacedBody};
pub use crate::core::orbit::OrbitState;
pub use crate::core::rng::Rng;
pub use crate::core::ship::ShipState;
pub use crate::core::simulation::Simulation;
pub use crate::core::time::FixedTimestep;
pub use data::feed::{feed_url, FeedResponse};
pub use data::planets::PlanetCatalog;
pub use data::poll::Poller;
pub use data::snapshot::SnapshotRecord;
pub use error::{FeedError, InitError};
pub use input::queue::{InputEvent, InputQueue};
pub use input::state::{Button, InputState};
pub use renderer::camera::{CameraState, Viewport};
pub use renderer::commands::{FrameCommands, Renderer};
pub use systems::scheduler::{FrameSource, Scheduler};
