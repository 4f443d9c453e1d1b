//! World Kernel: owns the active game state and every simulation resource,
//! and sequences them through a variable-rate `update` and a fixed-rate
//! `fixed_update`.
//!
//! # Invariants
//! - At most one game state is active at a time.
//! - The camera exists for the whole time the world is running.
//! - A pending game state is installed at the top of the next `update`, as a
//!   full reset shutdown followed by a startup, never mid-frame.
//! - Destroying an entity invalidates its handle immediately.

pub mod camera;
pub mod clock;
pub mod config;
pub mod entity;
pub mod environment;
pub mod game_state;
pub mod light;
pub mod material;
pub mod terrain;
pub mod world;

pub use camera::{Camera, CameraAttr};
pub use clock::FixedStepClock;
pub use config::{ConfigError, EngineConfig, RenderSpec, WindowMode, WindowSpec};
pub use entity::{Entity, EntityArena, EntityHandle};
pub use environment::{Environment2D, EnvironmentError};
pub use game_state::GameState;
pub use light::{Light, LightId, LightType};
pub use material::{Material, MaterialId, ShadeMode};
pub use terrain::{Mesh, TerrainSlot};
pub use world::{ShutDownReason, World, WorldError, WorldPhase};
