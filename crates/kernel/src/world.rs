use glam::Vec3;
use std::path::Path;

use crate::camera::{Camera, CameraAttr};
use crate::config::{EngineConfig, RenderSpec};
use crate::entity::{Entity, EntityArena, EntityHandle};
use crate::environment::{Environment2D, EnvironmentError};
use crate::game_state::GameState;
use crate::light::{Light, LightId, LightType};
use crate::material::{Material, MaterialId};
use crate::terrain::{Mesh, TerrainSlot};
use volition_common::math::wrap_degrees;

pub const MIN_ENTITIES_CAPACITY: usize = 256;
pub const MIN_MATERIALS_CAPACITY: usize = 64;
pub const MIN_LIGHTS_CAPACITY: usize = 8;

/// Degrees per millisecond of fixed time.
pub const ENVIRONMENT_2D_MOVEMENT_SPEED: f32 = 0.00175;

const CAMERA_START_POSITION: Vec3 = Vec3::new(0.0, 1000.0, 1500.0);
const CAMERA_START_FOV: f32 = 80.0;
const CAMERA_START_NEAR: f32 = 100.0;
const CAMERA_START_FAR: f32 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutDownReason {
    /// Tear down the session so `start_up` can run again right away.
    /// The camera and any pending game state survive.
    Reset,
    /// Engine teardown: also drops the camera and a pending game state.
    Final,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldPhase {
    Uninitialized,
    Running,
    ShuttingDown(ShutDownReason),
}

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world is already running")]
    AlreadyRunning,
    #[error("world is not running")]
    NotRunning,
    #[error("world lifecycle call made from inside a game state callback")]
    Reentrant,
    #[error("camera slot is empty while the world is running")]
    CameraMissing,
}

/// The orchestrator: owns the active game state and every simulation
/// resource, and runs the two update cadences.
///
/// Frame order in [`update`](Self::update): pending state swap, game state,
/// entities in slot order, camera. [`fixed_update`](Self::fixed_update) runs
/// the game state's fixed step and then the environment animation.
pub struct World {
    phase: WorldPhase,
    config: EngineConfig,
    game_state: Option<Box<dyn GameState>>,
    next_game_state: Option<Box<dyn GameState>>,
    camera: Option<Camera>,
    terrain_mesh: Option<Mesh>,
    entities: EntityArena,
    materials: Vec<Material>,
    lights: Vec<Light>,
    shadow_making_light: Option<LightId>,
    environment: Environment2D,
    environment_angle: f32,
    environment_speed: f32,
    /// Set while a game state callback runs.
    dispatching: bool,
    frame: u64,
    fixed_steps: u64,
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("phase", &self.phase)
            .field("game_state", &self.game_state.as_ref().map(|s| s.name()))
            .field(
                "next_game_state",
                &self.next_game_state.as_ref().map(|s| s.name()),
            )
            .field("camera", &self.camera.is_some())
            .field("terrain_mesh", &self.terrain_mesh.is_some())
            .field("entities", &self.entities)
            .field("materials", &self.materials.len())
            .field("lights", &self.lights.len())
            .field("environment_angle", &self.environment_angle)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// An uninitialized world with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An uninitialized world using `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            phase: WorldPhase::Uninitialized,
            config,
            game_state: None,
            next_game_state: None,
            camera: None,
            terrain_mesh: None,
            entities: EntityArena::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            shadow_making_light: None,
            environment: Environment2D::default(),
            environment_angle: 0.0,
            environment_speed: ENVIRONMENT_2D_MOVEMENT_SPEED,
            dispatching: false,
            frame: 0,
            fixed_steps: 0,
        }
    }

    // --- Lifecycle ---

    /// Build the session and install `initial` as the active game state.
    ///
    /// The game state's own `start_up` runs last, so it sees a fully built
    /// world.
    pub fn start_up(&mut self, initial: Box<dyn GameState>) -> Result<(), WorldError> {
        if self.dispatching {
            return Err(WorldError::Reentrant);
        }
        if self.phase == WorldPhase::Running {
            return Err(WorldError::AlreadyRunning);
        }
        let _span = tracing::info_span!("world_start_up", state = initial.name()).entered();

        self.config.render.debug_text_color = RenderSpec::DEFAULT_DEBUG_TEXT_COLOR;

        self.environment_angle = 0.0;
        self.environment_speed = ENVIRONMENT_2D_MOVEMENT_SPEED;

        self.entities.reserve(MIN_ENTITIES_CAPACITY);
        self.materials
            .reserve(MIN_MATERIALS_CAPACITY.saturating_sub(self.materials.len()));
        self.lights
            .reserve(MIN_LIGHTS_CAPACITY.saturating_sub(self.lights.len()));
        self.shadow_making_light = None;

        let mut camera = Camera::new();
        camera.set_aspect(self.config.window.aspect_ratio());
        camera.init(
            CameraAttr::Euler,
            CAMERA_START_POSITION,
            Vec3::ZERO,
            Vec3::ZERO,
            CAMERA_START_FOV,
            CAMERA_START_NEAR,
            CAMERA_START_FAR,
        );
        self.camera = Some(camera);

        self.terrain_mesh = Some(Mesh::new());

        if let Some(stale) = self.next_game_state.take() {
            tracing::debug!(state = stale.name(), "dropping pending game state");
        }
        self.game_state = Some(initial);
        self.phase = WorldPhase::Running;
        self.dispatch(|state, world| state.start_up(world));

        tracing::info!("world started");
        Ok(())
    }

    /// Tear the session down. Every step is guarded, so this is safe on a
    /// world that never started or is already torn down.
    pub fn shut_down(
        &mut self,
        reason: ShutDownReason,
        renderer: &mut dyn TerrainSlot,
    ) -> Result<(), WorldError> {
        if self.dispatching {
            return Err(WorldError::Reentrant);
        }
        let _span = tracing::info_span!("world_shut_down", ?reason).entered();
        self.phase = WorldPhase::ShuttingDown(reason);

        if let Some(mut state) = self.game_state.take() {
            self.dispatching = true;
            state.shut_down(self);
            self.dispatching = false;
            tracing::debug!(state = state.name(), "game state shut down");
        }

        if reason == ShutDownReason::Final {
            if let Some(pending) = self.next_game_state.take() {
                tracing::debug!(state = pending.name(), "discarding unconsumed game state");
            }
            self.camera = None;
        }

        if let Some(mesh) = self.terrain_mesh.as_mut() {
            mesh.destroy();
            renderer.remove_terrain();
        }
        self.terrain_mesh = None;

        self.environment.destroy();

        let mut destroyed = 0usize;
        self.entities.clear_with(|mut entity| {
            entity.destroy();
            destroyed += 1;
        });

        for material in &mut self.materials {
            material.destroy();
        }
        self.materials.clear();

        for light in &mut self.lights {
            light.destroy();
        }
        self.lights.clear();
        self.shadow_making_light = None;

        self.phase = WorldPhase::Uninitialized;
        tracing::info!(destroyed_entities = destroyed, "world shut down");
        Ok(())
    }

    /// Variable-rate step, once per rendered frame.
    ///
    /// A pending game state is installed first, through a full
    /// `shut_down(Reset)` + `start_up`, before any other work this frame.
    pub fn update(&mut self, dt: f32, renderer: &mut dyn TerrainSlot) -> Result<(), WorldError> {
        self.ensure_running()?;

        if let Some(next) = self.next_game_state.take() {
            tracing::info!(state = next.name(), "switching game state");
            self.shut_down(ShutDownReason::Reset, renderer)?;
            self.start_up(next)?;
        }

        self.dispatch(|state, world| state.update(world, dt));

        for entity in self.entities.iter_mut() {
            entity.update(dt);
        }

        self.camera
            .as_mut()
            .ok_or(WorldError::CameraMissing)?
            .update(dt);

        self.frame += 1;
        tracing::trace!(frame = self.frame, dt, "world updated");
        Ok(())
    }

    /// Fixed-rate step. May run any number of times per frame; the result
    /// depends only on the sequence of `fixed_dt` values.
    pub fn fixed_update(&mut self, fixed_dt: f32) -> Result<(), WorldError> {
        self.ensure_running()?;
        self.dispatch(|state, world| state.fixed_update(world, fixed_dt));
        self.fixed_update_environment(fixed_dt);
        self.fixed_steps += 1;
        Ok(())
    }

    /// Advance the environment animation, keeping the angle in `[0, 360)`.
    pub fn fixed_update_environment(&mut self, fixed_dt: f32) {
        self.environment_angle =
            wrap_degrees(self.environment_angle + self.environment_speed * fixed_dt);
    }

    /// Queue a game state for the next `update`. Replaces an unconsumed one.
    pub fn set_next_game_state(&mut self, state: Box<dyn GameState>) {
        if let Some(old) = self.next_game_state.replace(state) {
            tracing::warn!(state = old.name(), "pending game state replaced before it ran");
        }
    }

    /// Whether a state queued by `set_next_game_state` is waiting to run.
    pub fn has_pending_game_state(&self) -> bool {
        self.next_game_state.is_some()
    }

    fn ensure_running(&self) -> Result<(), WorldError> {
        if self.dispatching {
            return Err(WorldError::Reentrant);
        }
        if self.phase != WorldPhase::Running {
            return Err(WorldError::NotRunning);
        }
        Ok(())
    }

    /// Run `f` on the active game state with the state moved out of its slot.
    fn dispatch(&mut self, f: impl FnOnce(&mut dyn GameState, &mut World)) {
        let Some(mut state) = self.game_state.take() else {
            return;
        };
        self.dispatching = true;
        f(state.as_mut(), self);
        self.dispatching = false;
        self.game_state = Some(state);
    }

    // --- Entities ---

    /// Take ownership of an entity; it updates every frame until destroyed.
    pub fn spawn_entity(&mut self, entity: Box<dyn Entity>) -> EntityHandle {
        let handle = self.entities.insert(entity);
        tracing::debug!(index = handle.index(), "entity spawned");
        handle
    }

    /// Remove, destroy, and drop an entity. The handle is dead on return.
    /// Null and stale handles are ignored and return `false`.
    pub fn destroy_entity(&mut self, handle: EntityHandle) -> bool {
        if handle.is_null() {
            return false;
        }
        match self.entities.remove(handle) {
            Some(mut entity) => {
                entity.destroy();
                tracing::debug!(index = handle.index(), "entity destroyed");
                true
            }
            None => {
                tracing::warn!(?handle, "destroy on stale entity handle ignored");
                false
            }
        }
    }

    /// Look up a live entity. Null and stale handles yield `None`.
    pub fn entity(&self, handle: EntityHandle) -> Option<&dyn Entity> {
        self.entities.get(handle)
    }

    /// Mutable form of [`World::entity`].
    pub fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut (dyn Entity + 'static)> {
        self.entities.get_mut(handle)
    }

    /// Live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The arena, iterated in slot order by `update`.
    pub fn entities(&self) -> &EntityArena {
        &self.entities
    }

    // --- Lights & materials ---

    /// Append an initialized light. The id stays valid until the next
    /// shutdown, however many lights are added after it.
    pub fn spawn_light(&mut self, kind: LightType) -> LightId {
        let mut light = Light::default();
        light.init(kind);
        self.lights.push(light);
        let id = LightId((self.lights.len() - 1) as u32);
        tracing::debug!(?id, ?kind, "light spawned");
        id
    }

    /// Lights are cleared on shutdown, which invalidates every id.
    pub fn light(&self, id: LightId) -> Option<&Light> {
        self.lights.get(id.0 as usize)
    }

    /// Mutable form of [`World::light`].
    pub fn light_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.lights.get_mut(id.0 as usize)
    }

    /// All lights in spawn order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Pick the light that casts shadows. Unknown ids clear the selection.
    pub fn set_shadow_making_light(&mut self, id: Option<LightId>) {
        self.shadow_making_light = id.filter(|id| self.light(*id).is_some());
    }

    /// The shadow-casting light, if one is selected.
    pub fn shadow_making_light(&self) -> Option<LightId> {
        self.shadow_making_light
    }

    /// Append an initialized material.
    pub fn add_material(&mut self) -> MaterialId {
        let mut material = Material::default();
        material.init();
        self.materials.push(material);
        let id = MaterialId((self.materials.len() - 1) as u32);
        tracing::debug!(?id, "material added");
        id
    }

    /// Look up a material added since the last shutdown.
    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    /// Mutable form of [`World::material`].
    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0 as usize)
    }

    /// All materials in insertion order.
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    // --- Environment ---

    /// Point the 2D background at an image path. Empty paths are rejected.
    pub fn set_environment_2d(&mut self, path: impl AsRef<Path>) -> Result<(), EnvironmentError> {
        self.environment.load(path.as_ref())
    }

    /// The 2D background source.
    pub fn environment(&self) -> &Environment2D {
        &self.environment
    }

    /// Background rotation in degrees, always in `[0, 360)`.
    pub fn environment_angle(&self) -> f32 {
        self.environment_angle
    }

    /// Degrees per millisecond of fixed time.
    pub fn environment_speed(&self) -> f32 {
        self.environment_speed
    }

    /// Negative speeds run the animation backwards.
    pub fn set_environment_speed(&mut self, speed: f32) {
        self.environment_speed = speed;
    }

    // --- Accessors ---

    /// Current lifecycle phase.
    pub fn phase(&self) -> WorldPhase {
        self.phase
    }

    /// Present whenever the world is running.
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    /// Mutable form of [`World::camera`].
    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    /// Terrain mesh created at `start_up` and dropped on shutdown.
    pub fn terrain_mesh(&self) -> Option<&Mesh> {
        self.terrain_mesh.as_ref()
    }

    /// Mutable form of [`World::terrain_mesh`].
    pub fn terrain_mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.terrain_mesh.as_mut()
    }

    /// Engine settings the world was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `start_up` resets the debug text color and reads the window aspect.
    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    /// Name of the active game state, for logs and overlays.
    pub fn game_state_name(&self) -> Option<&str> {
        self.game_state.as_ref().map(|s| s.name())
    }

    /// Variable-rate frames completed.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Fixed steps completed.
    pub fn fixed_steps(&self) -> u64 {
        self.fixed_steps
    }
}
