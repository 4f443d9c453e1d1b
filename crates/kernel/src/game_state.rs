use crate::world::World;

/// What the game is doing right now: a menu, a level, a cutscene.
///
/// The world owns exactly one active state and hands it `&mut World` on every
/// callback. Callbacks may spawn and destroy resources and may queue the next
/// state with [`World::set_next_game_state`], but calling
/// `World::start_up`/`shut_down`/`update`/`fixed_update` from inside a
/// callback is rejected with [`WorldError::Reentrant`](crate::WorldError).
pub trait GameState {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called last in `World::start_up`, once the world is fully built.
    fn start_up(&mut self, world: &mut World);

    /// Called first in `World::shut_down`, before any resource is released.
    fn shut_down(&mut self, world: &mut World);

    /// Once per rendered frame, before entities and camera advance.
    fn update(&mut self, world: &mut World, dt: f32);

    /// Zero or more times per frame at the fixed simulation rate.
    fn fixed_update(&mut self, world: &mut World, fixed_dt: f32);
}
