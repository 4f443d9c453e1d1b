//! Entity storage.
//!
//! Entities live in a slot arena. Removing one clears its slot and pushes the
//! index onto a free list; no other slot moves, so handles to the remaining
//! entities stay valid. Each slot carries a generation so a handle to a
//! removed entity never resolves to whatever reuses the slot.

/// A simulation object owned by the world, advanced once per frame.
pub trait Entity {
    /// Advance by one variable-rate frame.
    fn update(&mut self, dt: f32);

    /// Release everything the entity owns. Called exactly once, right before
    /// the entity is dropped.
    fn destroy(&mut self);
}

/// Handle to an entity in an [`EntityArena`].
///
/// Lower 32 bits index the slot, upper 32 bits hold the slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct EntityHandle(u64);

impl EntityHandle {
    /// A handle that never refers to anything.
    pub const NULL: Self = Self(u64::MAX);

    #[inline]
    const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    #[inline]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityHandle {
    fn default() -> Self {
        Self::NULL
    }
}

struct Slot {
    generation: u32,
    entity: Option<Box<dyn Entity>>,
}

/// Owning arena of boxed entities with a free list of vacant slots.
#[derive(Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    live: usize,
}

impl std::fmt::Debug for EntityArena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityArena")
            .field("slots", &self.slots.len())
            .field("free", &self.free.len())
            .field("live", &self.live)
            .finish()
    }
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for at least `capacity` slots in total.
    pub fn reserve(&mut self, capacity: usize) {
        self.slots
            .reserve(capacity.saturating_sub(self.slots.len()));
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Store an entity, reusing the most recently freed slot if there is one.
    pub fn insert(&mut self, entity: Box<dyn Entity>) -> EntityHandle {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return EntityHandle::new(index, slot.generation);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        EntityHandle::new(index, 0)
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.slot(handle).is_some()
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&dyn Entity> {
        self.slot(handle).and_then(|s| s.entity.as_deref())
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut (dyn Entity + 'static)> {
        if !self.contains(handle) {
            return None;
        }
        self.slots[handle.index() as usize].entity.as_deref_mut()
    }

    /// Take an entity out of the arena. The slot is tombstoned and its
    /// generation bumped; stale and null handles return `None`.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Box<dyn Entity>> {
        if !self.contains(handle) {
            return None;
        }
        let index = handle.index();
        let slot = &mut self.slots[index as usize];
        let entity = slot.entity.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
        self.live -= 1;
        entity
    }

    /// Live entities in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut (dyn Entity + 'static)> + '_ {
        self.slots.iter_mut().filter_map(|s| s.entity.as_deref_mut())
    }

    /// Live handles in slot order.
    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.entity
                .as_ref()
                .map(|_| EntityHandle::new(i as u32, s.generation))
        })
    }

    /// Remove every entity, handing each to `f`. Slots are kept and their
    /// generations bumped, so handles issued before the clear stay stale.
    pub fn clear_with(&mut self, mut f: impl FnMut(Box<dyn Entity>)) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            if let Some(entity) = slot.entity.take() {
                slot.generation = slot.generation.wrapping_add(1);
                f(entity);
            }
            self.free.push(index as u32);
        }
        self.live = 0;
    }

    fn slot(&self, handle: EntityHandle) -> Option<&Slot> {
        if handle.is_null() {
            return None;
        }
        self.slots
            .get(handle.index() as usize)
            .filter(|s| s.generation == handle.generation() && s.entity.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Entity for Tracked {
        fn update(&mut self, _dt: f32) {
            self.log.borrow_mut().push(format!("{}:update", self.name));
        }

        fn destroy(&mut self) {
            self.log.borrow_mut().push(format!("{}:destroy", self.name));
        }
    }

    fn tracked(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Entity> {
        Box::new(Tracked {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn insert_and_remove() {
        let log = Rc::default();
        let mut arena = EntityArena::new();
        let a = arena.insert(tracked("a", &log));
        assert_eq!(arena.len(), 1);
        assert!(arena.contains(a));

        assert!(arena.remove(a).is_some());
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
    }

    #[test]
    fn null_and_stale_handles_resolve_to_nothing() {
        let log = Rc::default();
        let mut arena = EntityArena::new();
        assert!(arena.remove(EntityHandle::NULL).is_none());

        let a = arena.insert(tracked("a", &log));
        arena.remove(a);
        assert!(arena.remove(a).is_none());
        assert!(arena.get(a).is_none());
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slot_is_reused_with_new_generation() {
        let log = Rc::default();
        let mut arena = EntityArena::new();
        let a = arena.insert(tracked("a", &log));
        arena.remove(a);
        let b = arena.insert(tracked("b", &log));

        assert_eq!(a.index(), b.index());
        assert_ne!(a.generation(), b.generation());
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
    }

    #[test]
    fn removal_does_not_move_other_entities() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut arena = EntityArena::new();
        let a = arena.insert(tracked("a", &log));
        let b = arena.insert(tracked("b", &log));
        let c = arena.insert(tracked("c", &log));

        arena.remove(b);
        assert!(arena.contains(a));
        assert!(arena.contains(c));
        assert_eq!(c.index(), 2);

        for e in arena.iter_mut() {
            e.update(0.0);
        }
        assert_eq!(*log.borrow(), vec!["a:update", "c:update"]);
        assert_eq!(arena.handles().collect::<Vec<_>>(), vec![a, c]);
    }

    #[test]
    fn clear_invalidates_old_handles() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut arena = EntityArena::new();
        let a = arena.insert(tracked("a", &log));
        let b = arena.insert(tracked("b", &log));

        let mut destroyed = 0;
        arena.clear_with(|mut e| {
            e.destroy();
            destroyed += 1;
        });
        assert_eq!(destroyed, 2);
        assert!(arena.is_empty());
        assert!(!arena.contains(a));
        assert!(!arena.contains(b));

        // Lowest slot is handed out first after a clear.
        let c = arena.insert(tracked("c", &log));
        assert_eq!(c.index(), 0);
        assert_ne!(c, a);
    }

    #[test]
    fn reserve_presizes() {
        let mut arena = EntityArena::new();
        arena.reserve(64);
        assert!(arena.capacity() >= 64);
    }
}
