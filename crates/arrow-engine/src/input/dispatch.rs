//! Event registry: key-down edges, held-key repeats, and player death.
//!
//! Click handlers are not stored here; they live on the blocks themselves.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::error::LogicWarning;
use crate::api::types::KeyCode;
use crate::core::commands::Commands;
use crate::input::queue::KeyState;

/// A zero-argument gameplay callback. World changes go through `Commands`.
pub type Callback = Box<dyn FnMut(&mut Commands)>;

/// Maps input signals and gameplay events to callbacks.
#[derive(Default)]
pub struct EventDispatcher {
    key_down: HashMap<KeyCode, Vec<Callback>>,
    /// One callback per key, kept in first-registration order.
    held: Vec<(KeyCode, Callback)>,
    player_death: Vec<Callback>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge-triggered callback for `key`.
    pub fn on_key_down(&mut self, key: KeyCode, callback: impl FnMut(&mut Commands) + 'static) {
        self.key_down
            .entry(key)
            .or_default()
            .push(Box::new(callback));
    }

    /// Set the callback run every tick `key` is held, replacing any earlier one.
    pub fn on_held_repeat(&mut self, key: KeyCode, callback: impl FnMut(&mut Commands) + 'static) {
        let callback: Callback = Box::new(callback);
        match self.held.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = callback,
            None => self.held.push((key, callback)),
        }
    }

    /// Register `callback` for key-down and, when `repeat` is set, also as the
    /// held-repeat callback for the same key. Both registrations share state.
    pub fn bind_key(
        &mut self,
        key: KeyCode,
        repeat: bool,
        callback: impl FnMut(&mut Commands) + 'static,
    ) {
        if !repeat {
            self.on_key_down(key, callback);
            return;
        }
        let shared = Rc::new(RefCell::new(callback));
        let edge = Rc::clone(&shared);
        self.on_key_down(key, move |commands| (*edge.borrow_mut())(commands));
        self.on_held_repeat(key, move |commands| (*shared.borrow_mut())(commands));
    }

    /// Append a callback run once per death transition.
    pub fn on_player_death(&mut self, callback: impl FnMut(&mut Commands) + 'static) {
        self.player_death.push(Box::new(callback));
    }

    pub fn has_key_down(&self, key: KeyCode) -> bool {
        self.key_down.get(&key).is_some_and(|list| !list.is_empty())
    }

    /// Fire every key-down callback for `key` in registration order.
    /// Returns how many ran.
    pub fn fire_key_down(&mut self, key: KeyCode, commands: &mut Commands) -> usize {
        let Some(callbacks) = self.key_down.get_mut(&key) else {
            LogicWarning::UnboundKey(key).report();
            return 0;
        };
        for callback in callbacks.iter_mut() {
            callback(commands);
        }
        callbacks.len()
    }

    /// Fire the repeat callback of every currently held key.
    pub fn fire_held(&mut self, keys: &KeyState, commands: &mut Commands) -> usize {
        let mut fired = 0;
        for (key, callback) in self.held.iter_mut() {
            if keys.is_held(*key) {
                callback(commands);
                fired += 1;
            }
        }
        fired
    }

    /// Fire every death callback in registration order.
    pub fn fire_player_death(&mut self, commands: &mut Commands) {
        for callback in self.player_death.iter_mut() {
            callback(commands);
        }
    }

    pub fn clear(&mut self) {
        self.key_down.clear();
        self.held.clear();
        self.player_death.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, impl FnMut(&mut Commands) + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move |_: &mut Commands| inner.set(inner.get() + 1))
    }

    #[test]
    fn key_down_fires_in_registration_order() {
        let mut events = EventDispatcher::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for n in 0..3 {
            let order = Rc::clone(&order);
            events.on_key_down(KeyCode::SPACE, move |_| order.borrow_mut().push(n));
        }
        let mut commands = Commands::new();
        assert_eq!(events.fire_key_down(KeyCode::SPACE, &mut commands), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn unbound_key_is_a_no_op() {
        let mut events = EventDispatcher::new();
        let mut commands = Commands::new();
        assert_eq!(events.fire_key_down(KeyCode(12345), &mut commands), 0);
        assert!(commands.is_empty());
    }

    #[test]
    fn held_repeat_overwrites_and_fires_while_held() {
        let mut events = EventDispatcher::new();
        let (first, cb1) = counter();
        let (second, cb2) = counter();
        events.on_held_repeat(KeyCode::UP, cb1);
        events.on_held_repeat(KeyCode::UP, cb2);

        let mut commands = Commands::new();
        let held: KeyState = [KeyCode::UP].into_iter().collect();
        events.fire_held(&held, &mut commands);
        events.fire_held(&held, &mut commands);
        events.fire_held(&KeyState::new(), &mut commands);

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn bind_key_with_repeat_registers_both() {
        let mut events = EventDispatcher::new();
        let (count, cb) = counter();
        events.bind_key(KeyCode::SPACE, true, cb);

        let mut commands = Commands::new();
        events.fire_key_down(KeyCode::SPACE, &mut commands);
        let held: KeyState = [KeyCode::SPACE].into_iter().collect();
        events.fire_held(&held, &mut commands);
        assert_eq!(count.get(), 2);
        assert!(events.has_key_down(KeyCode::SPACE));
    }
}
