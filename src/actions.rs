//! The action dispatcher: maps symbolic action names from scripts to
//! side-effecting handlers.
//!
//! The registry is a string-key → handler table, open for extension without
//! touching the dispatcher itself. Unrecognized names fall through to a
//! generic hook that never fails.

use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::events::{ActionTriggered, CustomAction, ItemGranted};
use crate::talker::Prop;

/// A side-effecting action handler with full world access.
pub type ActionHandler = Box<dyn Fn(&mut World) + Send + Sync + 'static>;

/// The registered-handler table consulted for every dispatched action name.
///
/// The plugin pre-registers `OpenDoor`, `CloseDoor` and `GiveItem`; hosts may
/// register their own handlers (or replace the built-ins) at any time.
#[derive(Resource, Default)]
pub struct ActionRegistry {
    /// Handlers by action name.
    handlers: HashMap<String, ActionHandler>,
}

impl ActionRegistry {
    /// Registers (or replaces) the handler for `name`.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&mut World) + Send + Sync + 'static,
    ) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Whether a handler is registered for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

/// The two door prop references toggled by the built-in door handlers.
///
/// Injected at configuration time instead of looked up by name at runtime; a
/// missing or despawned reference downgrades that half of the swap to a
/// logged warning.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DoorProps {
    /// The closed-door prop, active while the door is shut.
    pub closed: Option<Entity>,
    /// The opened-door prop, active while the door is open.
    pub opened: Option<Entity>,
}

/// Drains this tick's triggered actions and runs their handlers.
///
/// Names with no registered handler are recorded through the generic
/// [`CustomAction`] hook for an external system to interpret; dispatch itself
/// never fails.
pub(crate) fn dispatch_actions(world: &mut World) {
    let triggered: Vec<ActionTriggered> = world
        .resource_mut::<Events<ActionTriggered>>()
        .drain()
        .collect();
    for event in triggered {
        let registered = world.resource::<ActionRegistry>().contains(&event.name);
        if registered {
            let registry = world.remove_resource::<ActionRegistry>();
            if let Some(registry) = registry {
                if let Some(handler) = registry.handlers.get(&event.name) {
                    handler(world);
                }
                world.insert_resource(registry);
            }
        } else {
            info!("custom action triggered: {}", event.name);
            world.send_event(CustomAction { name: event.name });
        }
    }
}

/// Built-in `OpenDoor`: hides the closed prop, shows the opened one.
pub(crate) fn open_door(world: &mut World) {
    info!("OpenDoor action executed");
    set_door(world, false);
}

/// Built-in `CloseDoor`: shows the closed prop, hides the opened one.
pub(crate) fn close_door(world: &mut World) {
    set_door(world, true);
}

/// Built-in `GiveItem`: records the grant for the host to interpret.
pub(crate) fn give_item(world: &mut World) {
    info!("item granted to player");
    world.send_event(ItemGranted);
}

/// Moves the door props to `closed`/`!closed`. Each missing reference is a
/// recoverable warning, never a crash.
fn set_door(world: &mut World, closed: bool) {
    let doors = *world.resource::<DoorProps>();
    set_prop(world, doors.closed, closed, "closed-door");
    set_prop(world, doors.opened, !closed, "opened-door");
}

/// Sets one prop's active flag, warning when the reference is absent.
fn set_prop(world: &mut World, target: Option<Entity>, active: bool, label: &str) {
    match target.and_then(|entity| world.get_mut::<Prop>(entity)) {
        Some(mut prop) => prop.active = active,
        None => warn!("{label} prop not wired, door action skipped for it"),
    }
}
