//! Pointer input component
//!
//! The host hands the current pointer to every input component through
//! [`World::dispatch_pointer`](crate::ecs::World::dispatch_pointer). During
//! the next update each component hit-tests it against the node's hitbox and
//! fires its signals on transitions.

use crate::ecs::component_manager::Siblings;
use crate::ecs::{Component, ComponentBase, NamedComponent};
use crate::events::Signal;

use super::bounds::hitbox_of;

/// Pointer location and button state in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
    /// Primary button held
    pub is_down: bool,
}

impl PointerState {
    /// Pointer at `(x, y)`
    pub const fn new(x: f64, y: f64, is_down: bool) -> Self {
        Self { x, y, is_down }
    }
}

/// Pointer hit-testing for a node
#[derive(Debug)]
pub struct Input {
    base: ComponentBase,
    enabled: bool,
    pointer: Option<PointerState>,
    within_bounds: bool,
    is_down: bool,
    /// Pointer moved onto the hitbox
    pub on_entered: Signal<PointerState>,
    /// Pointer moved off the hitbox
    pub on_left: Signal<PointerState>,
    /// Button pressed over the hitbox
    pub on_down: Signal<PointerState>,
    /// Button released after a press on the hitbox
    pub on_up: Signal<PointerState>,
}

impl Input {
    /// Enabled input component
    pub fn new() -> Self {
        Self {
            base: ComponentBase::new(Self::NAME),
            enabled: true,
            pointer: None,
            within_bounds: false,
            is_down: false,
            on_entered: Signal::new(),
            on_left: Signal::new(),
            on_down: Signal::new(),
            on_up: Signal::new(),
        }
    }

    /// Whether hit-testing runs
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable hit-testing; disabling forgets the pressed state
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.within_bounds = false;
            self.is_down = false;
        }
    }

    /// Latest pointer
    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = Some(pointer);
    }

    /// Whether the pointer is over the hitbox
    pub fn within_bounds(&self) -> bool {
        self.within_bounds
    }

    /// Whether a press that started on the hitbox is still held
    pub fn is_down(&self) -> bool {
        self.is_down
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Input {
    crate::impl_component_base!(base);

    fn update(&mut self, siblings: &mut Siblings<'_>) {
        if !self.enabled {
            return;
        }
        let (Some(pointer), Some(hitbox)) = (self.pointer, hitbox_of(&*siblings)) else {
            return;
        };

        let inside = hitbox.contains_point(pointer.x, pointer.y);
        if inside != self.within_bounds {
            self.within_bounds = inside;
            if inside {
                self.on_entered.dispatch(pointer);
            } else {
                self.on_left.dispatch(pointer);
            }
        }

        if inside && pointer.is_down && !self.is_down {
            self.is_down = true;
            self.on_down.dispatch(pointer);
        } else if self.is_down && !pointer.is_down {
            self.is_down = false;
            self.on_up.dispatch(pointer);
        }
    }

    fn destroy(&mut self) {
        self.on_entered.dispose();
        self.on_left.dispose();
        self.on_down.dispose();
        self.on_up.dispose();
        self.base.destroy();
    }
}

impl NamedComponent for Input {
    const NAME: &'static str = "Input";
}
