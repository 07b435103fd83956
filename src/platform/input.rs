//! Pointer state with per-tick press/release edges
//!
//! Tick lifecycle: press()/release() as device events arrive → poll → end_tick()

/// Input polled once per tick
pub trait InputSource {
    /// Pointer went down since the last tick
    fn just_activated(&self) -> bool;
    /// Pointer went up since the last tick
    fn just_released(&self) -> bool;
    /// Pointer is down right now
    fn is_held(&self) -> bool;
}

/// Mouse / touch / key collapsed into a single pointer
#[derive(Debug, Clone, Default)]
pub struct PointerInput {
    down: bool,
    pressed_this_tick: bool,
    released_this_tick: bool,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self) {
        // Repeats while already down are not new edges
        if !self.down {
            self.down = true;
            self.pressed_this_tick = true;
        }
    }

    pub fn release(&mut self) {
        if self.down {
            self.down = false;
            self.released_this_tick = true;
        }
    }

    /// Clear edges once the tick has consumed them
    pub fn end_tick(&mut self) {
        self.pressed_this_tick = false;
        self.released_this_tick = false;
    }
}

impl InputSource for PointerInput {
    fn just_activated(&self) -> bool {
        self.pressed_this_tick
    }

    fn just_released(&self) -> bool {
        self.released_this_tick
    }

    fn is_held(&self) -> bool {
        self.down
    }
}
