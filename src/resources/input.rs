//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems via the [`InputState`] resource. Every player owns one
//! [`DirectionKeys`] set: arrow keys for player 0, WASD for player 1, IJKL
//! for player 2 and the numeric keypad for player 3. Shared keys confirm a
//! new round, quit, and toggle the debug overlay.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was just released this frame.
    pub just_released: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    /// Inactive state bound to `key`.
    pub fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }

    /// Record this frame's hardware state.
    pub fn update(&mut self, down: bool, pressed: bool, released: bool) {
        self.active = down;
        self.just_pressed = pressed;
        self.just_released = released;
    }
}

/// Up/left/down/right bindings for one player.
#[derive(Debug, Clone, Copy)]
pub struct DirectionKeys {
    pub up: BoolState,
    pub left: BoolState,
    pub down: BoolState,
    pub right: BoolState,
}

impl DirectionKeys {
    pub fn new(up: KeyboardKey, left: KeyboardKey, down: KeyboardKey, right: KeyboardKey) -> Self {
        Self {
            up: BoolState::bound(up),
            left: BoolState::bound(left),
            down: BoolState::bound(down),
            right: BoolState::bound(right),
        }
    }

    /// Key set for input slot `slot`, `None` past the last supported slot.
    pub fn for_slot(slot: usize) -> Option<Self> {
        use KeyboardKey::*;
        match slot {
            0 => Some(Self::new(KEY_UP, KEY_LEFT, KEY_DOWN, KEY_RIGHT)),
            1 => Some(Self::new(KEY_W, KEY_A, KEY_S, KEY_D)),
            2 => Some(Self::new(KEY_I, KEY_J, KEY_K, KEY_L)),
            3 => Some(Self::new(KEY_KP_8, KEY_KP_4, KEY_KP_5, KEY_KP_6)),
            _ => None,
        }
    }

    /// Mutable access to the four states, for polling.
    pub fn states_mut(&mut self) -> [&mut BoolState; 4] {
        [&mut self.up, &mut self.left, &mut self.down, &mut self.right]
    }
}

/// Highest number of players that can share one keyboard.
pub const MAX_PLAYERS: usize = 4;

/// Resource capturing the per-frame keyboard state relevant to gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    /// Direction keys indexed by player slot.
    pub players: Vec<DirectionKeys>,
    /// Start a new round once all coins are gone (Enter).
    pub action_confirm: BoolState,
    /// Same as `action_confirm` (Space).
    pub action_confirm_alt: BoolState,
    /// Quit (Escape).
    pub action_back: BoolState,
    /// Toggle the debug overlay (F11).
    pub mode_debug: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self::for_players(2)
    }
}

impl InputState {
    /// Input state with key sets for `count` players, capped at [`MAX_PLAYERS`].
    pub fn for_players(count: usize) -> Self {
        Self {
            players: (0..count).filter_map(DirectionKeys::for_slot).collect(),
            action_confirm: BoolState::bound(KeyboardKey::KEY_ENTER),
            action_confirm_alt: BoolState::bound(KeyboardKey::KEY_SPACE),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }

    /// Direction keys of player `index`, if that slot exists.
    pub fn player(&self, index: usize) -> Option<&DirectionKeys> {
        self.players.get(index)
    }

    /// Either confirm key was pressed this frame.
    pub fn confirm_pressed(&self) -> bool {
        self.action_confirm.just_pressed || self.action_confirm_alt.just_pressed
    }
}
