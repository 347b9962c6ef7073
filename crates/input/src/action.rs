use std::collections::BTreeMap;

/// A high-level action produced by the demo's key bindings.
///
/// Camera and tour state consume actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Walk the free camera forward.
    MoveForward,
    /// Walk the free camera backward.
    MoveBackward,
    /// Strafe the free camera left.
    MoveLeft,
    /// Strafe the free camera right.
    MoveRight,
    /// Flip between free-look and the follow camera.
    ToggleFollow,
    /// Teleport to the next waypoint.
    NextWaypoint,
    /// Teleport to the previous waypoint.
    PrevWaypoint,
    /// Teleport to the first waypoint.
    FirstWaypoint,
    /// Reset the camera to its spawn pose.
    ResetCamera,
}

/// Maps printable keys to actions.
///
/// The default bindings are the demo's: `w`/`s`/`a`/`d` move, `1` toggles
/// the follow camera, `e`/`q` step to the next/previous waypoint, `0` jumps
/// to the first waypoint, `r` resets the camera.
#[derive(Debug, Clone)]
pub struct Keymap {
    bindings: BTreeMap<char, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        let mut map = Self {
            bindings: BTreeMap::new(),
        };
        map.bind('w', Action::MoveForward);
        map.bind('s', Action::MoveBackward);
        map.bind('a', Action::MoveLeft);
        map.bind('d', Action::MoveRight);
        map.bind('1', Action::ToggleFollow);
        map.bind('e', Action::NextWaypoint);
        map.bind('q', Action::PrevWaypoint);
        map.bind('0', Action::FirstWaypoint);
        map.bind('r', Action::ResetCamera);
        map
    }
}

impl Keymap {
    /// A keymap with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Binds `key` to `action`, replacing any previous binding.
    pub fn bind(&mut self, key: char, action: Action) {
        if let Some(previous) = self.bindings.insert(key, action) {
            tracing::debug!(%key, ?previous, ?action, "rebound key");
        }
    }

    /// The action bound to `key`, if any.
    pub fn action(&self, key: char) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// All bindings in key order.
    pub fn bindings(&self) -> impl Iterator<Item = (char, Action)> + '_ {
        self.bindings.iter().map(|(k, a)| (*k, *a))
    }
}

/// Steps the discrete waypoint pointer, wrapping at either end.
///
/// `direction` is +1 for the next waypoint and -1 for the previous one;
/// larger steps work too. Returns `current` unchanged when `count` is 0.
pub fn step_waypoint(current: usize, count: usize, direction: i32) -> usize {
    if count == 0 {
        return current;
    }
    let n = count as i64;
    (((current as i64 + direction as i64) % n + n) % n) as usize
}
