//! Device-independent input sample handed to the camera once per update.

use std::fmt;

/// Abstract digital keys the core understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    /// Opens and closes the console overlay.
    Toggle,
}

impl Key {
    /// Every key, in bit order.
    pub const ALL: [Key; 7] = [
        Key::Forward,
        Key::Back,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Toggle,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of pressed [`Key`]s, stored as a bitmask.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeySet(u8);

impl KeySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        Key::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = Self::empty();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

impl fmt::Debug for KeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Pointer position in window client pixels plus the accumulated scroll value.
///
/// `scroll` only ever moves by whole wheel notches scaled by
/// [`SCROLL_UNITS_PER_LINE`](crate::SCROLL_UNITS_PER_LINE); consumers compare
/// it against the previous sample to find the wheel direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
    pub scroll: i32,
}

impl Pointer {
    pub const fn new(x: i32, y: i32, scroll: i32) -> Self {
        Self { x, y, scroll }
    }

    /// Same scroll value, different position.
    #[must_use]
    pub const fn moved_to(self, x: i32, y: i32) -> Self {
        Self { x, y, ..self }
    }
}

/// One frame of input. Absence of input is an empty key set and a repeated
/// pointer sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSample {
    pub pointer: Pointer,
    pub keys: KeySet,
}

impl InputSample {
    pub fn new(pointer: Pointer, keys: KeySet) -> Self {
        Self { pointer, keys }
    }

    /// No keys held, pointer resting at `pointer`.
    pub fn idle(pointer: Pointer) -> Self {
        Self {
            pointer,
            keys: KeySet::empty(),
        }
    }

    #[must_use]
    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(key)
    }
}
