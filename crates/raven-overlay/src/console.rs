//! Variable console overlay.
//!
//! The console only stores variables and an output history. Evaluating
//! commands is left to whatever runtime the host attaches.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::value::Value;

/// Named variable storage shared between the host and a console runtime.
pub trait VariableScope {
    fn get(&self, name: &str) -> Option<Value>;

    /// Stores `value` under `name`, returning the previous value.
    fn set(&mut self, name: &str, value: Value) -> Option<Value>;
}

/// Default [`VariableScope`], ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    vars: BTreeMap<String, Value>,
}

impl Scope {
    /// An empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `name`, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Variable names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// True when no variable is set.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl VariableScope for Scope {
    fn get(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.vars.insert(name.to_string(), value)
    }
}

/// Screen-space rectangle in pixels, origin top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverlayRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

const DEFAULT_HISTORY: usize = 64;

#[derive(Debug, Clone)]
pub struct Console {
    enabled: bool,
    scope: Scope,
    history: VecDeque<String>,
    capacity: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    /// A closed console with an empty scope.
    pub fn new() -> Self {
        Self::with_history(DEFAULT_HISTORY)
    }

    /// Keeps at most `capacity` output lines (at least one).
    pub fn with_history(capacity: usize) -> Self {
        Self {
            enabled: false,
            scope: Scope::new(),
            history: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Whether the console is open.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Open or close the console.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            debug!("Console {}", if enabled { "opened" } else { "closed" });
        }
        self.enabled = enabled;
    }

    /// Flip open/closed and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Variables visible to the console.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Mutable access to the console variables.
    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    /// Append an output line, dropping the oldest beyond capacity.
    pub fn print(&mut self, line: impl Into<String>) {
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(line.into());
    }

    /// Output lines, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Drop all output lines.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Backdrop area: full width, top third of the window.
    pub fn overlay_rect(width: u32, height: u32) -> OverlayRect {
        OverlayRect {
            x: 0,
            y: 0,
            width,
            height: height / 3,
        }
    }
}

impl VariableScope for Console {
    fn get(&self, name: &str) -> Option<Value> {
        self.scope.get(name)
    }

    fn set(&mut self, name: &str, value: Value) -> Option<Value> {
        self.scope.set(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_console_starts_closed() {
        let console = Console::new();
        assert!(!console.is_enabled());
        assert!(console.scope().is_empty());
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut console = Console::new();
        assert!(console.toggle());
        assert!(console.is_enabled());
        assert!(!console.toggle());
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut console = Console::new();
        assert_eq!(console.set("speed", Value::Float(0.25)), None);
        let prev = console.set("speed", Value::Float(0.5));
        assert_eq!(prev, Some(Value::Float(0.25)));
        assert_eq!(console.get("speed"), Some(Value::Float(0.5)));
        assert_eq!(console.get("missing"), None);
    }

    #[test]
    fn test_scope_names_sorted() {
        let mut scope = Scope::new();
        scope.set("position", Value::Vec3(Vec3::ZERO));
        scope.set("camera_enabled", Value::Bool(true));
        let names: Vec<&str> = scope.names().collect();
        assert_eq!(names, vec!["camera_enabled", "position"]);
        assert!(scope.remove("position").is_some());
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut console = Console::with_history(2);
        console.print("a");
        console.print("b");
        console.print("c");
        let lines: Vec<&str> = console.history().collect();
        assert_eq!(lines, vec!["b", "c"]);
        console.clear_history();
        assert_eq!(console.history().count(), 0);
    }

    #[test]
    fn test_overlay_is_top_third() {
        let rect = Console::overlay_rect(1280, 720);
        assert_eq!(
            rect,
            OverlayRect {
                x: 0,
                y: 0,
                width: 1280,
                height: 240
            }
        );
    }
}
