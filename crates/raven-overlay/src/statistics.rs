//! Ordered label/value text block shown as a frame overlay.

use std::fmt::Write;

use glam::Vec3;

/// Up to three decimals with trailing zeros removed: `1.5`, `0.333`, `10`.
pub fn format_decimal(value: f64) -> String {
    let mut s = format!("{value:.3}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// `(x, y, z)` with [`format_decimal`] components.
pub fn format_vec3(v: Vec3) -> String {
    format!(
        "({}, {}, {})",
        format_decimal(f64::from(v.x)),
        format_decimal(f64::from(v.y)),
        format_decimal(f64::from(v.z))
    )
}

/// Statistics in insertion order. Setting an existing label replaces its
/// value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    entries: Vec<(String, String)>,
}

impl Statistics {
    /// An empty set of statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value shown for `label`.
    pub fn set(&mut self, label: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(l, _)| l == label) {
            Some((_, v)) => *v = value,
            None => self.entries.push((label.to_string(), value)),
        }
    }

    /// Current value for `label`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    /// Remove `label`, returning its value.
    pub fn remove(&mut self, label: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(idx).1)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// One `label: value` line per entry.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for (i, (label, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(out, "{label}: {value}");
        }
        out
    }

    /// All entries on one line, separated by `" | "`. Used for window titles.
    pub fn single_line(&self) -> String {
        self.entries
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_decimal_trims() {
        assert_eq!(format_decimal(1.5), "1.5");
        assert_eq!(format_decimal(10.0), "10");
        assert_eq!(format_decimal(1.0 / 3.0), "0.333");
        assert_eq!(format_decimal(2.0006), "2.001");
        assert_eq!(format_decimal(-0.0001), "0");
        assert_eq!(format_decimal(-25.783), "-25.783");
    }

    #[test]
    fn test_format_vec3() {
        assert_eq!(format_vec3(Vec3::new(0.0, 0.0, 10.0)), "(0, 0, 10)");
        assert_eq!(format_vec3(Vec3::new(-0.25, 1.5, 9.75)), "(-0.25, 1.5, 9.75)");
    }

    #[test]
    fn test_insertion_order_kept_on_update() {
        let mut stats = Statistics::new();
        stats.set("Position", "(0, 0, 10)");
        stats.set("Yaw", "0");
        stats.set("Pitch", "0");
        stats.set("Position", "(0, 0, 9.75)");
        assert_eq!(stats.text(), "Position: (0, 0, 9.75)\nYaw: 0\nPitch: 0");
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_get_and_remove() {
        let mut stats = Statistics::new();
        stats.set("Yaw", "25.783");
        assert_eq!(stats.get("Yaw"), Some("25.783"));
        assert_eq!(stats.remove("Yaw").as_deref(), Some("25.783"));
        assert!(stats.get("Yaw").is_none());
        assert!(stats.is_empty());
    }

    #[test]
    fn test_single_line() {
        let mut stats = Statistics::new();
        stats.set("Yaw", "1");
        stats.set("Pitch", "2");
        assert_eq!(stats.single_line(), "Yaw: 1 | Pitch: 2");
        assert_eq!(Statistics::new().text(), "");
    }
}
