//! Condition Labeling
//!
//! Maps a folder or file name to a binary condition label using naming
//! heuristics: 0 = normal, 1 = fault.

use serde::{Deserialize, Serialize};

/// Label value for the normal condition.
pub const LABEL_NORMAL: u8 = 0;
/// Label value for the fault condition.
pub const LABEL_FAULT: u8 = 1;

/// Substrings that mark a fault condition.
const FAULT_MARKERS: [&str; 4] = ["fault", "crack", "erosion", "unbalance"];

/// How the healthy-state `"h"` code is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// `"h"` matches anywhere in the name. This is the legacy rule; it is
    /// overly broad (almost any name containing the letter matches) but is
    /// the default for output compatibility.
    #[default]
    Substring,
    /// `"h"` must be a whole token, delimited by non-alphanumeric
    /// characters or string boundaries.
    TokenBoundary,
}

/// Label a condition or file name with the default (legacy) policy.
pub fn label(name: &str) -> u8 {
    label_with_policy(name, LabelPolicy::Substring)
}

/// Label a condition or file name under an explicit policy.
///
/// The name is lower-cased first. A normal marker (`"normal"`, or the
/// healthy-state `"h"` code) wins over any fault marker; names matching
/// neither default to normal.
pub fn label_with_policy(name: &str, policy: LabelPolicy) -> u8 {
    let name = name.to_lowercase();

    let healthy_code = match policy {
        LabelPolicy::Substring => name.contains('h'),
        LabelPolicy::TokenBoundary => name
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == "h"),
    };
    if name.contains("normal") || healthy_code {
        return LABEL_NORMAL;
    }
    if FAULT_MARKERS.iter().any(|m| name.contains(m)) {
        return LABEL_FAULT;
    }
    LABEL_NORMAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_markers() {
        assert_eq!(label("Bearing_Fault_1"), LABEL_FAULT);
        assert_eq!(label("Unbalance_3"), LABEL_FAULT);
        assert_eq!(label("blade_erosion_02"), LABEL_FAULT);
        assert_eq!(label("crack_a"), LABEL_FAULT);
    }

    #[test]
    fn test_normal_markers() {
        assert_eq!(label("H_Normal_0"), LABEL_NORMAL);
        assert_eq!(label("97_Normal_0"), LABEL_NORMAL);
        assert_eq!(label("H1"), LABEL_NORMAL);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(label("Misc_X"), LABEL_NORMAL);
        assert_eq!(label(""), LABEL_NORMAL);
    }

    #[test]
    fn test_substring_h_overrides_fault_marker() {
        // Legacy rule: the "h" wins even inside an otherwise faulty name
        assert_eq!(label("Shaft_Crack_1"), LABEL_NORMAL);
        assert_eq!(
            label_with_policy("Shaft_Crack_1", LabelPolicy::TokenBoundary),
            LABEL_FAULT
        );
    }

    #[test]
    fn test_token_boundary_requires_standalone_h() {
        assert_eq!(
            label_with_policy("H_2", LabelPolicy::TokenBoundary),
            LABEL_NORMAL
        );
        assert_eq!(
            label_with_policy("crash_2", LabelPolicy::TokenBoundary),
            LABEL_NORMAL // no fault marker, defaults to normal
        );
        assert_eq!(
            label_with_policy("unbalance_h2", LabelPolicy::TokenBoundary),
            LABEL_FAULT // "h2" is not the bare code
        );
    }
}
