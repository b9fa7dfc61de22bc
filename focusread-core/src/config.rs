//! Feature configuration
//!
//! A single explicit value passed into every engine call. There is no
//! shared mutable configuration: toggling a feature produces a new
//! [`FeatureFlags`] which the caller hands to the next pass.

use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// Independently toggleable features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Feature {
    /// Master switch gating every other feature
    Global,
    /// Bold the leading fraction of each word
    Bionic,
    /// Alternate sentence highlight classes
    Highlight,
    /// Per-block line gradient colouring
    Beeline,
    /// Horizontal reading ruler following the pointer
    Ruler,
    /// Extra letter and word spacing
    Spacing,
    /// Dim non-text media
    Focus,
}

impl Feature {
    /// Every feature, in declaration order
    pub const ALL: [Feature; 7] = [
        Feature::Global,
        Feature::Bionic,
        Feature::Highlight,
        Feature::Beeline,
        Feature::Ruler,
        Feature::Spacing,
        Feature::Focus,
    ];

    /// Lowercase name used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Global => "global",
            Feature::Bionic => "bionic",
            Feature::Highlight => "highlight",
            Feature::Beeline => "beeline",
            Feature::Ruler => "ruler",
            Feature::Spacing => "spacing",
            Feature::Focus => "focus",
        }
    }

    /// Whether changing this feature alters the styled text of a block.
    ///
    /// Ruler and focus only touch auxiliary elements.
    pub fn affects_text(&self) -> bool {
        matches!(
            self,
            Feature::Global
                | Feature::Bionic
                | Feature::Highlight
                | Feature::Beeline
                | Feature::Spacing
        )
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Feature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == wanted)
            .ok_or_else(|| CoreError::UnknownFeature(s.to_string()))
    }
}

/// Feature flags for one transformation pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct FeatureFlags {
    /// Master switch
    pub global: bool,
    /// Bionic emphasis
    pub bionic: bool,
    /// Sentence highlight cycling
    pub highlight: bool,
    /// Line gradient ("beeline") cycling
    pub beeline: bool,
    /// Reading ruler overlay
    pub ruler: bool,
    /// Extra spacing class
    pub spacing: bool,
    /// Media dimming
    pub focus: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            global: true,
            bionic: true,
            highlight: true,
            beeline: false,
            ruler: false,
            spacing: false,
            focus: false,
        }
    }
}

impl FeatureFlags {
    /// All features off
    pub fn none() -> Self {
        Self {
            global: false,
            bionic: false,
            highlight: false,
            beeline: false,
            ruler: false,
            spacing: false,
            focus: false,
        }
    }

    /// Raw value of a flag, ignoring the global gate
    pub fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Global => self.global,
            Feature::Bionic => self.bionic,
            Feature::Highlight => self.highlight,
            Feature::Beeline => self.beeline,
            Feature::Ruler => self.ruler,
            Feature::Spacing => self.spacing,
            Feature::Focus => self.focus,
        }
    }

    /// Set a flag in place
    pub fn set(&mut self, feature: Feature, value: bool) {
        let slot = match feature {
            Feature::Global => &mut self.global,
            Feature::Bionic => &mut self.bionic,
            Feature::Highlight => &mut self.highlight,
            Feature::Beeline => &mut self.beeline,
            Feature::Ruler => &mut self.ruler,
            Feature::Spacing => &mut self.spacing,
            Feature::Focus => &mut self.focus,
        };
        *slot = value;
    }

    /// Copy with one flag changed
    pub fn with(mut self, feature: Feature, value: bool) -> Self {
        self.set(feature, value);
        self
    }

    /// Whether a feature is in effect: its own flag and the global gate
    pub fn effective(&self, feature: Feature) -> bool {
        match feature {
            Feature::Global => self.global,
            other => self.global && self.get(other),
        }
    }

    /// Names of the flags currently set, in declaration order
    pub fn enabled_names(&self) -> Vec<&'static str> {
        Feature::ALL
            .into_iter()
            .filter(|feature| self.get(*feature))
            .map(|feature| feature.name())
            .collect()
    }
}
