//! Manager configuration.
//!
//! [`ManagerConfig`] gathers the behaviour switches of a dock manager and the
//! drop-zone thresholds used by the drop resolver. It is serde-serializable;
//! every field has a default, so partial JSON documents are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default minimum pointer travel, in pixels, that turns a caption press into
/// a drag.
pub const DEFAULT_DRAG_THRESHOLD: i32 = 4;

/// Default fraction of the managed window a new dock may take. `1.0` leaves
/// dock sizes unconstrained.
pub const DEFAULT_DOCK_CONSTRAINT: f64 = 1.0;

/// Thresholds of the drop-zone cascade, as fractions of the relevant extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropZoneTuning {
    /// Band on each side of a dock's thickness that opens a new row.
    pub row_edge_fraction: f64,
    /// Leading part of a hovered pane that inserts before it rather than
    /// after it.
    pub pane_before_fraction: f64,
    /// Band along the managed window's edge that opens a new outer dock.
    pub window_border_fraction: f64,
    /// Band along the center area's edge that opens a new inner row.
    pub center_edge_fraction: f64,
    /// Upper bound, in pixels, of the center edge band.
    pub center_edge_max_px: i32,
}

impl Default for DropZoneTuning {
    fn default() -> Self {
        Self {
            row_edge_fraction: 0.2,
            pane_before_fraction: 0.4,
            window_border_fraction: 0.1,
            center_edge_fraction: 0.2,
            center_edge_max_px: 40,
        }
    }
}

/// Behaviour switches of a dock manager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Panes may be dragged out into floating hosts.
    pub allow_floating: bool,
    /// Clicking a caption marks the pane active.
    pub allow_active_pane: bool,
    /// Sash drags relayout on every move instead of showing a hint.
    pub live_resize: bool,
    /// Hosts should render floating frames translucent while dragged.
    pub transparent_drag: bool,
    /// Hosts should fade the hint rectangle in.
    pub hint_fade: bool,
    pub dock_constraint_x: f64,
    pub dock_constraint_y: f64,
    pub drag_threshold: i32,
    pub drop: DropZoneTuning,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            allow_floating: true,
            allow_active_pane: false,
            live_resize: false,
            transparent_drag: true,
            hint_fade: true,
            dock_constraint_x: DEFAULT_DOCK_CONSTRAINT,
            dock_constraint_y: DEFAULT_DOCK_CONSTRAINT,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            drop: DropZoneTuning::default(),
        }
    }
}

impl ManagerConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Reject values outside their domain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("dock_constraint_x", self.dock_constraint_x)?;
        check_fraction("dock_constraint_y", self.dock_constraint_y)?;
        check_fraction("drop.row_edge_fraction", self.drop.row_edge_fraction)?;
        if self.drop.row_edge_fraction > 0.5 {
            return Err(ConfigError::OutOfRange {
                field: "drop.row_edge_fraction",
                value: self.drop.row_edge_fraction,
            });
        }
        check_fraction(
            "drop.pane_before_fraction",
            self.drop.pane_before_fraction,
        )?;
        check_fraction(
            "drop.window_border_fraction",
            self.drop.window_border_fraction,
        )?;
        check_fraction(
            "drop.center_edge_fraction",
            self.drop.center_edge_fraction,
        )?;
        if self.drag_threshold < 0 {
            return Err(ConfigError::NegativeThreshold {
                field: "drag_threshold",
                value: self.drag_threshold,
            });
        }
        if self.drop.center_edge_max_px < 0 {
            return Err(ConfigError::NegativeThreshold {
                field: "drop.center_edge_max_px",
                value: self.drop.center_edge_max_px,
            });
        }
        Ok(())
    }
}

fn check_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

/// Configuration load or validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Parse(String),
    OutOfRange { field: &'static str, value: f64 },
    NegativeThreshold { field: &'static str, value: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(reason) => write!(f, "invalid manager config: {reason}"),
            Self::OutOfRange { field, value } => {
                write!(f, "{field} must be within [0, 1] (got {value})")
            }
            Self::NegativeThreshold { field, value } => {
                write!(f, "{field} must be >= 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
