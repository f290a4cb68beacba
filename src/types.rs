// Strong typing over strings. Newtypes for time and pixel units, config passed from JS.
// Every config struct deserializes from partial JSON; missing fields take the tuned defaults.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds, as reported by `performance.now()` / rAF callbacks.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
pub struct Millis(f64);

impl Millis {
    pub fn new(ms: f64) -> Self {
        Millis(ms)
    }

    pub fn as_f64(&self) -> f64 {
        self.0
    }

    /// Time elapsed since `earlier`, saturating at zero.
    pub fn since(&self, earlier: Millis) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn after(&self, ms: f64) -> Millis {
        Millis(self.0 + ms)
    }
}

/// Live window size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    /// True when there is no area to cover or track.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
    }
}

/// Horizontal scroll direction of a marquee row. Serialized as -1 / +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Direction {
    /// Content moves toward negative x.
    Left,
    /// Content moves toward positive x.
    Right,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

impl TryFrom<i8> for Direction {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(format!("direction must be -1 or 1, got {}", other)),
        }
    }
}

impl From<Direction> for i8 {
    fn from(d: Direction) -> i8 {
        match d {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Final 2-D offset of a row, applied as `translate3d(x, y, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RowOffset {
    pub x: f64,
    pub y: f64,
}

impl RowOffset {
    pub fn to_css(&self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// 3-D tilt applied to the poster wall container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub scale: f64,
    pub perspective_px: f64,
}

impl Tilt {
    pub fn to_css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            self.perspective_px, self.rotate_x_deg, self.rotate_y_deg, self.scale
        )
    }
}

/// Poster wall configuration. One instance per page; pages differ only in these numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Pixels added on every side of the viewport before tiling.
    #[serde(default = "default_overscan")]
    pub overscan: f64,
    /// Multiplier for the overscanned area (3-D rotation and zoom).
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    /// Extra columns and rows absorbing rounding and rotated corners.
    #[serde(default = "default_safety_margin")]
    pub safety_margin: u32,
    #[serde(default = "default_tile_width")]
    pub tile_width: f64,
    #[serde(default = "default_tile_height")]
    pub tile_height: f64,
    /// Genres pooled into the wall.
    #[serde(default = "default_wall_genres")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub tilt: TiltSettings,
    /// Quiet period before a resize rebuilds the wall.
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: f64,
}

impl Default for WallConfig {
    fn default() -> Self {
        WallConfig {
            overscan: default_overscan(),
            scale_factor: default_scale_factor(),
            safety_margin: default_safety_margin(),
            tile_width: default_tile_width(),
            tile_height: default_tile_height(),
            genres: default_wall_genres(),
            tilt: TiltSettings::default(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }
}

fn default_overscan() -> f64 {
    600.0
}

fn default_scale_factor() -> f64 {
    1.3
}

fn default_safety_margin() -> u32 {
    10
}

fn default_tile_width() -> f64 {
    150.0
}

fn default_tile_height() -> f64 {
    225.0
}

fn default_wall_genres() -> Vec<String> {
    vec!["drama".into(), "comedy".into(), "sci-fi".into()]
}

fn default_resize_debounce_ms() -> f64 {
    250.0
}

/// Pointer-driven tilt gains for the poster wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TiltSettings {
    /// Degrees of rotateY at the horizontal edge.
    #[serde(default = "default_yaw_gain")]
    pub yaw_gain: f64,
    /// Degrees of rotateX at the vertical edge.
    #[serde(default = "default_pitch_gain")]
    pub pitch_gain: f64,
    #[serde(default = "default_tilt_scale")]
    pub scale: f64,
    #[serde(default = "default_perspective")]
    pub perspective_px: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        TiltSettings {
            yaw_gain: default_yaw_gain(),
            pitch_gain: default_pitch_gain(),
            scale: default_tilt_scale(),
            perspective_px: default_perspective(),
        }
    }
}

fn default_yaw_gain() -> f64 {
    18.0
}

fn default_pitch_gain() -> f64 {
    14.0
}

fn default_tilt_scale() -> f64 {
    1.2
}

fn default_perspective() -> f64 {
    1500.0
}

/// Landing-page marquee configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarqueeConfig {
    #[serde(default = "default_rows")]
    pub rows: Vec<RowConfig>,
    /// Vertical parallax relative to horizontal (less than 1).
    #[serde(default = "default_vertical_damping")]
    pub vertical_damping: f64,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        MarqueeConfig {
            rows: default_rows(),
            vertical_damping: default_vertical_damping(),
        }
    }
}

/// One marquee track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowConfig {
    pub genre: String,
    pub direction: Direction,
    #[serde(default = "default_row_speed")]
    pub speed: f64,
    #[serde(default = "default_depth_weight")]
    pub depth_weight: f64,
}

fn default_rows() -> Vec<RowConfig> {
    vec![
        RowConfig {
            genre: "action".into(),
            direction: Direction::Left,
            speed: default_row_speed(),
            depth_weight: 3.0,
        },
        RowConfig {
            genre: "horror".into(),
            direction: Direction::Right,
            speed: default_row_speed(),
            depth_weight: 4.0,
        },
        RowConfig {
            genre: "romance".into(),
            direction: Direction::Left,
            speed: default_row_speed(),
            depth_weight: 5.0,
        },
    ]
}

fn default_row_speed() -> f64 {
    0.18
}

fn default_depth_weight() -> f64 {
    4.0
}

fn default_vertical_damping() -> f64 {
    0.2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_since_saturates() {
        let a = Millis::new(100.0);
        let b = Millis::new(350.0);
        assert_eq!(b.since(a), 250.0);
        assert_eq!(a.since(b), 0.0);
    }

    #[test]
    fn degenerate_viewports() {
        assert!(Viewport::new(0.0, 800.0).is_degenerate());
        assert!(Viewport::new(1280.0, -1.0).is_degenerate());
        assert!(Viewport::new(f64::NAN, 800.0).is_degenerate());
        assert!(!Viewport::new(1280.0, 800.0).is_degenerate());
    }

    #[test]
    fn direction_serializes_as_sign() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "-1");
        let right: Direction = serde_json::from_str("1").unwrap();
        assert_eq!(right, Direction::Right);
        assert!(serde_json::from_str::<Direction>("0").is_err());
    }

    #[test]
    fn wall_config_defaults_from_empty_json() {
        let cfg: WallConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, WallConfig::default());
        assert_eq!(cfg.scale_factor, 1.3);
        assert_eq!(cfg.safety_margin, 10);
    }

    #[test]
    fn marquee_default_rows() {
        let cfg = MarqueeConfig::default();
        assert_eq!(cfg.rows.len(), 3);
        assert_eq!(cfg.rows[1].direction, Direction::Right);
        assert_eq!(cfg.rows[2].depth_weight, 5.0);
    }

    #[test]
    fn css_strings() {
        let off = RowOffset { x: -12.5, y: 0.25 };
        assert_eq!(off.to_css(), "translate3d(-12.5px, 0.25px, 0)");

        let tilt = Tilt {
            rotate_x_deg: -7.0,
            rotate_y_deg: 9.0,
            scale: 1.2,
            perspective_px: 1500.0,
        };
        assert_eq!(
            tilt.to_css(),
            "perspective(1500px) rotateX(-7deg) rotateY(9deg) scale(1.2)"
        );
    }
}
