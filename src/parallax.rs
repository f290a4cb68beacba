// Pointer-driven depth: per-row parallax for the marquee, 3-D tilt for the poster wall.
// The marquee is frame-driven and keeps moving without input; the tilt is event-driven
// and only changes when the pointer moves.

use serde::{Deserialize, Serialize};

use crate::types::{RowOffset, Tilt, TiltSettings, Viewport};

/// Last known pointer position relative to the viewport center, in [-0.5, 0.5].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointerState {
    x: f64,
    y: f64,
}

impl PointerState {
    /// Pointer at the viewport center.
    pub fn centered() -> Self {
        PointerState::default()
    }

    pub fn from_centered(x: f64, y: f64) -> Self {
        PointerState {
            x: x.clamp(-0.5, 0.5),
            y: y.clamp(-0.5, 0.5),
        }
    }

    /// Normalize a `clientX`/`clientY` pair against the live window.
    pub fn from_client(client_x: f64, client_y: f64, viewport: Viewport) -> Self {
        if viewport.is_degenerate() {
            return PointerState::centered();
        }
        PointerState::from_centered(
            client_x / viewport.width - 0.5,
            client_y / viewport.height - 0.5,
        )
    }

    /// Position in [-0.5, 0.5].
    pub fn half_range(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    /// Position in [-1, 1].
    pub fn unit_range(&self) -> (f64, f64) {
        (self.x * 2.0, self.y * 2.0)
    }
}

/// Parallax offset for a layer of the given depth weight.
pub fn depth_offset(pointer: &PointerState, depth_weight: f64, vertical_damping: f64) -> RowOffset {
    let (x, y) = pointer.half_range();
    RowOffset {
        x: x * depth_weight,
        y: y * depth_weight * vertical_damping,
    }
}

/// Event-driven tilt of the poster wall container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltEffect {
    settings: TiltSettings,
    current: Tilt,
}

impl TiltEffect {
    pub fn new(settings: TiltSettings) -> Self {
        TiltEffect {
            settings,
            current: tilt_for(&settings, &PointerState::centered()),
        }
    }

    /// Recompute on pointer movement only.
    pub fn on_pointer_move(&mut self, pointer: &PointerState) -> Tilt {
        self.current = tilt_for(&self.settings, pointer);
        self.current
    }

    /// Last applied tilt.
    pub fn current(&self) -> Tilt {
        self.current
    }
}

fn tilt_for(settings: &TiltSettings, pointer: &PointerState) -> Tilt {
    let (x, y) = pointer.unit_range();
    Tilt {
        rotate_x_deg: -y * settings.pitch_gain,
        rotate_y_deg: x * settings.yaw_gain,
        scale: settings.scale,
        perspective_px: settings.perspective_px,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_coordinates_normalize_around_center() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(PointerState::from_client(500.0, 400.0, vp).half_range(), (0.0, 0.0));
        assert_eq!(PointerState::from_client(0.0, 800.0, vp).half_range(), (-0.5, 0.5));
        assert_eq!(PointerState::from_client(1000.0, 0.0, vp).unit_range(), (1.0, -1.0));
    }

    #[test]
    fn out_of_window_pointer_is_clamped() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(PointerState::from_client(3000.0, -50.0, vp).half_range(), (0.5, -0.5));
    }

    #[test]
    fn degenerate_viewport_centers_pointer() {
        let p = PointerState::from_client(10.0, 10.0, Viewport::new(0.0, 0.0));
        assert_eq!(p, PointerState::centered());
    }

    #[test]
    fn vertical_parallax_is_damped() {
        let pointer = PointerState::from_centered(0.5, 0.5);
        let offset = depth_offset(&pointer, 4.0, 0.2);
        assert_eq!(offset.x, 2.0);
        assert!(offset.y.abs() < offset.x.abs());
        assert!((offset.y - 0.4).abs() < 1e-12);
    }

    #[test]
    fn tilt_follows_pointer_edges() {
        let mut tilt = TiltEffect::new(TiltSettings::default());
        assert_eq!(tilt.current().rotate_y_deg, 0.0);

        let t = tilt.on_pointer_move(&PointerState::from_centered(0.5, 0.5));
        assert_eq!(t.rotate_y_deg, 18.0);
        assert_eq!(t.rotate_x_deg, -14.0);
        assert_eq!(t.scale, 1.2);
        assert_eq!(t.perspective_px, 1500.0);
        assert_eq!(tilt.current(), t);
    }

    #[test]
    fn tilt_holds_without_movement() {
        let mut tilt = TiltEffect::new(TiltSettings::default());
        let t = tilt.on_pointer_move(&PointerState::from_centered(-0.25, 0.1));
        // Nothing recomputes it until the next move event.
        assert_eq!(tilt.current(), t);
        assert_eq!(tilt.current(), t);
    }
}
