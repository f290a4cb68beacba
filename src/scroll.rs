// Infinite horizontal scroll rows.
// A row's content is its source sequence duplicated once; wrapping by exactly one copy's width
// lands on pixel-identical content, so the loop has no visible cut.

use serde::{Deserialize, Serialize};

use crate::parallax::{depth_offset, PointerState};
use crate::types::{Direction, RowConfig, RowOffset};

/// Scroll state of one marquee track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollRow {
    direction: Direction,
    speed: f64,
    depth_weight: f64,
    offset_x: f64,
}

impl ScrollRow {
    pub fn new(direction: Direction, speed: f64, depth_weight: f64) -> Self {
        ScrollRow {
            direction,
            speed,
            depth_weight,
            offset_x: 0.0,
        }
    }

    pub fn from_config(config: &RowConfig) -> Self {
        ScrollRow::new(config.direction, config.speed, config.depth_weight)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn depth_weight(&self) -> f64 {
        self.depth_weight
    }

    /// Scroll accumulator in pixels.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Advance one frame.
    ///
    /// `scroll_width` is the live-measured width of the doubled content; half of it is one copy.
    /// Re-measuring every frame tolerates late image loads changing the layout.
    pub fn advance(&mut self, scroll_width: f64) -> f64 {
        let half = scroll_width / 2.0;
        if !(half > 0.0) || !half.is_finite() {
            self.offset_x = 0.0;
            return self.offset_x;
        }

        self.offset_x += self.speed * self.direction.sign();

        match self.direction {
            Direction::Left => {
                if self.offset_x <= -half {
                    self.offset_x = 0.0;
                }
            }
            Direction::Right => {
                if self.offset_x >= 0.0 {
                    self.offset_x = -half;
                }
            }
        }

        // Content may shrink between frames; pull stale offsets back into range.
        if self.offset_x < -half {
            self.offset_x = match self.direction {
                Direction::Left => 0.0,
                Direction::Right => -half,
            };
        }

        self.offset_x
    }

    /// Rendered offset: scroll accumulator plus pointer depth. Neither feeds back into the other.
    pub fn render(&self, pointer: &PointerState, vertical_damping: f64) -> RowOffset {
        let depth = depth_offset(pointer, self.depth_weight, vertical_damping);
        RowOffset {
            x: self.offset_x + depth.x,
            y: depth.y,
        }
    }
}

/// Content of one marquee row: the renderable unit, duplicated once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowContent<T> {
    unit_len: usize,
    items: Vec<T>,
}

impl<T: Clone> RowContent<T> {
    /// Build content from `unit` repeated `fill_repeats` times, then doubled for the loop.
    pub fn build(unit: &[T], fill_repeats: usize) -> Self {
        let filled: Vec<T> = unit
            .iter()
            .cycle()
            .take(unit.len() * fill_repeats.max(1))
            .cloned()
            .collect();

        let mut items = filled.clone();
        items.extend(filled.iter().cloned());

        RowContent {
            unit_len: filled.len(),
            items,
        }
    }
}

impl<T> RowContent<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in one copy.
    pub fn copy_len(&self) -> usize {
        self.unit_len
    }

    /// Item drawn at viewport position `x_px` when the row is translated by `offset_x`,
    /// for equal-width tiles.
    pub fn item_at(&self, offset_x: f64, x_px: f64, tile_width: f64) -> Option<&T> {
        let content_x = x_px - offset_x;
        if content_x < 0.0 || tile_width <= 0.0 {
            return None;
        }
        self.items.get((content_x / tile_width).floor() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_row_wraps_to_zero_after_one_copy() {
        let mut row = ScrollRow::new(Direction::Left, 0.18, 3.0);
        let frames = (1000.0f64 / 0.18).ceil() as usize;

        let mut wrapped_at = None;
        for frame in 1..=frames {
            let offset = row.advance(2000.0);
            assert!(offset > -1000.0 && offset <= 0.0, "offset {} out of range", offset);
            if offset == 0.0 {
                wrapped_at = Some(frame);
                break;
            }
        }

        // Float accumulation may trip the boundary one frame early, never late.
        let wrapped_at = wrapped_at.expect("row never wrapped");
        assert!(wrapped_at + 1 >= frames && wrapped_at <= frames);
    }

    #[test]
    fn right_row_starts_by_jumping_to_left_edge() {
        let mut row = ScrollRow::new(Direction::Right, 0.5, 4.0);
        assert_eq!(row.advance(2000.0), -1000.0);
        assert_eq!(row.advance(2000.0), -999.5);
    }

    #[test]
    fn right_row_stays_in_half_open_range() {
        let mut row = ScrollRow::new(Direction::Right, 7.0, 4.0);
        for _ in 0..10_000 {
            let offset = row.advance(900.0);
            assert!((-450.0..0.0).contains(&offset), "offset {} out of range", offset);
        }
    }

    #[test]
    fn zero_width_does_not_scroll() {
        let mut row = ScrollRow::new(Direction::Left, 0.18, 3.0);
        assert_eq!(row.advance(0.0), 0.0);
        assert_eq!(row.advance(f64::NAN), 0.0);
    }

    #[test]
    fn shrinking_content_pulls_offset_back_in_range() {
        let mut row = ScrollRow::new(Direction::Left, 10.0, 3.0);
        for _ in 0..80 {
            row.advance(2000.0);
        }
        assert_eq!(row.offset_x(), -800.0);
        let offset = row.advance(1000.0);
        assert!(offset > -500.0 && offset <= 0.0);
    }

    #[test]
    fn pointer_does_not_touch_accumulator() {
        let mut row = ScrollRow::new(Direction::Left, 1.0, 5.0);
        row.advance(1000.0);
        let pointer = PointerState::from_centered(0.5, -0.5);
        let rendered = row.render(&pointer, 0.2);
        assert_eq!(rendered.x, -1.0 + 2.5);
        assert_eq!(rendered.y, -0.5);
        assert_eq!(row.offset_x(), -1.0);
    }

    #[test]
    fn content_is_unit_doubled() {
        let content = RowContent::build(&["a", "b"], 3);
        assert_eq!(content.copy_len(), 6);
        assert_eq!(content.items(), &["a", "b", "a", "b", "a", "b", "a", "b", "a", "b", "a", "b"]);
    }

    #[test]
    fn wrap_point_shows_identical_content() {
        let tile = 150.0;
        let content = RowContent::build(&["a", "b", "c", "d"], 1);
        let half = content.copy_len() as f64 * tile;

        let mut x = 0.0;
        while x < half {
            assert_eq!(
                content.item_at(0.0, x, tile),
                content.item_at(-half, x, tile),
                "mismatch at x = {}",
                x
            );
            x += 7.5;
        }
    }
}
