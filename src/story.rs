// Landing-page hero text: three lines shown in turn, each swap preceded by a fade-out.
// Pure function of elapsed time; the page polls it from a timer.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::types::Millis;

pub const STORY_LINES: [&str; 3] = [
    "Too many movies.<br>Nothing <i>feels</i> right.",
    "And somewhere in the silence...<br>the <i>right story</i> waits.",
    "What if stories followed<br>how you <i>feel</i>...",
];

/// Delay before each change, counted from the previous change.
pub const CHANGE_INTERVAL_MS: f64 = 4000.0;
/// Fade-out before the text swaps.
pub const FADE_MS: f64 = 600.0;
/// Offset applied while fading.
pub const FADE_SHIFT_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryPhase {
    Visible,
    Fading,
}

/// What the hero text element should show right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryFrame {
    pub index: usize,
    /// Line markup, inserted as HTML.
    pub html: String,
    pub phase: StoryPhase,
    pub opacity: f64,
    pub translate_y_px: f64,
}

impl StoryFrame {
    pub fn transform_css(&self) -> String {
        if self.translate_y_px == 0.0 {
            "translateY(0)".to_string()
        } else {
            format!("translateY({}px)", self.translate_y_px)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoryCycle {
    started_at: Millis,
}

impl StoryCycle {
    pub fn new(started_at: Millis) -> Self {
        StoryCycle { started_at }
    }

    /// Fade-out start of the change into line `index` (1-based over changes).
    fn fade_start(index: usize) -> f64 {
        CHANGE_INTERVAL_MS * index as f64
    }

    pub fn frame_at(&self, now: Millis) -> StoryFrame {
        let elapsed = now.since(self.started_at).max(0.0);
        let last = STORY_LINES.len() - 1;

        let mut index = 0;
        let mut phase = StoryPhase::Visible;
        for next in 1..=last {
            let fade_start = Self::fade_start(next);
            if elapsed < fade_start {
                break;
            }
            if elapsed < fade_start + FADE_MS {
                phase = StoryPhase::Fading;
                break;
            }
            index = next;
        }

        let (opacity, translate_y_px) = match phase {
            StoryPhase::Visible => (1.0, 0.0),
            StoryPhase::Fading => (0.0, FADE_SHIFT_PX),
        };

        StoryFrame {
            index,
            html: STORY_LINES[index].to_string(),
            phase,
            opacity,
            translate_y_px,
        }
    }

    /// Next instant at which `frame_at` changes, or `None` once the last line is showing.
    pub fn next_change(&self, now: Millis) -> Option<Millis> {
        let elapsed = now.since(self.started_at);
        (1..STORY_LINES.len())
            .flat_map(|i| [Self::fade_start(i), Self::fade_start(i) + FADE_MS])
            .find(|&t| t > elapsed)
            .map(|t| self.started_at.after(t))
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.next_change(now).is_none()
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// Frame in the shape the page applies to the hero element.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoryFrameJs {
    html: String,
    opacity: f64,
    transform: String,
}

/// WASM-exposed story cycle.
#[wasm_bindgen]
pub struct StoryText {
    cycle: StoryCycle,
}

#[wasm_bindgen]
impl StoryText {
    #[wasm_bindgen(constructor)]
    pub fn new(now_ms: f64) -> StoryText {
        StoryText {
            cycle: StoryCycle::new(Millis::new(now_ms)),
        }
    }

    /// `{html, opacity, transform}` JSON for the given time.
    pub fn frame(&self, now_ms: f64) -> Result<String, JsValue> {
        let frame = self.cycle.frame_at(Millis::new(now_ms));
        let js = StoryFrameJs {
            transform: frame.transform_css(),
            html: frame.html,
            opacity: frame.opacity,
        };
        serde_json::to_string(&js)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// When to call `frame` again; `undefined` when the cycle is over.
    pub fn next_change(&self, now_ms: f64) -> Option<f64> {
        self.cycle
            .next_change(Millis::new(now_ms))
            .map(|t| t.as_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(cycle: &StoryCycle, ms: f64) -> StoryFrame {
        cycle.frame_at(Millis::new(ms))
    }

    #[test]
    fn timeline() {
        let cycle = StoryCycle::new(Millis::new(1000.0));
        let checkpoints = [
            (1000.0, 0, StoryPhase::Visible),
            (4999.0, 0, StoryPhase::Visible),
            (5000.0, 0, StoryPhase::Fading),
            (5599.0, 0, StoryPhase::Fading),
            (5600.0, 1, StoryPhase::Visible),
            (9000.0, 1, StoryPhase::Fading),
            (9600.0, 2, StoryPhase::Visible),
            (60000.0, 2, StoryPhase::Visible),
        ];
        for (now, index, phase) in checkpoints {
            let frame = at(&cycle, now);
            assert_eq!((frame.index, frame.phase), (index, phase), "at {}", now);
        }
    }

    #[test]
    fn fading_hides_and_shifts() {
        let cycle = StoryCycle::new(Millis::new(0.0));
        let frame = at(&cycle, 4100.0);
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.transform_css(), "translateY(10px)");

        let frame = at(&cycle, 4700.0);
        assert_eq!(frame.opacity, 1.0);
        assert_eq!(frame.transform_css(), "translateY(0)");
        assert_eq!(frame.html, STORY_LINES[1]);
    }

    #[test]
    fn before_start_shows_first_line() {
        let cycle = StoryCycle::new(Millis::new(500.0));
        assert_eq!(at(&cycle, 0.0).index, 0);
    }

    #[test]
    fn next_change_walks_the_schedule() {
        let cycle = StoryCycle::new(Millis::new(0.0));
        let mut now = Millis::new(0.0);
        let mut changes = Vec::new();
        while let Some(next) = cycle.next_change(now) {
            changes.push(next.as_f64());
            now = next;
        }
        assert_eq!(changes, vec![4000.0, 4600.0, 8000.0, 8600.0]);
        assert!(cycle.is_finished(now));
    }

    #[test]
    fn wasm_story_frame_json() {
        let story = StoryText::new(0.0);
        let json = story.frame(4300.0).expect("Should serialize");
        let frame: StoryFrameJs = serde_json::from_str(&json).expect("Should parse frame");
        assert_eq!(frame.opacity, 0.0);
        assert_eq!(frame.transform, "translateY(10px)");
        assert_eq!(story.next_change(9000.0), None);
    }
}
