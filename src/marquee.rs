// Landing-page marquee: three infinitely scrolling poster rows with pointer parallax.
// EngineState owns what used to be page globals. Writers: pointer handler (pointer),
// frame callback (row offsets). Everything runs on the UI thread between callbacks.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::catalog::{Movie, PosterTile};
use crate::parallax::PointerState;
use crate::schedule::{FrameLoop, FrameTick};
use crate::scroll::{RowContent, ScrollRow};
use crate::types::{MarqueeConfig, RowOffset, Viewport};

/// Copies of the catalog laid end to end before doubling, so short catalogs still fill wide screens.
pub const ROW_FILL_REPEATS: usize = 3;

/// Explicitly owned marquee state.
#[derive(Debug, Clone)]
pub struct EngineState {
    rows: Vec<ScrollRow>,
    /// Written by the pointer handler, read by every frame.
    pointer: PointerState,
    frame_loop: FrameLoop,
    vertical_damping: f64,
}

/// Result of one frame callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    /// Whether the host must request another frame.
    pub rearm: bool,
    /// One offset per row, empty for skipped frames.
    pub offsets: Vec<RowOffset>,
}

impl EngineState {
    pub fn new(config: &MarqueeConfig) -> Self {
        EngineState {
            rows: config.rows.iter().map(ScrollRow::from_config).collect(),
            pointer: PointerState::centered(),
            frame_loop: FrameLoop::new(),
            vertical_damping: config.vertical_damping,
        }
    }

    pub fn rows(&self) -> &[ScrollRow] {
        &self.rows
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, viewport: Viewport) {
        self.pointer = PointerState::from_client(client_x, client_y, viewport);
    }

    /// Returns true when the host must request the first frame.
    pub fn start(&mut self) -> bool {
        let request = self.frame_loop.start();
        if request {
            log::info!("Marquee started with {} rows", self.rows.len());
        }
        request
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
        log::info!("Marquee stopped after {} frames", self.frame_loop.frames());
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Scroll step: advance each row against its live-measured doubled-content width.
    /// Rows without a measurement hold still.
    pub fn advance_rows(&mut self, scroll_widths: &[f64]) {
        for (i, row) in self.rows.iter_mut().enumerate() {
            let width = scroll_widths.get(i).copied().unwrap_or(0.0);
            row.advance(width);
        }
    }

    /// Parallax step: compose scroll offsets with the current pointer depth.
    pub fn render_rows(&self) -> Vec<RowOffset> {
        self.rows
            .iter()
            .map(|row| row.render(&self.pointer, self.vertical_damping))
            .collect()
    }

    /// One animation frame: scroll, then parallax.
    pub fn on_frame(&mut self, scroll_widths: &[f64]) -> FrameOutput {
        match self.frame_loop.on_frame() {
            FrameTick::Run => {
                self.advance_rows(scroll_widths);
                FrameOutput {
                    rearm: true,
                    offsets: self.render_rows(),
                }
            }
            FrameTick::Skip => FrameOutput {
                rearm: false,
                offsets: Vec::new(),
            },
        }
    }
}

/// Poster tiles for one marquee row: renderable posters, filled and doubled.
pub fn row_content(movies: &[Movie]) -> RowContent<PosterTile> {
    let tiles: Vec<PosterTile> = movies.iter().filter_map(PosterTile::from_movie).collect();
    RowContent::build(&tiles, ROW_FILL_REPEATS)
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// Frame output in the shape the page applies directly to `style.transform`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameOutputJs {
    rearm: bool,
    transforms: Vec<String>,
}

/// WASM-exposed marquee.
///
/// ```js
/// const marquee = new Marquee("{}");
/// window.addEventListener("mousemove", e =>
///   marquee.pointer_move(e.clientX, e.clientY, innerWidth, innerHeight));
/// const loop = () => {
///   const out = JSON.parse(marquee.frame(rows.map(r => r.scrollWidth)));
///   out.transforms.forEach((t, i) => rows[i].style.transform = t);
///   if (out.rearm) requestAnimationFrame(loop);
/// };
/// if (marquee.start()) requestAnimationFrame(loop);
/// ```
#[wasm_bindgen]
pub struct Marquee {
    state: EngineState,
    genres: Vec<String>,
}

#[wasm_bindgen]
impl Marquee {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Marquee, JsValue> {
        let config: MarqueeConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid marquee config: {}", e)))?;

        Ok(Marquee {
            state: EngineState::new(&config),
            genres: config.rows.iter().map(|r| r.genre.clone()).collect(),
        })
    }

    /// Genre of each row, in row order, for the page to fetch.
    pub fn row_genres(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.genres)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Doubled poster content for one row, from a catalog JSON array.
    pub fn row_content(&self, movies_json: &str) -> Result<String, JsValue> {
        let movies: Vec<Movie> = serde_json::from_str(movies_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid catalog: {}", e)))?;

        serde_json::to_string(row_content(&movies).items())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) {
        self.state
            .on_pointer_move(client_x, client_y, Viewport::new(width, height));
    }

    pub fn start(&mut self) -> bool {
        self.state.start()
    }

    pub fn stop(&mut self) {
        self.state.stop();
    }

    /// Run one frame. `scroll_widths` holds each row's measured `scrollWidth`.
    pub fn frame(&mut self, scroll_widths: &[f64]) -> Result<String, JsValue> {
        let output = self.state.on_frame(scroll_widths);
        let js = FrameOutputJs {
            rearm: output.rearm,
            transforms: output.offsets.iter().map(RowOffset::to_css).collect(),
        };

        serde_json::to_string(&js)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}
