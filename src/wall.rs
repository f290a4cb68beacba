// Decorative poster wall: tile coverage + pooled posters + pointer tilt.
// Shared by the sign-in, home, and about pages; they differ only in WallConfig.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::catalog::{Movie, PosterTile};
use crate::grid::{compute_grid, GridSpec, TileGrid};
use crate::parallax::{PointerState, TiltEffect};
use crate::pool::PosterPool;
use crate::schedule::{Debouncer, Generation, GenerationTicket};
use crate::types::{Millis, Tilt, Viewport, WallConfig};

/// Everything the page needs to (re)populate the wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub grid: TileGrid,
    /// Images to append, in order. May be shorter than the tile count.
    pub posters: Vec<PosterTile>,
}

/// Poster wall state for one page.
#[derive(Debug)]
pub struct PosterWallState {
    config: WallConfig,
    source: Vec<Movie>,
    generation: Generation,
    resize: Debouncer,
    tilt: TiltEffect,
    rng: SmallRng,
}

impl PosterWallState {
    pub fn new(config: WallConfig, seed: u64) -> Self {
        PosterWallState {
            resize: Debouncer::new(config.resize_debounce_ms),
            tilt: TiltEffect::new(config.tilt),
            config,
            source: Vec::new(),
            generation: Generation::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &WallConfig {
        &self.config
    }

    /// Start loading a new source catalog; older loads become stale.
    pub fn begin_load(&mut self) -> GenerationTicket {
        self.generation.advance()
    }

    /// Accept a loaded catalog unless a newer load or teardown superseded it.
    pub fn accept_source(&mut self, ticket: GenerationTicket, movies: Vec<Movie>) -> bool {
        if !self.generation.is_current(ticket) {
            log::debug!("Dropping stale poster catalog (ticket {})", ticket.as_u64());
            return false;
        }
        self.source = movies;
        true
    }

    /// Rebuild from scratch for the given viewport. Shuffles once per build.
    pub fn build(&mut self, viewport: Viewport) -> WallLayout {
        let grid = compute_grid(&GridSpec::from_config(viewport, &self.config));
        let pool = PosterPool::assemble(&self.source, grid.required_tile_count, &mut self.rng);
        let posters: Vec<PosterTile> = pool.renderable().filter_map(PosterTile::from_movie).collect();

        log::debug!(
            "Poster wall {}x{} -> {} tiles, {} rendered",
            grid.columns,
            grid.rows,
            grid.required_tile_count,
            posters.len()
        );

        WallLayout { grid, posters }
    }

    /// Record a resize event. Returns when the rebuild becomes due.
    pub fn on_resize(&mut self, now: Millis) -> Millis {
        self.resize.trigger(now)
    }

    /// Rebuild if the resize quiet period has elapsed.
    pub fn poll_resize(&mut self, now: Millis, viewport: Viewport) -> Option<WallLayout> {
        if self.resize.poll(now) {
            Some(self.build(viewport))
        } else {
            None
        }
    }

    pub fn on_pointer_move(&mut self, client_x: f64, client_y: f64, viewport: Viewport) -> Tilt {
        let pointer = PointerState::from_client(client_x, client_y, viewport);
        self.tilt.on_pointer_move(&pointer)
    }

    /// Invalidate in-flight loads and pending rebuilds.
    pub fn teardown(&mut self) {
        self.generation.advance();
        self.resize.cancel();
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// WASM-exposed poster wall.
///
/// The page fetches `genres()` (see `load_catalogs`), hands the result to
/// `accept_source`, then appends `build()`'s posters to `#poster-grid`.
#[wasm_bindgen]
pub struct PosterWall {
    inner: PosterWallState,
}

#[wasm_bindgen]
impl PosterWall {
    /// Create a wall from JSON config, seeded from `Math.random`.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<PosterWall, JsValue> {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        PosterWall::with_seed(config_json, seed)
    }

    /// Create a wall with a fixed shuffle seed.
    pub fn with_seed(config_json: &str, seed: u64) -> Result<PosterWall, JsValue> {
        let config: WallConfig = serde_json::from_str(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid wall config: {}", e)))?;

        Ok(PosterWall {
            inner: PosterWallState::new(config, seed),
        })
    }

    /// Source genres as a JSON array.
    pub fn genres(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.inner.config().genres)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Returns a ticket to pass back to `accept_source`.
    pub fn begin_load(&mut self) -> u64 {
        self.inner.begin_load().as_u64()
    }

    /// Returns false if the catalog arrived after a newer load or teardown.
    pub fn accept_source(&mut self, ticket: u64, movies_json: &str) -> Result<bool, JsValue> {
        let movies: Vec<Movie> = serde_json::from_str(movies_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid catalog: {}", e)))?;
        Ok(self
            .inner
            .accept_source(GenerationTicket::from_raw(ticket), movies))
    }

    /// Full rebuild. Returns `WallLayout` JSON.
    pub fn build(&mut self, width: f64, height: f64) -> Result<String, JsValue> {
        let layout = self.inner.build(Viewport::new(width, height));
        serde_json::to_string(&layout)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Returns the time (ms) at which `poll_resize` should be called.
    pub fn resize(&mut self, now_ms: f64) -> f64 {
        self.inner.on_resize(Millis::new(now_ms)).as_f64()
    }

    /// `WallLayout` JSON if a debounced rebuild is due, otherwise `undefined`.
    pub fn poll_resize(
        &mut self,
        now_ms: f64,
        width: f64,
        height: f64,
    ) -> Result<Option<String>, JsValue> {
        self.inner
            .poll_resize(Millis::new(now_ms), Viewport::new(width, height))
            .map(|layout| {
                serde_json::to_string(&layout)
                    .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
            })
            .transpose()
    }

    /// CSS transform for the wall container.
    pub fn pointer_move(&mut self, client_x: f64, client_y: f64, width: f64, height: f64) -> String {
        self.inner
            .on_pointer_move(client_x, client_y, Viewport::new(width, height))
            .to_css()
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::movie;

    fn loaded_wall(config: WallConfig, movies: Vec<Movie>) -> PosterWallState {
        let mut wall = PosterWallState::new(config, 7);
        let ticket = wall.begin_load();
        assert!(wall.accept_source(ticket, movies));
        wall
    }

    #[test]
    fn build_fills_every_tile() {
        let movies = (0..12).map(|i| movie(&format!("m{}", i))).collect();
        let mut wall = loaded_wall(WallConfig::default(), movies);

        let layout = wall.build(Viewport::new(1280.0, 800.0));
        assert_eq!(layout.grid.required_tile_count, 704);
        assert_eq!(layout.posters.len(), 704);
    }

    #[test]
    fn posterless_movies_shrink_render_only() {
        let mut blank = movie("blank");
        blank.poster_url = None;
        let mut wall = loaded_wall(WallConfig::default(), vec![movie("a"), blank]);

        let layout = wall.build(Viewport::new(1280.0, 800.0));
        assert_eq!(layout.grid.required_tile_count, 704);
        assert_eq!(layout.posters.len(), 352);
        assert!(layout.posters.iter().all(|p| p.alt == "a"));
    }

    #[test]
    fn empty_catalog_builds_empty_wall() {
        let mut wall = PosterWallState::new(WallConfig::default(), 1);
        let layout = wall.build(Viewport::new(1280.0, 800.0));
        assert!(layout.posters.is_empty());
        assert!(!layout.grid.is_empty());
    }

    #[test]
    fn stale_catalog_is_dropped() {
        let mut wall = PosterWallState::new(WallConfig::default(), 1);
        let first = wall.begin_load();
        let second = wall.begin_load();
        assert!(!wall.accept_source(first, vec![movie("old")]));
        assert!(wall.accept_source(second, vec![movie("new")]));

        let third = wall.begin_load();
        wall.teardown();
        assert!(!wall.accept_source(third, vec![movie("late")]));
    }

    #[test]
    fn resize_rebuilds_once_after_quiet_period() {
        let mut wall = loaded_wall(WallConfig::default(), vec![movie("a")]);
        wall.on_resize(Millis::new(0.0));
        let due = wall.on_resize(Millis::new(100.0));
        assert_eq!(due, Millis::new(350.0));

        let vp = Viewport::new(640.0, 480.0);
        assert!(wall.poll_resize(Millis::new(300.0), vp).is_none());
        assert!(wall.poll_resize(Millis::new(350.0), vp).is_some());
        assert!(wall.poll_resize(Millis::new(400.0), vp).is_none());
    }

    #[test]
    fn teardown_cancels_pending_rebuild() {
        let mut wall = loaded_wall(WallConfig::default(), vec![movie("a")]);
        wall.on_resize(Millis::new(0.0));
        wall.teardown();
        assert!(wall
            .poll_resize(Millis::new(1000.0), Viewport::new(640.0, 480.0))
            .is_none());
    }

    #[test]
    fn tilt_css_from_pointer() {
        let mut wall = PosterWallState::new(WallConfig::default(), 1);
        let tilt = wall.on_pointer_move(1000.0, 0.0, Viewport::new(1000.0, 800.0));
        assert_eq!(
            tilt.to_css(),
            "perspective(1500px) rotateX(14deg) rotateY(18deg) scale(1.2)"
        );
    }

    #[test]
    fn wasm_wall_build_json() {
        let mut wall = PosterWall::with_seed(r#"{"scale_factor": 1.8, "safety_margin": 15}"#, 3)
            .expect("Should parse config");
        let ticket = wall.begin_load();
        let catalog = serde_json::to_string(&vec![movie("a"), movie("b")]).unwrap();
        assert!(wall.accept_source(ticket, &catalog).expect("Should parse catalog"));

        let json = wall.build(1280.0, 800.0).expect("Should serialize");
        let layout: WallLayout = serde_json::from_str(&json).expect("Should parse layout");
        assert_eq!(layout.grid.columns, 45);
        assert_eq!(layout.posters.len(), layout.grid.required_tile_count);
    }

    #[test]
    fn wasm_wall_genres_default() {
        let wall = PosterWall::with_seed("{}", 0).expect("Should parse config");
        assert_eq!(wall.genres().unwrap(), r#"["drama","comedy","sci-fi"]"#);
    }
}
