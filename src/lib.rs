// cinemood_engine: CineMood Rust/WASM engine
// Poster walls, the landing marquee, and the page flows behind them. JS is plumbing.

mod catalog;
mod collection;
mod error;
mod grid;
mod marquee;
mod navigation;
mod pages;
mod parallax;
mod pool;
mod predict;
mod results;
mod schedule;
mod scroll;
mod storage;
mod story;
mod transport;
mod types;
mod wall;

use wasm_bindgen::prelude::*;

pub use catalog::{
    capitalize, CatalogBatch, CatalogFailure, CatalogSource, Movie, MovieCard, MovieDetail,
    PosterTile, ALL_GENRES,
};
pub use collection::{Collection, CollectionBrowser, GenreFilter, PAGE_SIZE};
pub use error::EngineError;
pub use grid::{compute_grid, GridSpec, TileGrid};
pub use marquee::{row_content, EngineState, FrameOutput, Marquee};
pub use navigation::{query_pairs, Redirect, ResultsQuery};
pub use pages::*;
pub use parallax::{depth_offset, PointerState, TiltEffect};
pub use pool::{PosterPool, PosterSource};
pub use predict::{
    failure_message, submit_mood, GenrePredictor, HealthStatus, Mood, MoodOutcome, Prediction,
    PredictorConfig,
};
pub use results::{load_results_page, ResultsHeading, ResultsLayout, ResultsPage};
pub use schedule::{Debouncer, FrameLoop, FrameTick, Generation, GenerationTicket};
pub use scroll::{RowContent, ScrollRow};
pub use storage::{BrowserStorage, KeyValueStore, MemoryStore, Preferences};
pub use story::{StoryCycle, StoryFrame, StoryPhase, StoryText};
pub use transport::{HttpRequest, HttpResponse, JsFetchTransport, Method, Transport};
pub use types::*;
pub use wall::{PosterWall, PosterWallState, WallLayout};

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console")]
    {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
    }
}
