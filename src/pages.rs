// Page entry points. Each page script calls one of these with its fetch wrapper and
// applies the returned JSON; the generic halves below hold the behavior.

use wasm_bindgen::prelude::*;

use crate::catalog::{CatalogBatch, CatalogSource, Movie, MovieDetail};
use crate::collection::Collection;
use crate::navigation::{Redirect, ENTER_TRANSITION_MS, HOME_PAGE, SIGN_IN_PAGE};
use crate::predict::{submit_mood, GenrePredictor, MoodOutcome, PredictorConfig};
use crate::results::{load_results_page, ResultsPage};
use crate::storage::{BrowserStorage, KeyValueStore, Preferences};
use crate::transport::{JsFetchTransport, Transport};

/// Store the display name and continue to the home page.
pub fn sign_in_with<S: KeyValueStore>(
    preferences: &mut Preferences<S>,
    username: &str,
) -> Redirect {
    if let Err(err) = preferences.set_username(username) {
        log::warn!("Could not persist username: {}", err);
    }
    Redirect::now(HOME_PAGE)
}

/// Landing page "Enter" button: fade out, then sign-in.
pub fn enter_redirect() -> Redirect {
    Redirect::after(SIGN_IN_PAGE, ENTER_TRANSITION_MS)
}

/// Merged catalog for several genres. Failures are reported alongside.
pub async fn load_catalogs_with<T: Transport>(
    transport: &T,
    source: &CatalogSource,
    genres: &[String],
) -> CatalogBatch {
    source.load_genres(transport, genres, false).await
}

/// Genre-tagged merged catalog for the collection page.
pub async fn load_collection_with<T: Transport>(
    transport: &T,
    source: &CatalogSource,
) -> Vec<Movie> {
    Collection::load(transport, source).await.into_movies()
}

// =============================================================================
// WASM Bindings
// =============================================================================

fn to_json<V: serde::Serialize>(value: &V) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn browser_preferences() -> Result<Preferences<BrowserStorage>, JsValue> {
    BrowserStorage::local()
        .map(Preferences::new)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// One genre's catalog as a JSON array. Rejects on fetch or parse failure.
#[wasm_bindgen]
pub async fn load_genre_catalog(fetcher: js_sys::Function, genre: String) -> Result<String, JsValue> {
    let transport = JsFetchTransport::new(fetcher);
    let movies = CatalogSource::default()
        .load_genre(&transport, &genre)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&movies)
}

/// `CatalogBatch` JSON for a JSON array of genres.
#[wasm_bindgen]
pub async fn load_catalogs(fetcher: js_sys::Function, genres_json: String) -> Result<String, JsValue> {
    let genres: Vec<String> = serde_json::from_str(&genres_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid genre list: {}", e)))?;
    let transport = JsFetchTransport::new(fetcher);
    let batch = load_catalogs_with(&transport, &CatalogSource::default(), &genres).await;
    to_json(&batch)
}

/// Movie array JSON for `CollectionBrowser`.
#[wasm_bindgen]
pub async fn load_collection(fetcher: js_sys::Function) -> Result<String, JsValue> {
    let transport = JsFetchTransport::new(fetcher);
    let movies = load_collection_with(&transport, &CatalogSource::default()).await;
    to_json(&movies)
}

/// Submit a mood from the home page. Returns `MoodOutcome` JSON.
#[wasm_bindgen]
pub async fn predict_mood(
    fetcher: js_sys::Function,
    mood: String,
    config_json: String,
) -> Result<String, JsValue> {
    let config: PredictorConfig = serde_json::from_str(&config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid predictor config: {}", e)))?;
    let predictor = GenrePredictor::new(JsFetchTransport::new(fetcher), config);
    let mut preferences = browser_preferences()?;

    let outcome: MoodOutcome = submit_mood(&predictor, &mut preferences, &mood).await;
    to_json(&outcome)
}

/// Results page for `location.search`. Returns `ResultsPage` JSON.
#[wasm_bindgen]
pub async fn load_results(fetcher: js_sys::Function, search: String) -> Result<String, JsValue> {
    let transport = JsFetchTransport::new(fetcher);
    let page: ResultsPage = load_results_page(&transport, &CatalogSource::default(), &search).await;
    to_json(&page)
}

/// Popup view model for one catalog record.
#[wasm_bindgen]
pub fn movie_detail(movie_json: &str) -> Result<String, JsValue> {
    let movie: Movie = serde_json::from_str(movie_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid movie: {}", e)))?;
    to_json(&MovieDetail::from_movie(&movie))
}

/// Returns `Redirect` JSON.
#[wasm_bindgen]
pub fn sign_in(username: &str) -> Result<String, JsValue> {
    let mut preferences = browser_preferences()?;
    to_json(&sign_in_with(&mut preferences, username))
}

#[wasm_bindgen]
pub fn display_username() -> Result<String, JsValue> {
    Ok(browser_preferences()?.username())
}

/// Returns `Redirect` JSON.
#[wasm_bindgen]
pub fn enter_app() -> Result<String, JsValue> {
    to_json(&enter_redirect())
}
