// Collection page: every genre's catalog merged, filtered, searched, and paged.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::catalog::{capitalize, CatalogSource, Movie, MovieCard, MovieDetail, ALL_GENRES};
use crate::transport::Transport;

/// Cards added per "load more".
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreFilter {
    All,
    Genre(String),
}

impl GenreFilter {
    /// `all` or a genre key, as carried by the filter buttons.
    pub fn parse(key: &str) -> Self {
        match key {
            "" | "all" => GenreFilter::All,
            genre => GenreFilter::Genre(genre.to_string()),
        }
    }

    fn admits(&self, movie: &Movie) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(genre) => movie.genre.as_deref() == Some(genre.as_str()),
        }
    }
}

/// Merged catalog with the current selection and page position.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    movies: Vec<Movie>,
    /// Indices into `movies`.
    selection: Vec<usize>,
    shown: usize,
    stats: String,
}

impl Collection {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut collection = Collection {
            movies,
            ..Default::default()
        };
        collection.filter(&GenreFilter::All);
        collection
    }

    /// Load all genres, tagging each movie with its genre. Failed genres are skipped.
    pub async fn load<T: Transport>(transport: &T, source: &CatalogSource) -> Self {
        let genres: Vec<String> = ALL_GENRES.iter().map(|g| g.to_string()).collect();
        let batch = source.load_genres(transport, &genres, true).await;
        log::info!("Loaded {} total movies", batch.movies.len());
        Collection::new(batch.movies)
    }

    pub fn total(&self) -> usize {
        self.movies.len()
    }

    pub fn into_movies(self) -> Vec<Movie> {
        self.movies
    }

    pub fn stats(&self) -> &str {
        &self.stats
    }

    pub fn matching(&self) -> usize {
        self.selection.len()
    }

    /// Apply a genre filter, clearing any search. Resets to the first page.
    pub fn filter(&mut self, filter: &GenreFilter) -> Vec<MovieCard> {
        self.selection = (0..self.movies.len())
            .filter(|&i| filter.admits(&self.movies[i]))
            .collect();
        self.stats = match filter {
            GenreFilter::All => format!("{} movies in our collection", self.movies.len()),
            GenreFilter::Genre(genre) => {
                format!("{} {} movies", self.selection.len(), capitalize(genre))
            }
        };
        self.reset_page()
    }

    /// Case-insensitive title search over the whole collection.
    /// A blank query falls back to `filter`.
    pub fn search(&mut self, query: &str, filter: &GenreFilter) -> Vec<MovieCard> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.filter(filter);
        }

        self.selection = (0..self.movies.len())
            .filter(|&i| self.movies[i].title.to_lowercase().contains(&needle))
            .collect();
        let plural = if self.selection.len() == 1 { "" } else { "s" };
        self.stats = format!(
            "Found {} movie{} matching \"{}\"",
            self.selection.len(),
            plural,
            needle
        );
        self.reset_page()
    }

    /// Next page of cards to append.
    pub fn load_more(&mut self) -> Vec<MovieCard> {
        let end = (self.shown + PAGE_SIZE).min(self.selection.len());
        let cards = self.selection[self.shown..end]
            .iter()
            .map(|&i| MovieCard::from_movie(&self.movies[i]))
            .collect();
        self.shown = end;
        cards
    }

    /// Whether the load-more button stays visible.
    pub fn has_more(&self) -> bool {
        self.shown < self.selection.len()
    }

    /// Detail for the `position`-th card shown since the last reset.
    pub fn detail(&self, position: usize) -> Option<MovieDetail> {
        self.selection
            .get(position)
            .filter(|_| position < self.shown)
            .map(|&i| MovieDetail::from_movie(&self.movies[i]))
    }

    fn reset_page(&mut self) -> Vec<MovieCard> {
        self.shown = 0;
        self.load_more()
    }
}

// =============================================================================
// WASM Bindings
// =============================================================================

/// One render step for the collection grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionPage {
    /// Replace the grid instead of appending.
    reset: bool,
    cards: Vec<MovieCard>,
    stats: String,
    has_more: bool,
}

/// WASM-exposed collection browser. Built from the merged catalog JSON
/// produced by `load_collection`.
#[wasm_bindgen]
pub struct CollectionBrowser {
    collection: Collection,
    filter: GenreFilter,
}

#[wasm_bindgen]
impl CollectionBrowser {
    #[wasm_bindgen(constructor)]
    pub fn new(movies_json: &str) -> Result<CollectionBrowser, JsValue> {
        let movies: Vec<Movie> = serde_json::from_str(movies_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid catalog: {}", e)))?;
        Ok(CollectionBrowser {
            collection: Collection::new(movies),
            filter: GenreFilter::All,
        })
    }

    /// First page after construction.
    pub fn initial(&mut self) -> Result<String, JsValue> {
        let cards = self.collection.filter(&self.filter);
        self.page(true, cards)
    }

    pub fn filter(&mut self, genre: &str) -> Result<String, JsValue> {
        self.filter = GenreFilter::parse(genre);
        let cards = self.collection.filter(&self.filter);
        self.page(true, cards)
    }

    pub fn search(&mut self, query: &str) -> Result<String, JsValue> {
        let cards = self.collection.search(query, &self.filter);
        self.page(true, cards)
    }

    pub fn load_more(&mut self) -> Result<String, JsValue> {
        let cards = self.collection.load_more();
        self.page(false, cards)
    }

    /// `MovieDetail` JSON for a shown card, or `undefined`.
    pub fn detail(&self, position: usize) -> Result<Option<String>, JsValue> {
        self.collection
            .detail(position)
            .map(|detail| {
                serde_json::to_string(&detail)
                    .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
            })
            .transpose()
    }

    fn page(&self, reset: bool, cards: Vec<MovieCard>) -> Result<String, JsValue> {
        let page = CollectionPage {
            reset,
            cards,
            stats: self.collection.stats().to_string(),
            has_more: self.collection.has_more(),
        };
        serde_json::to_string(&page)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{catalog_json, movie};
    use crate::transport::mock::MockTransport;
    use futures::executor::block_on;

    fn tagged(title: &str, genre: &str) -> Movie {
        Movie {
            genre: Some(genre.to_string()),
            ..movie(title)
        }
    }

    fn sample(count_per_genre: usize) -> Collection {
        let mut movies = Vec::new();
        for genre in ["action", "comedy"] {
            for i in 0..count_per_genre {
                movies.push(tagged(&format!("{} {}", genre, i), genre));
            }
        }
        Collection::new(movies)
    }

    #[test]
    fn pages_of_twenty() {
        let mut collection = sample(25);
        assert_eq!(collection.stats(), "50 movies in our collection");

        let first = collection.filter(&GenreFilter::All);
        assert_eq!(first.len(), 20);
        assert!(collection.has_more());
        assert_eq!(collection.load_more().len(), 20);
        assert_eq!(collection.load_more().len(), 10);
        assert!(!collection.has_more());
        assert!(collection.load_more().is_empty());
    }

    #[test]
    fn genre_filter_counts() {
        let mut collection = sample(25);
        let cards = collection.filter(&GenreFilter::parse("comedy"));
        assert_eq!(collection.stats(), "25 Comedy movies");
        assert_eq!(cards[0].title, "comedy 0");
        assert_eq!(collection.matching(), 25);
    }

    #[test]
    fn search_is_case_insensitive_and_ignores_filter() {
        let mut collection = sample(3);
        let cards = collection.search("  ACTION 1 ", &GenreFilter::parse("comedy"));
        assert_eq!(cards.len(), 1);
        assert_eq!(collection.stats(), "Found 1 movie matching \"action 1\"");

        collection.search("o", &GenreFilter::All);
        assert_eq!(collection.stats(), "Found 6 movies matching \"o\"");
    }

    #[test]
    fn blank_search_restores_filter() {
        let mut collection = sample(3);
        collection.search("action", &GenreFilter::All);
        collection.search("   ", &GenreFilter::parse("action"));
        assert_eq!(collection.stats(), "3 Action movies");
    }

    #[test]
    fn detail_only_for_shown_cards() {
        let mut collection = sample(15);
        assert_eq!(collection.detail(0).unwrap().title, "action 0");
        assert!(collection.detail(25).is_none());
        collection.load_more();
        assert_eq!(collection.detail(25).unwrap().title, "comedy 10");
    }

    #[test]
    fn load_tags_genres_and_skips_failures() {
        let mut transport = MockTransport::new();
        for genre in ALL_GENRES {
            transport = transport.respond(&format!("data/{}.json", genre), 200, &catalog_json(genre, 2));
        }
        let transport = transport.fail("data/horror.json");

        let collection = block_on(Collection::load(&transport, &CatalogSource::default()));
        assert_eq!(collection.total(), 12);
        assert_eq!(collection.stats(), "12 movies in our collection");
        assert!(collection
            .movies
            .iter()
            .all(|m| m.genre.as_deref() != Some("horror")));
    }

    #[test]
    fn wasm_browser_pages_json() {
        let movies: Vec<Movie> = (0..21).map(|i| tagged(&format!("m{}", i), "drama")).collect();
        let mut browser =
            CollectionBrowser::new(&serde_json::to_string(&movies).unwrap()).expect("Should parse catalog");

        let first: CollectionPage =
            serde_json::from_str(&browser.initial().expect("Should serialize")).unwrap();
        assert!(first.reset);
        assert_eq!(first.cards.len(), 20);
        assert!(first.has_more);

        let next: CollectionPage =
            serde_json::from_str(&browser.load_more().expect("Should serialize")).unwrap();
        assert!(!next.reset);
        assert_eq!(next.cards.len(), 1);
        assert!(!next.has_more);
    }
}
