// Movie catalog documents: one JSON array per genre under data/.
// Every field except the title is optional; absent fields render as placeholders, never errors.

use std::collections::HashMap;

use futures::future::join_all;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EngineError;
use crate::pool::PosterSource;
use crate::transport::{HttpRequest, Transport};

/// Every genre the prediction model can return, in display order.
pub const ALL_GENRES: [&str; 7] = [
    "action",
    "adventure",
    "comedy",
    "drama",
    "horror",
    "romance",
    "sci-fi",
];

pub const POSTER_PLACEHOLDER_URL: &str =
    "https://via.placeholder.com/300x450/16213e/ffffff?text=No+Poster";

pub const NO_DESCRIPTION: &str = "No description available.";
pub const NOT_AVAILABLE: &str = "Not Available";

/// Provider key -> short badge label, in badge priority order. Cards show at most three.
const CARD_PROVIDERS: [(&str, &str); 6] = [
    ("amazon prime video", "Prime"),
    ("netflix", "Netflix"),
    ("jiohotstar", "Hotstar"),
    ("apple tv store", "Apple TV"),
    ("google play movies", "Google Play"),
    ("youtube", "YouTube"),
];

const CARD_BADGE_LIMIT: usize = 3;

/// Provider key -> full label shown in the detail popup.
const DETAIL_PROVIDERS: [(&str, &str); 9] = [
    ("amazon prime video", "Amazon Prime Video"),
    ("netflix", "Netflix"),
    ("jiohotstar", "JioHotstar"),
    ("apple tv store", "Apple TV"),
    ("google play movies", "Google Play"),
    ("youtube", "YouTube"),
    ("amazon video", "Amazon Video"),
    ("vi movies and tv", "Vi Movies"),
    ("amazon prime video with ads", "Prime (Ads)"),
];

/// One record of a catalog document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Movie {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Lower-cased provider name -> presence flag of any JSON type.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub watch_providers: HashMap<String, serde_json::Value>,
    /// Source genre, set when catalogs from several genres are merged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

/// Catalogs write `null` for unknown values; treat it like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Movie {
    /// Rating to one decimal, or `N/A` when missing or zero.
    pub fn rating_label(&self) -> String {
        match self.rating {
            Some(r) if r != 0.0 && r.is_finite() => format!("{:.1}", r),
            _ => "N/A".to_string(),
        }
    }

    pub fn overview_text(&self) -> &str {
        match self.overview.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }

    pub fn has_provider(&self, key: &str) -> bool {
        self.watch_providers.get(key).is_some_and(is_truthy)
    }

    fn provider_labels(&self, table: &[(&str, &'static str)]) -> Vec<String> {
        table
            .iter()
            .filter(|(key, _)| self.has_provider(key))
            .map(|(_, label)| label.to_string())
            .collect()
    }

    /// Short badges for a result card.
    pub fn card_badges(&self) -> Vec<String> {
        let mut badges = self.provider_labels(&CARD_PROVIDERS);
        badges.truncate(CARD_BADGE_LIMIT);
        badges
    }

    /// Full platform list for the popup.
    pub fn detail_platforms(&self) -> Vec<String> {
        self.provider_labels(&DETAIL_PROVIDERS)
    }
}

impl PosterSource for Movie {
    fn poster(&self) -> Option<&str> {
        self.poster_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// JS truthiness for provider flags.
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// A single `<img>` of a poster wall or marquee row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterTile {
    pub url: String,
    pub alt: String,
}

impl PosterTile {
    /// `None` for movies without a poster; those are skipped at render time.
    pub fn from_movie(movie: &Movie) -> Option<PosterTile> {
        movie.poster().map(|url| PosterTile {
            url: url.to_string(),
            alt: movie.title.clone(),
        })
    }
}

/// View model of a result or collection card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub badges: Vec<String>,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie) -> Self {
        MovieCard {
            title: movie.title.clone(),
            poster_url: movie
                .poster()
                .unwrap_or(POSTER_PLACEHOLDER_URL)
                .to_string(),
            rating: movie.rating_label(),
            badges: movie.card_badges(),
        }
    }
}

/// View model of the detail popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub title: String,
    pub poster_url: String,
    pub rating: String,
    pub overview: String,
    /// Platform labels, or a single `Not Available` entry.
    pub platforms: Vec<String>,
}

impl MovieDetail {
    pub fn from_movie(movie: &Movie) -> Self {
        let mut platforms = movie.detail_platforms();
        if platforms.is_empty() {
            platforms.push(NOT_AVAILABLE.to_string());
        }
        MovieDetail {
            title: movie.title.clone(),
            poster_url: movie
                .poster()
                .unwrap_or(POSTER_PLACEHOLDER_URL)
                .to_string(),
            rating: movie.rating_label(),
            overview: movie.overview_text().to_string(),
            platforms,
        }
    }
}

/// Where catalog documents are served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSource {
    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for CatalogSource {
    fn default() -> Self {
        CatalogSource {
            base_path: default_base_path(),
        }
    }
}

fn default_base_path() -> String {
    "data".to_string()
}

impl CatalogSource {
    pub fn url_for(&self, genre: &str) -> String {
        format!("{}/{}.json", self.base_path.trim_end_matches('/'), genre)
    }

    /// Fetch one genre's catalog. A non-2xx status fails before any parsing.
    pub async fn load_genre<T: Transport>(
        &self,
        transport: &T,
        genre: &str,
    ) -> Result<Vec<Movie>, EngineError> {
        let url = self.url_for(genre);
        let response = transport.send(HttpRequest::get(url.clone())).await?;
        if !response.is_success() {
            return Err(EngineError::HttpStatus {
                url,
                status: response.status,
            });
        }

        let movies: Vec<Movie> = serde_json::from_str(&response.body)?;
        log::debug!("Loaded {} {} movies", movies.len(), genre);
        Ok(movies)
    }

    /// Fetch several genres concurrently and concatenate them in the order given.
    ///
    /// Each genre is isolated: a failure is recorded and logged while the others
    /// still contribute. When `tag_genre` is set every movie remembers its genre.
    pub async fn load_genres<T: Transport>(
        &self,
        transport: &T,
        genres: &[String],
        tag_genre: bool,
    ) -> CatalogBatch {
        let loads = genres.iter().map(|genre| self.load_genre(transport, genre));
        let results = join_all(loads).await;

        let mut batch = CatalogBatch::default();
        for (genre, result) in genres.iter().zip(results) {
            match result {
                Ok(mut movies) => {
                    if tag_genre {
                        for movie in &mut movies {
                            movie.genre = Some(genre.clone());
                        }
                    }
                    batch.movies.extend(movies);
                }
                Err(err) => {
                    log::error!("Failed to load {} movies: {}", genre, err);
                    batch.failures.push(CatalogFailure {
                        genre: genre.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }
        batch
    }
}

/// Result of a multi-genre load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogBatch {
    pub movies: Vec<Movie>,
    pub failures: Vec<CatalogFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFailure {
    pub genre: String,
    pub message: String,
}

/// Uppercase the first character: `sci-fi` -> `Sci-fi`.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
