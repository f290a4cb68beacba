// Results page: a genre's catalog laid out as three titled rows plus an overflow grid.

use serde::{Deserialize, Serialize};

use crate::catalog::{capitalize, CatalogSource, Movie, MovieCard};
use crate::navigation::{Redirect, ResultsQuery, HOME_PAGE, REDIRECT_DELAY_MS};
use crate::transport::Transport;

pub const ROW_LEN: usize = 5;
pub const MAX_ROWS: usize = 3;

const FALLBACK_ROW_TITLES: [&str; MAX_ROWS] = ["Top Picks", "Fan Favorites", "Must Watch"];

/// Row headings for a genre, in row order.
pub fn row_titles(genre: &str) -> [&'static str; MAX_ROWS] {
    match genre {
        "action" => [
            "Explosions, Stunts & Zero Logic",
            "For When You Need Adrenaline",
            "Cars Go Boom 💥",
        ],
        "adventure" => [
            "Pack Your Bags (Virtually)",
            "Armchair Explorers Unite",
            "Maps, Legends & Plot Armor",
        ],
        "comedy" => [
            "Guaranteed Giggles",
            "Laugh Till You Cry (Maybe)",
            "Your Daily Dose of Dopamine",
        ],
        "drama" => [
            "Bring Tissues 😢",
            "Deeply Meaningful... Probably",
            "Emotions: The Movie",
        ],
        "horror" => [
            "Sleep Is Overrated Anyway",
            "Jump Scares & Bad Decisions",
            "Don't Watch Alone (Seriously)",
        ],
        "romance" => [
            "Love, Lies & Butterflies",
            "Single People: Proceed with Caution",
            "Unrealistic Expectations Ahead ❤️",
        ],
        "sci-fi" => [
            "Space, Science & Plot Holes",
            "When Physics Takes a Day Off",
            "The Future Looks Weird",
        ],
        _ => FALLBACK_ROW_TITLES,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRow {
    pub title: String,
    pub cards: Vec<MovieCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoreGrid {
    pub title: String,
    pub cards: Vec<MovieCard>,
}

/// Rows and overflow grid. Only full rows are shown; a row needs all five movies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ResultsLayout {
    pub rows: Vec<MovieRow>,
    pub more: Option<MoreGrid>,
}

impl ResultsLayout {
    pub fn build(genre: &str, movies: &[Movie]) -> Self {
        let titles = row_titles(genre);
        let rows = movies
            .chunks_exact(ROW_LEN)
            .take(MAX_ROWS)
            .zip(titles)
            .map(|(chunk, title)| MovieRow {
                title: title.to_string(),
                cards: chunk.iter().map(MovieCard::from_movie).collect(),
            })
            .collect();

        let overflow_start = ROW_LEN * MAX_ROWS;
        let more = (movies.len() > overflow_start).then(|| MoreGrid {
            title: format!("More {} Movies", capitalize(genre)),
            cards: movies[overflow_start..]
                .iter()
                .map(MovieCard::from_movie)
                .collect(),
        });

        ResultsLayout { rows, more }
    }

    pub fn card_count(&self) -> usize {
        self.rows.iter().map(|r| r.cards.len()).sum::<usize>()
            + self.more.as_ref().map_or(0, |m| m.cards.len())
    }
}

/// Page heading and the line under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsHeading {
    pub title: String,
    /// `None` keeps the page's static subtitle.
    pub subtitle: Option<String>,
}

impl ResultsHeading {
    pub fn for_query(query: &ResultsQuery) -> Self {
        let subtitle = query.mood.as_deref().map(|mood| {
            match query.confidence {
                Some(confidence) => {
                    format!("Based on: \"{}\" • {:.0}% match", mood, confidence * 100.0)
                }
                None => format!("Based on: \"{}\"", mood),
            }
        });

        ResultsHeading {
            title: format!("{} Movies for You", capitalize(&query.genre)),
            subtitle,
        }
    }

    fn load_failed(genre: &str) -> Self {
        ResultsHeading {
            title: "Oops!".to_string(),
            subtitle: Some(format!("Couldn't load {} movies. Redirecting...", genre)),
        }
    }
}

/// Everything the results page renders, or where it goes instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultsPage {
    Ready {
        heading: ResultsHeading,
        layout: ResultsLayout,
        /// Raw records in display order, for the detail popup.
        movies: Vec<Movie>,
    },
    Failed {
        heading: ResultsHeading,
        redirect: Redirect,
    },
    /// No genre in the URL.
    Redirect { redirect: Redirect },
}

/// Parse the URL, load the genre's catalog, and lay it out.
pub async fn load_results_page<T: Transport>(
    transport: &T,
    source: &CatalogSource,
    search: &str,
) -> ResultsPage {
    let query = match ResultsQuery::parse(search) {
        Ok(query) => query,
        Err(err) => {
            log::error!("Results page: {}", err);
            return ResultsPage::Redirect {
                redirect: Redirect::now(HOME_PAGE),
            };
        }
    };

    match source.load_genre(transport, &query.genre).await {
        Ok(movies) => {
            log::info!("Loaded {} {} movies", movies.len(), query.genre);
            ResultsPage::Ready {
                heading: ResultsHeading::for_query(&query),
                layout: ResultsLayout::build(&query.genre, &movies),
                movies,
            }
        }
        Err(err) => {
            log::error!("Error loading genre movies: {}", err);
            ResultsPage::Failed {
                heading: ResultsHeading::load_failed(&query.genre),
                redirect: Redirect::after(HOME_PAGE, REDIRECT_DELAY_MS),
            }
        }
    }
}
