// Page navigation contract: pages talk to each other only through URL query parameters.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const LANDING_PAGE: &str = "index.html";
pub const SIGN_IN_PAGE: &str = "auth.html";
pub const HOME_PAGE: &str = "home.html";
pub const RESULTS_PAGE: &str = "results.html";

/// Delay before redirecting away from a page that cannot render.
pub const REDIRECT_DELAY_MS: f64 = 2000.0;

/// Landing-page exit fade before moving on to sign-in.
pub const ENTER_TRANSITION_MS: f64 = 1000.0;

/// A navigation the page should perform, possibly after showing a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Redirect {
    pub target: String,
    pub delay_ms: f64,
}

impl Redirect {
    pub fn now(target: impl Into<String>) -> Self {
        Redirect {
            target: target.into(),
            delay_ms: 0.0,
        }
    }

    pub fn after(target: impl Into<String>, delay_ms: f64) -> Self {
        Redirect {
            target: target.into(),
            delay_ms,
        }
    }
}

/// Parameters of the results page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsQuery {
    pub genre: String,
    pub mood: Option<String>,
    /// Prediction confidence in [0, 1].
    pub confidence: Option<f64>,
}

impl ResultsQuery {
    /// `results.html?genre=..&mood=..&confidence=..`, encoded like `encodeURIComponent`.
    pub fn to_url(&self) -> String {
        let confidence = self
            .confidence
            .map(|c| c.to_string())
            .unwrap_or_default();
        format!(
            "{}?genre={}&mood={}&confidence={}",
            RESULTS_PAGE,
            urlencoding::encode(&self.genre),
            urlencoding::encode(self.mood.as_deref().unwrap_or("")),
            confidence
        )
    }

    /// Parse `location.search`. A missing or empty `genre` is a navigation precondition failure.
    pub fn parse(search: &str) -> Result<Self, EngineError> {
        let mut genre = None;
        let mut mood = None;
        let mut confidence = None;

        for (key, value) in query_pairs(search) {
            // First occurrence wins, like URLSearchParams.get.
            match key.as_str() {
                "genre" if genre.is_none() => genre = Some(value),
                "mood" if mood.is_none() => mood = Some(value),
                "confidence" if confidence.is_none() => confidence = Some(value),
                _ => {}
            }
        }

        let genre = genre
            .filter(|g| !g.is_empty())
            .ok_or(EngineError::MissingParameter("genre"))?;

        Ok(ResultsQuery {
            genre,
            mood: mood.filter(|m| !m.is_empty()),
            confidence: confidence.and_then(|c| c.trim().parse::<f64>().ok()),
        })
    }
}

/// Decode `a=1&b=two%20words` into pairs, treating `+` as a space.
pub fn query_pairs(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_results_url() {
        let query = ResultsQuery {
            genre: "horror".into(),
            mood: Some("I want something scary".into()),
            confidence: Some(0.82),
        };
        assert_eq!(
            query.to_url(),
            "results.html?genre=horror&mood=I%20want%20something%20scary&confidence=0.82"
        );
    }

    #[test]
    fn url_without_confidence_keeps_empty_param() {
        let query = ResultsQuery {
            genre: "sci-fi".into(),
            mood: None,
            confidence: None,
        };
        assert_eq!(query.to_url(), "results.html?genre=sci-fi&mood=&confidence=");
    }

    #[test]
    fn parses_results_query() {
        let query =
            ResultsQuery::parse("?genre=horror&mood=I%20want%20something+scary&confidence=0.82")
                .unwrap();
        assert_eq!(query.genre, "horror");
        assert_eq!(query.mood.as_deref(), Some("I want something scary"));
        assert_eq!(query.confidence, Some(0.82));
    }

    #[test]
    fn round_trips_through_url() {
        let query = ResultsQuery {
            genre: "romance".into(),
            mood: Some("rainy day & tea?".into()),
            confidence: Some(0.5),
        };
        let url = query.to_url();
        let search = url.split_once('?').unwrap().1;
        assert_eq!(ResultsQuery::parse(search).unwrap(), query);
    }

    #[test]
    fn missing_genre_is_precondition_failure() {
        assert_eq!(
            ResultsQuery::parse("?mood=happy"),
            Err(EngineError::MissingParameter("genre"))
        );
        assert_eq!(
            ResultsQuery::parse("?genre=&mood=happy"),
            Err(EngineError::MissingParameter("genre"))
        );
        assert!(ResultsQuery::parse("").is_err());
    }

    #[test]
    fn genre_only_query() {
        let query = ResultsQuery::parse("?genre=comedy").unwrap();
        assert_eq!(query.mood, None);
        assert_eq!(query.confidence, None);
    }

    #[test]
    fn malformed_escape_is_kept_raw() {
        let pairs = query_pairs("genre=%E0%A4&x");
        assert_eq!(pairs[0].0, "genre");
        assert_eq!(pairs[1], ("x".to_string(), String::new()));
    }
}
