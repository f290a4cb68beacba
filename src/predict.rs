// Mood -> genre prediction against the local classifier service.
// Ports are tried in order; the first well-formed prediction wins. No retries beyond the port list.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::navigation::ResultsQuery;
use crate::storage::{KeyValueStore, Preferences};
use crate::transport::{HttpRequest, Transport};

pub const EMPTY_MOOD_MESSAGE: &str = "Please describe your mood or movie preference!";

/// Free-text mood, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood(String);

impl Mood {
    pub fn parse(raw: &str) -> Option<Mood> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Mood(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Prediction service location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_host")]
    pub host: String,
    /// Tried in order. 5001 avoids the macOS AirPlay receiver on 5000.
    #[serde(default = "default_ports")]
    pub ports: Vec<u16>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            host: default_host(),
            ports: default_ports(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_ports() -> Vec<u16> {
    vec![5001]
}

impl PredictorConfig {
    pub fn predict_url(&self, port: u16) -> String {
        format!("http://{}:{}/predict-genre", self.host, port)
    }

    pub fn health_url(&self, port: u16) -> String {
        format!("http://{}:{}/health", self.host, port)
    }

    /// Health URL of the primary port, quoted in remediation messages.
    pub fn primary_health_url(&self) -> String {
        self.health_url(self.ports.first().copied().unwrap_or(5001))
    }
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    mood: &'a str,
}

/// Successful classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub genre: String,
    /// In [0, 1].
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PredictionReply {
    Failed { error: String },
    Predicted(Prediction),
}

/// `GET /health` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

pub struct GenrePredictor<T> {
    transport: T,
    config: PredictorConfig,
}

impl<T: Transport> GenrePredictor<T> {
    pub fn new(transport: T, config: PredictorConfig) -> Self {
        GenrePredictor { transport, config }
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Ask each configured port in turn. If none answers with a prediction, an
    /// `error` reply from any port wins over transport failures; otherwise the last failure.
    pub async fn predict(&self, mood: &Mood) -> Result<Prediction, EngineError> {
        let body = serde_json::to_string(&PredictionRequest { mood: mood.as_str() })?;
        let mut service_error = None;
        let mut last_error = None;

        for &port in &self.config.ports {
            match self.predict_on(port, &body).await {
                Ok(prediction) => {
                    log::info!(
                        "Predicted genre: {} ({:.1}% confidence)",
                        prediction.genre,
                        prediction.confidence * 100.0
                    );
                    return Ok(prediction);
                }
                Err(err) => {
                    log::warn!("Prediction on port {} failed: {}", port, err);
                    if matches!(err, EngineError::Prediction(_)) && service_error.is_none() {
                        service_error = Some(err);
                    } else {
                        last_error = Some(err);
                    }
                }
            }
        }

        Err(service_error.or(last_error).unwrap_or_else(|| {
            EngineError::InvalidConfig("no prediction ports configured".into())
        }))
    }

    async fn predict_on(&self, port: u16, body: &str) -> Result<Prediction, EngineError> {
        let url = self.config.predict_url(port);
        let response = self
            .transport
            .send(HttpRequest::post_json(url.clone(), body.to_string()))
            .await?;
        if !response.is_success() {
            // The service reports model failures as 4xx/5xx with an error body.
            if let Ok(PredictionReply::Failed { error }) =
                serde_json::from_str::<PredictionReply>(&response.body)
            {
                return Err(EngineError::Prediction(error));
            }
            return Err(EngineError::HttpStatus {
                url,
                status: response.status,
            });
        }

        match serde_json::from_str::<PredictionReply>(&response.body)? {
            PredictionReply::Failed { error } => Err(EngineError::Prediction(error)),
            PredictionReply::Predicted(prediction) => Ok(prediction),
        }
    }

    /// Diagnostic only; never polled.
    pub async fn health(&self, port: u16) -> Result<HealthStatus, EngineError> {
        let url = self.config.health_url(port);
        let response = self.transport.send(HttpRequest::get(url.clone())).await?;
        if !response.is_success() {
            return Err(EngineError::HttpStatus {
                url,
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

/// What the home page does after a mood submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MoodOutcome {
    /// Nothing was sent; show the message.
    Invalid { message: String },
    /// Navigate to the results page.
    Redirect { url: String, prediction: Prediction },
    /// Show a blocking alert with the message.
    Failed { message: String },
}

/// Validate, predict, remember the confidence, and build the results URL.
pub async fn submit_mood<T: Transport, S: KeyValueStore>(
    predictor: &GenrePredictor<T>,
    preferences: &mut Preferences<S>,
    raw_mood: &str,
) -> MoodOutcome {
    let Some(mood) = Mood::parse(raw_mood) else {
        return MoodOutcome::Invalid {
            message: EMPTY_MOOD_MESSAGE.to_string(),
        };
    };

    let prediction = match predictor.predict(&mood).await {
        Ok(prediction) => prediction,
        Err(err) => {
            log::error!("Mood submission failed: {}", err);
            return MoodOutcome::Failed {
                message: failure_message(&err, predictor.config()),
            };
        }
    };

    if let Err(err) = preferences.set_last_confidence(prediction.confidence) {
        log::warn!("Could not persist confidence: {}", err);
    }

    let query = ResultsQuery {
        genre: prediction.genre.clone(),
        mood: Some(mood.as_str().to_string()),
        confidence: preferences.last_confidence().or(Some(prediction.confidence)),
    };

    MoodOutcome::Redirect {
        url: query.to_url(),
        prediction,
    }
}

/// User-facing text for a failed prediction.
pub fn failure_message(err: &EngineError, config: &PredictorConfig) -> String {
    match err {
        EngineError::Prediction(message) => format!("Error: {}", message),
        _ => format!(
            "Failed to connect to genre prediction service.\n\n\
             1. In a terminal, go to the cinemood folder and run:\n   python app.py\n\n\
             2. Check the server: open {} in your browser (should show {{\"status\":\"ok\"}}).\n\n\
             3. Then try your mood again here.",
            config.primary_health_url()
        ),
    }
}
