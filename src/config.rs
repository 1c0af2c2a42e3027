use serde::Deserialize;

use crate::services::scoring::ScoringWeights;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Minimum raw score for an event to count as recommended
    #[serde(default = "default_admission_threshold")]
    pub admission_threshold: f64,

    /// Multiplier for a label found in the event's genre tags
    #[serde(default = "default_genre_tag_weight")]
    pub genre_tag_weight: f64,

    /// Multiplier for a label matching one of the event's artists
    #[serde(default = "default_artist_weight")]
    pub artist_weight: f64,

    /// Multiplier for a label found in the event name or artist line-up
    #[serde(default = "default_partial_weight")]
    pub partial_weight: f64,

    /// Multiplier applied once per co-occurring subgenre keyword
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,

    /// Multiplier for generic electronic labels on electronic-flagged events
    #[serde(default = "default_electronic_weight")]
    pub electronic_weight: f64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_admission_threshold() -> f64 {
    ScoringWeights::default().admission_threshold
}

fn default_genre_tag_weight() -> f64 {
    ScoringWeights::default().genre_tag
}

fn default_artist_weight() -> f64 {
    ScoringWeights::default().artist
}

fn default_partial_weight() -> f64 {
    ScoringWeights::default().partial
}

fn default_keyword_weight() -> f64 {
    ScoringWeights::default().keyword
}

fn default_electronic_weight() -> f64 {
    ScoringWeights::default().electronic
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the scoring parameters, rejecting negative or non-finite values.
    ///
    /// Negative multipliers would let a heavier listening signal lower an
    /// event's score, so they are refused at startup.
    pub fn scoring_weights(&self) -> anyhow::Result<ScoringWeights> {
        let fields = [
            ("ADMISSION_THRESHOLD", self.admission_threshold),
            ("GENRE_TAG_WEIGHT", self.genre_tag_weight),
            ("ARTIST_WEIGHT", self.artist_weight),
            ("PARTIAL_WEIGHT", self.partial_weight),
            ("KEYWORD_WEIGHT", self.keyword_weight),
            ("ELECTRONIC_WEIGHT", self.electronic_weight),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("{} must be a non-negative number, got {}", name, value);
            }
        }

        Ok(ScoringWeights {
            admission_threshold: self.admission_threshold,
            genre_tag: self.genre_tag_weight,
            artist: self.artist_weight,
            partial: self.partial_weight,
            keyword: self.keyword_weight,
            electronic: self.electronic_weight,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        Self {
            host: default_host(),
            port: default_port(),
            admission_threshold: weights.admission_threshold,
            genre_tag_weight: weights.genre_tag,
            artist_weight: weights.artist,
            partial_weight: weights.partial,
            keyword_weight: weights.keyword,
            electronic_weight: weights.electronic,
        }
    }
}
