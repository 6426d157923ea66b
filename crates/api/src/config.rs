use std::env;
use std::time::Duration;

use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub neo4j: Neo4jConfig,
    pub recognizer: RecognizerConfig,
    pub pipeline: PipelineConfig,
    pub retry: RetryConfig,
}

#[derive(Debug, Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Word window handed to the recognizer per chunk.
    pub max_words: usize,
    /// Budget for one file's full pipeline; expiry fails that file only.
    pub file_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            neo4j: Neo4jConfig {
                uri: "bolt://localhost:7687".to_string(),
                user: "neo4j".to_string(),
                password: "neo4j".to_string(),
            },
            recognizer: RecognizerConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout_secs: 30,
            },
            pipeline: PipelineConfig {
                max_words: 500,
                file_timeout_secs: 60,
            },
            retry: RetryConfig {
                max_retries: 3,
                initial_backoff_ms: 500,
                max_backoff_ms: 5000,
            },
        }
    }
}

impl AppConfig {
    /// Environment overrides on top of the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(uri) = env::var("NEO4J_URI") {
            config.neo4j.uri = uri;
        }
        if let Ok(user) = env::var("NEO4J_USER") {
            config.neo4j.user = user;
        }
        if let Ok(password) = env::var("NEO4J_PASSWORD") {
            config.neo4j.password = password;
        }
        if let Ok(url) = env::var("RECOGNIZER_URL") {
            config.recognizer.base_url = url;
        }
        if let Ok(raw) = env::var("CHUNK_MAX_WORDS") {
            match raw.parse::<usize>() {
                Ok(words) if words > 0 => config.pipeline.max_words = words,
                _ => warn!(value = raw, "ignoring invalid CHUNK_MAX_WORDS"),
            }
        }
        config
    }

    pub fn recognizer_timeout(&self) -> Duration {
        Duration::from_secs(self.recognizer.timeout_secs)
    }

    pub fn file_timeout(&self) -> Duration {
        Duration::from_secs(self.pipeline.file_timeout_secs)
    }
}
