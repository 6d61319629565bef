#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use snaplink::config::Config;
use snaplink::domain::clock::Clock;
use snaplink::infrastructure::persistence::InMemoryLinkRepository;
use snaplink::server::build_state;
use snaplink::state::AppState;
use snaplink::utils::code_generator::{DEFAULT_CODE_LENGTH, DEFAULT_CUSTOM_CODE_PATTERN};

pub const BASE_URL: &str = "https://sho.rt";

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        let start = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        Arc::new(Self {
            now: Mutex::new(start),
        })
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        jwt_secret: "integration-test-secret".to_string(),
        jwt_ttl_hours: 1,
        public_base_url: Some(BASE_URL.to_string()),
        code_length: DEFAULT_CODE_LENGTH,
        max_code_attempts: 100,
        custom_code_pattern: DEFAULT_CUSTOM_CODE_PATTERN.to_string(),
        sweep_interval_seconds: 0,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/public").to_string(),
    }
}

/// State over a manual clock, with short URLs built from [`BASE_URL`].
pub fn create_test_state() -> (AppState, Arc<ManualClock>) {
    let clock = ManualClock::new();
    let (state, _) = build_state(&test_config(), clock.clone()).unwrap();
    (state, clock)
}

/// Same as [`create_test_state`], but also hands back the link repository.
pub fn create_test_state_with_repository()
-> (AppState, Arc<ManualClock>, Arc<InMemoryLinkRepository>) {
    let clock = ManualClock::new();
    let (state, repository) = build_state(&test_config(), clock.clone()).unwrap();
    (state, clock, repository)
}

/// Registers `username` and returns its bearer token.
pub async fn token_for(state: &AppState, username: &str) -> String {
    state
        .auth_service
        .register(username, "password123")
        .await
        .unwrap()
        .token
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
