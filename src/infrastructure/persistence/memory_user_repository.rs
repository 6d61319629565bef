//! In-memory implementation of the user repository.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::clock::Clock;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Accounts held in process memory, keyed by username.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        match users.entry(new_user.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(
                "Username already exists",
                json!({ "username": new_user.username }),
            )),
            Entry::Vacant(slot) => {
                let user = User {
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    created_at: self.clock.now(),
                };
                Ok(slot.insert(user).clone())
            }
        }
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }
}
