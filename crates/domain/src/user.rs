//! Purchasing user.

use common::UserId;
use serde::{Deserialize, Serialize};

/// A user placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    age: u32,
}

impl User {
    /// Creates a user with a fresh identifier.
    pub fn new(name: impl Into<String>, age: u32) -> Self {
        Self::with_id(UserId::new(), name, age)
    }

    /// Creates a user with a known identifier.
    pub fn with_id(id: UserId, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }
}
