use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::ItemId;

/// A registered account; favorites refer to it through `userId`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: ItemId,
    pub username: String,
    /// `<hex digest>.<salt>`
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl User {
    pub fn verify_password(&self, password: &str) -> bool {
        match self.password_hash.split_once('.') {
            Some((digest, salt)) => password_digest(password, salt) == digest,
            None => false,
        }
    }
}

/// Username/password pair sent to the register and login routes
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn is_valid(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.is_empty()
    }

    /// Salts and hashes the password for storage
    pub fn into_new_user(self) -> NewUser {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = password_digest(&self.password, &salt);
        NewUser {
            username: self.username.trim().to_string(),
            password_hash: format!("{}.{}", digest, salt),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn with_id(self, id: ItemId) -> User {
        User {
            id,
            username: self.username,
            password_hash: self.password_hash,
        }
    }
}

fn password_digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
