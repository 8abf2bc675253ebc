//! Argon2 password hashing, off the async threads.

use rand::Rng;
use tokio::task;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("hashing failed: {0}")]
    Hash(#[from] argon2::Error),
    #[error("hashing task aborted")]
    Join(#[from] task::JoinError),
}

/// Hash with a fresh random salt. Runs on the blocking pool; argon2 takes
/// tens of milliseconds per call.
pub async fn hash(password: String) -> Result<String, PasswordError> {
    let encoded = task::spawn_blocking(move || {
        let salt: [u8; 16] = rand::thread_rng().r#gen();
        argon2::hash_encoded(password.as_bytes(), &salt, &argon2::Config::default())
    })
    .await??;
    Ok(encoded)
}

pub async fn verify(encoded: String, password: String) -> Result<bool, PasswordError> {
    let matches =
        task::spawn_blocking(move || argon2::verify_encoded(&encoded, password.as_bytes()))
            .await??;
    Ok(matches)
}
