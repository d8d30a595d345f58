use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::Version;
use argon2::password_hash::SaltString;
use sso_core::Hashing;

/// One-way password hashing.
pub trait Hasher: Send + Sync {
    /// Fails only on internal faults, never on password content.
    fn hash(&self, password: &str) -> Result<String, HashError>;
    /// Malformed hashes and mismatches are both `false`.
    fn verify(&self, password: &str, hashword: &str) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),
    #[error("cannot hash password: {0}")]
    Hash(argon2::password_hash::Error),
}

/// Argon2id with a random 16 byte salt per hash.
/// Verification reads the cost parameters embedded in the PHC string,
/// so raising the cost does not invalidate existing hashes.
#[derive(Debug, Clone)]
pub struct Argon {
    params: Params,
}

impl Argon {
    pub fn new(cost: &Hashing) -> Result<Self, HashError> {
        Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map(|params| Self { params })
            .map_err(HashError::Params)
    }
    fn argon(&self) -> Argon2<'_> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Hasher for Argon {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        self.argon()
            .hash_password(password.as_bytes(), &salt())
            .map(|h| h.to_string())
            .map_err(HashError::Hash)
    }
    fn verify(&self, password: &str, hashword: &str) -> bool {
        PasswordHash::new(hashword)
            .ok()
            .as_ref()
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("16 bytes is a valid salt length")
}

#[cfg(test)]
mod tests {
    use super::*;
    fn cheap() -> Argon {
        Argon::new(&Hashing {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }
    #[test]
    fn verifies_own_hash() {
        let argon = cheap();
        let hashword = argon.hash("correct horse").unwrap();
        assert!(argon.verify("correct horse", &hashword));
    }
    #[test]
    fn rejects_other_password() {
        let argon = cheap();
        let hashword = argon.hash("correct horse").unwrap();
        assert!(!argon.verify("battery staple", &hashword));
    }
    #[test]
    fn salts_every_hash() {
        let argon = cheap();
        assert_ne!(argon.hash("same").unwrap(), argon.hash("same").unwrap());
    }
    #[test]
    fn malformed_hash_is_mismatch() {
        let argon = cheap();
        assert!(!argon.verify("anything", ""));
        assert!(!argon.verify("anything", "$2a$10$not-an-argon-hash"));
    }
    #[test]
    fn verifies_across_cost_changes() {
        let hashword = cheap().hash("rotate me").unwrap();
        assert!(Argon::default().verify("rotate me", &hashword));
    }
    #[test]
    fn rejects_impossible_cost() {
        let cost = Hashing {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        };
        assert!(matches!(Argon::new(&cost), Err(HashError::Params(_))));
    }
}
