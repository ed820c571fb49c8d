//! Reviewer credential verification.
//!
//! The review workflow never sees raw credentials or password hashes; it is
//! handed a [`CredentialVerifier`] capability and an issued-token registry.
//! The production verifier checks an argon2 PHC hash from configuration.

use argon2::{Argon2, PasswordHash, PasswordVerifier};

/// One-method capability: does this username/password pair identify a
/// reviewer? Injected so the workflow stays testable without real secrets.
pub trait CredentialVerifier: Send + Sync {
  fn verify(&self, username: &str, password: &str) -> bool;
}

/// Verifier backed by a configured username and argon2 PHC hash string
/// (e.g. `$argon2id$v=19$…`).
pub struct ArgonVerifier {
  pub username:      String,
  pub password_hash: String,
}

impl CredentialVerifier for ArgonVerifier {
  fn verify(&self, username: &str, password: &str) -> bool {
    if username != self.username {
      return false;
    }
    let Ok(parsed_hash) = PasswordHash::new(&self.password_hash) else {
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed_hash)
      .is_ok()
  }
}

#[cfg(test)]
mod tests {
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use rand_core::OsRng;

  use super::*;

  fn verifier(password: &str) -> ArgonVerifier {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();
    ArgonVerifier {
      username:      "reviewer".to_string(),
      password_hash: hash,
    }
  }

  #[test]
  fn correct_credentials() {
    assert!(verifier("secret").verify("reviewer", "secret"));
  }

  #[test]
  fn wrong_password() {
    assert!(!verifier("secret").verify("reviewer", "wrong"));
  }

  #[test]
  fn wrong_username() {
    assert!(!verifier("secret").verify("admin", "secret"));
  }

  #[test]
  fn malformed_hash_never_verifies() {
    let v = ArgonVerifier {
      username:      "reviewer".to_string(),
      password_hash: "not-a-phc-string".to_string(),
    };
    assert!(!v.verify("reviewer", "anything"));
  }
}
