use crate::error::{Error, Result};

/// Application credentials issued when the OAuth app was registered with the
/// provider. Loaded once at startup and never mutated afterwards, so sharing
/// them across threads needs no synchronization.
#[derive(Clone)]
pub struct Credentials {
    /// Public identifier of the registered application.
    pub client_id: String,
    /// Confidential counterpart of the client id.
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &format_args!("[redacted]"))
            .finish()
    }
}

impl Credentials {
    /// Reads `CLIENT_ID` and `CLIENT_SECRET` from the process environment.
    ///
    /// Fails with [`Error::MissingVar`] naming the first absent variable,
    /// which the caller should treat as fatal before binding the listener.
    pub fn from_env() -> Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let client_id = lookup("CLIENT_ID").ok_or(Error::MissingVar("CLIENT_ID"))?;
        let client_secret = lookup("CLIENT_SECRET").ok_or(Error::MissingVar("CLIENT_SECRET"))?;

        Ok(Credentials {
            client_id,
            client_secret,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_reads_both_credentials() {
        let credentials = Credentials::load(|key| match key {
            "CLIENT_ID" => Some("the-app".to_string()),
            "CLIENT_SECRET" => Some("s3cret".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(credentials.client_id, "the-app");
        assert_eq!(credentials.client_secret, "s3cret");
    }

    #[test]
    fn missing_client_id_is_named() {
        let err = Credentials::load(|_key| None).unwrap_err();
        assert_eq!(err.to_string(), "missing environment variable: CLIENT_ID");
    }

    #[test]
    fn missing_client_secret_is_named() {
        let err = Credentials::load(|key| match key {
            "CLIENT_ID" => Some("the-app".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing environment variable: CLIENT_SECRET"
        );
    }

    #[test]
    fn debug_output_redacts_the_secret() {
        let credentials = Credentials {
            client_id: "the-app".to_string(),
            client_secret: "s3cret".to_string(),
        };

        let formatted = format!("{:?}", credentials);
        assert!(formatted.contains("the-app"));
        assert!(!formatted.contains("s3cret"));
    }
}
