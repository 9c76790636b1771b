#![warn(missing_docs)]
//! Local helper for the GitHub OAuth2 authorization code flow.
//!
//! Starts a plaintext HTTP listener on localhost, hands the user an
//! authorization URL to open in a browser, receives the redirect callback
//! and trades the authorization code for an access token. The token only
//! ever goes to the application log and stdout, never into an HTTP
//! response body.
//! ```rust,no_run
//! # fn main() -> Result<(), hubtoken::Error> {
//! let credentials = hubtoken::Credentials::from_env()?;
//! let auth_url = hubtoken::authorize_url(&credentials)?;
//!
//! hubtoken::start_listener(hubtoken::LISTEN_ADDR, move |code| {
//!     hubtoken::exchange_code(&credentials, code)
//! })?;
//!
//! println!("Browse to {}", auth_url);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod exchange;
mod server;

pub use config::Credentials;
pub use error::Error;
use error::Result;

pub use exchange::{exchange_code, TokenExchange};
pub use server::start_listener;

/// GitHub's authorization endpoint, where the user logs in.
pub const AUTH_URL: &str = "https://github.com/login/oauth/authorize";
/// GitHub's token endpoint, where the code is exchanged.
pub const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
/// Address the local listener binds to.
pub const LISTEN_ADDR: &str = "localhost:8000";
/// Callback address registered with the provider. The token request must
/// carry it byte-for-byte or the provider rejects the exchange.
pub const REDIRECT_URI: &str = "http://localhost:8000/callback";
/// Scope requested during authorization.
pub const SCOPE: &str = "user:email";

/// Builds the authorization URL the user opens in a browser.
pub fn authorize_url(credentials: &Credentials) -> Result<String> {
    let url = url::Url::parse_with_params(
        AUTH_URL,
        &[("scope", SCOPE), ("client_id", credentials.client_id.as_str())],
    )
    .map_err(|_| Error::InvalidUrl)?;

    Ok(url.to_string())
}
