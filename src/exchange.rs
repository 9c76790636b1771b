use crate::config::Credentials;
use crate::error::Result;

/// Outcome of a single code-for-token exchange against the provider.
///
/// The payload is returned verbatim; its shape is not validated beyond being
/// JSON, so a provider error object delivered with status 200 passes through
/// as a success.
#[derive(Debug)]
pub struct TokenExchange {
    /// Raw HTTP status returned by the token endpoint.
    pub status: u16,
    /// JSON body of the response, present only on a 200 status.
    pub payload: Option<serde_json::Value>,
    /// Body text of a non-200 response, kept for the error log.
    pub detail: Option<String>,
}

impl TokenExchange {
    /// Whether the provider answered 200. Any other status is a failure.
    pub fn succeeded(&self) -> bool {
        self.status == 200
    }
}

/// Trades an authorization code for an access token.
///
/// One blocking POST to [`TOKEN_URL`](crate::TOKEN_URL) carrying `client_id`,
/// `client_secret`, `code` and `redirect_uri` as query parameters. The
/// `Accept: application/json` header forces a JSON response instead of the
/// provider's form-encoded default. No retries, no explicit timeout.
pub fn exchange_code(credentials: &Credentials, code: &str) -> Result<TokenExchange> {
    exchange_code_at(crate::TOKEN_URL, crate::REDIRECT_URI, credentials, code)
}

fn exchange_code_at(
    token_url: &str,
    redirect_uri: &str,
    credentials: &Credentials,
    code: &str,
) -> Result<TokenExchange> {
    let response = reqwest::blocking::Client::new()
        .post(token_url)
        .query(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ])
        .header(reqwest::header::ACCEPT, "application/json")
        .send()?;

    let status = response.status().as_u16();
    if status != 200 {
        let detail = response.text().ok();
        return Ok(TokenExchange {
            status,
            payload: None,
            detail,
        });
    }

    let payload = response.json()?;

    Ok(TokenExchange {
        status,
        payload: Some(payload),
        detail: None,
    })
}
