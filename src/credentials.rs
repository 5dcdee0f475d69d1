use serde::{Deserialize, Serialize};

/// Credentials for the client.
///
/// The application key pair is always required. The user token pair is only present
/// once a user has completed the OAuth handshake; requests are signed whenever it is.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Credentials {
    /// The developer API key, also used as the OAuth consumer key.
    pub api_key: String,
    /// The developer API secret, also used as the OAuth consumer secret.
    pub api_secret: String,
    /// The OAuth token of the user.
    pub oauth_token: Option<String>,
    /// The OAuth token secret of the user.
    pub oauth_token_secret: Option<String>,
}

impl Credentials {
    /// Creates a new set of anonymous `Credentials`.
    pub fn new(api_key: &str, api_secret: &str) -> Credentials {
        Credentials {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
            oauth_token: None,
            oauth_token_secret: None,
        }
    }

    /// Returns a copy of these credentials carrying the given user token pair.
    pub fn with_user_token(mut self, oauth_token: &str, oauth_token_secret: &str) -> Credentials {
        self.oauth_token = Some(oauth_token.to_string());
        self.oauth_token_secret = Some(oauth_token_secret.to_string());
        self
    }

    /// Returns the user token pair, if both halves are present and non-empty.
    pub fn user_token(&self) -> Option<(&str, &str)> {
        match (self.oauth_token.as_deref(), self.oauth_token_secret.as_deref()) {
            (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
                Some((token, secret))
            }
            _ => None,
        }
    }
}
