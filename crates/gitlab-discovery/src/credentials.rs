use crate::error::CredentialError;

const HTTPS_SCHEME: &str = "https://";
const TOKEN_USER: &str = "oauth2";

/// A clone URL known to start with `https://`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpsUrl(String);

impl HttpsUrl {
    pub fn parse(raw: &str) -> Result<Self, CredentialError> {
        match raw.strip_prefix(HTTPS_SCHEME) {
            Some(rest) if !rest.is_empty() => Ok(Self(raw.to_string())),
            _ => Err(CredentialError::MissingHttpsScheme(raw.to_string())),
        }
    }

    fn authority_and_path(&self) -> &str {
        &self.0[HTTPS_SCHEME.len()..]
    }
}

/// `https://host/path` + `T` becomes `https://oauth2:T@host/path`.
pub fn embed_token(url: &HttpsUrl, token: &str) -> String {
    format!(
        "{HTTPS_SCHEME}{TOKEN_USER}:{token}@{}",
        url.authority_and_path()
    )
}
