use std::collections::HashMap;
use std::fmt;

const BASE_URL_ENV: &str = "GITLAB_BASE_URL";
const TOKEN_ENV: &str = "GITLAB_TOKEN";
const NAMESPACE_ENV: &str = "GITLAB_NAMESPACE";
const SKIP_ARCHIVED_ENV: &str = "GITLAB_SKIP_ARCHIVED";
const CLONE_PROTOCOL_ENV: &str = "GITLAB_CLONE_PROTOCOL";

/// Namespace value that disables group-scope filtering.
pub const UNSET_NAMESPACE: &str = "unset";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NamespaceFilter {
    #[default]
    Unset,
    Prefix(String),
}

impl NamespaceFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|value| !value.is_empty()) {
            None => Self::Unset,
            Some(value) if value == UNSET_NAMESPACE => Self::Unset,
            Some(value) => Self::Prefix(value.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloneProtocol {
    Https,
    #[default]
    Ssh,
}

impl CloneProtocol {
    /// Only `https` selects HTTPS; every other value falls back to SSH.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("https") => Self::Https,
            _ => Self::Ssh,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Default)]
pub struct DiscoveryOptions {
    pub base_url: Option<String>,
    pub token: String,
    pub namespace: NamespaceFilter,
    pub skip_archived: bool,
    pub protocol: CloneProtocol,
}

impl DiscoveryOptions {
    pub fn from_env() -> Self {
        Self::from_pairs(std::env::vars())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let env_map: HashMap<String, String> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        let lookup = |key: &str| env_map.get(key).map(String::as_str);

        let base_url = lookup(BASE_URL_ENV)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(ToOwned::to_owned);
        let token = lookup(TOKEN_ENV).map(str::trim).unwrap_or_default().to_string();

        Self {
            base_url,
            token,
            namespace: NamespaceFilter::parse(lookup(NAMESPACE_ENV)),
            skip_archived: parse_flag(lookup(SKIP_ARCHIVED_ENV)),
            protocol: CloneProtocol::parse(lookup(CLONE_PROTOCOL_ENV)),
        }
    }
}

impl fmt::Debug for DiscoveryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() {
            "<empty>"
        } else {
            "<redacted>"
        };
        f.debug_struct("DiscoveryOptions")
            .field("base_url", &self.base_url)
            .field("token", &token)
            .field("namespace", &self.namespace)
            .field("skip_archived", &self.skip_archived)
            .field("protocol", &self.protocol)
            .finish()
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    let Some(value) = raw.map(str::trim) else {
        return false;
    };

    ["true", "1", "yes"]
        .iter()
        .any(|truthy| value.eq_ignore_ascii_case(truthy))
}
