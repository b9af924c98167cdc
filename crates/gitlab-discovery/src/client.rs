use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};

use crate::error::{ClientInitError, ListingError};
use crate::options::DiscoveryOptions;
use crate::pagination::{Page, PageCursor, PageRequest, PageSource, Scope};
use crate::resolve::RepositoryRecord;

pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4/";

const API_PATH: &str = "/api/v4";
const TOKEN_HEADER: &str = "PRIVATE-TOKEN";
const PAGE_HEADER: &str = "x-page";
const TOTAL_PAGES_HEADER: &str = "x-total-pages";
const NEXT_PAGE_HEADER: &str = "x-next-page";

/// Authenticated handle for the GitLab REST API.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_url: Url,
}

impl GitLabClient {
    /// Builds the handle without touching the network.
    pub fn new(token: &str, base_url: Option<&str>) -> Result<Self, ClientInitError> {
        let base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;

        let mut headers = HeaderMap::new();
        if !token.is_empty() {
            let mut value =
                HeaderValue::from_str(token).map_err(|_| ClientInitError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(TOKEN_HEADER, value);
        }

        let http = Client::builder()
            .user_agent(concat!("nils-gitlab-discovery/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()
            .map_err(|error| ClientInitError::Build(error.to_string()))?;

        Ok(Self { http, base_url })
    }

    pub fn from_options(options: &DiscoveryOptions) -> Result<Self, ClientInitError> {
        Self::new(&options.token, options.base_url.as_deref())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn projects_url(&self, scope: &Scope) -> Url {
        let mut url = self.base_url.clone();
        // Base urls are checked to be hierarchical in `normalize_base_url`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            match scope {
                Scope::Group(group) => segments.extend(["groups", group.as_str(), "projects"]),
                Scope::User(user) => segments.extend(["users", user.as_str(), "projects"]),
            };
        }
        url
    }
}

impl PageSource for GitLabClient {
    fn list_page(&self, scope: &Scope, request: PageRequest) -> Result<Page, ListingError> {
        let response = self
            .http
            .get(self.projects_url(scope))
            .query(&build_query_params(scope, request))
            .send()
            .map_err(|source| ListingError::Transport { source })?;

        let status_code = response.status().as_u16();
        let headers = response.headers();
        let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
        let cursor = parse_cursor(
            request.page,
            header(PAGE_HEADER),
            header(TOTAL_PAGES_HEADER),
            header(NEXT_PAGE_HEADER),
        );

        let body = response
            .text()
            .map_err(|source| ListingError::Transport { source })?;

        parse_page_response(status_code, cursor, &body)
    }
}

pub fn normalize_base_url(raw: &str) -> Result<Url, ClientInitError> {
    let trimmed = raw.trim();
    let invalid = || ClientInitError::InvalidBaseUrl(trimmed.to_string());

    let mut url = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(invalid());
    }

    let path = url.path().trim_end_matches('/').to_string();
    let path = if path.ends_with(API_PATH) {
        format!("{path}/")
    } else {
        format!("{path}{API_PATH}/")
    };
    url.set_path(&path);

    Ok(url)
}

pub fn build_query_params(scope: &Scope, request: PageRequest) -> Vec<(String, String)> {
    let mut params = vec![
        ("per_page".to_string(), request.per_page.to_string()),
        ("page".to_string(), request.page.to_string()),
    ];

    if matches!(scope, Scope::Group(_)) {
        params.push(("include_subgroups".to_string(), "true".to_string()));
    }

    params
}

/// GitLab omits `X-Total-Pages` on very large collections. Without it the
/// walk keeps following `X-Next-Page` until that header comes back empty.
pub fn parse_cursor(
    requested_page: u32,
    page: Option<&str>,
    total_pages: Option<&str>,
    next_page: Option<&str>,
) -> PageCursor {
    let parse = |raw: Option<&str>| raw.and_then(|value| value.trim().parse::<u32>().ok());

    let current_page = parse(page).unwrap_or(requested_page);
    let announced_next = parse(next_page);
    let total_pages = parse(total_pages)
        .or(announced_next)
        .unwrap_or(current_page);

    PageCursor {
        current_page,
        total_pages,
        next_page: announced_next.unwrap_or(current_page.saturating_add(1)),
    }
}

pub fn parse_page_response(
    status_code: u16,
    cursor: PageCursor,
    body: &str,
) -> Result<Page, ListingError> {
    if !(200..=299).contains(&status_code) {
        let message = extract_error_message(body).unwrap_or_else(|| format!("HTTP {status_code}"));
        return Err(ListingError::Http {
            status: status_code,
            message,
        });
    }

    let records: Vec<RepositoryRecord> =
        serde_json::from_str(body).map_err(ListingError::InvalidResponse)?;

    Ok(Page { records, cursor })
}

fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;

    [
        value.get("message").and_then(serde_json::Value::as_str),
        value
            .get("error_description")
            .and_then(serde_json::Value::as_str),
        value.get("error").and_then(serde_json::Value::as_str),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|message| !message.is_empty())
    .map(ToOwned::to_owned)
}
