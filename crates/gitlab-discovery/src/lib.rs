//! GitLab repository discovery.
//!
//! - `options`: discovery options snapshot and environment parsing.
//! - `client`: authenticated API handle and the HTTP page source.
//! - `pagination`: page cursor, page source capability, and the page walker.
//! - `resolve`: namespace/archived filtering and clone URL resolution.
//! - `credentials`: token embedding for HTTPS clone URLs.
//! - `discovery`: group and user discovery entry points.

pub mod client;
pub mod credentials;
pub mod discovery;
pub mod error;
pub mod options;
pub mod pagination;
pub mod resolve;

pub use client::{DEFAULT_BASE_URL, GitLabClient};
pub use credentials::{HttpsUrl, embed_token};
pub use discovery::{
    discover_group_repos, discover_group_repos_with, discover_user_repos,
    discover_user_repos_with,
};
pub use error::{ClientInitError, CredentialError, DiscoveryError, ListingError};
pub use options::{CloneProtocol, DiscoveryOptions, NamespaceFilter, UNSET_NAMESPACE};
pub use pagination::{PAGE_SIZE, Page, PageCursor, PageRequest, PageSource, Scope, walk_pages};
pub use resolve::{RepositoryRecord, ResolvedRepo, resolve_records};
