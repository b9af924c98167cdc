use tracing::info;

use crate::client::GitLabClient;
use crate::error::DiscoveryError;
use crate::options::{DiscoveryOptions, NamespaceFilter};
use crate::pagination::{PageSource, Scope, walk_pages};
use crate::resolve::{ResolvedRepo, resolve_records};

const UNSET_NAMESPACE_NOTICE: &str =
    "no namespace set, to reduce results set GITLAB_NAMESPACE, e.g. gitlab-org/security-products";

/// Lists every project of `group` and its subgroups as clone targets.
pub fn discover_group_repos(
    group: &str,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, DiscoveryError> {
    let client = GitLabClient::from_options(options)?;
    discover_group_repos_with(&client, group, options)
}

/// Lists every project owned by `user` as clone targets.
pub fn discover_user_repos(
    user: &str,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, DiscoveryError> {
    let client = GitLabClient::from_options(options)?;
    discover_user_repos_with(&client, user, options)
}

pub fn discover_group_repos_with<S>(
    source: &S,
    group: &str,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, DiscoveryError>
where
    S: PageSource + ?Sized,
{
    if options.namespace == NamespaceFilter::Unset {
        info!("{UNSET_NAMESPACE_NOTICE}");
    }

    let scope = Scope::Group(group.to_string());
    let records = walk_pages(source, &scope)?;
    Ok(resolve_records(records, &scope, options)?)
}

pub fn discover_user_repos_with<S>(
    source: &S,
    user: &str,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, DiscoveryError>
where
    S: PageSource + ?Sized,
{
    let scope = Scope::User(user.to_string());
    let records = walk_pages(source, &scope)?;
    Ok(resolve_records(records, &scope, options)?)
}
