use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::{HttpsUrl, embed_token};
use crate::error::CredentialError;
use crate::options::{CloneProtocol, DiscoveryOptions, NamespaceFilter};
use crate::pagination::Scope;

/// Project fields as returned by the GitLab projects API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositoryRecord {
    pub path_with_namespace: String,
    #[serde(default)]
    pub http_url_to_repo: String,
    #[serde(default)]
    pub ssh_url_to_repo: String,
    #[serde(default)]
    pub archived: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRepo {
    pub path: String,
    pub url: String,
    pub clone_url: String,
}

/// Filters raw records and computes clone targets, keeping encounter order.
pub fn resolve_records(
    records: Vec<RepositoryRecord>,
    scope: &Scope,
    options: &DiscoveryOptions,
) -> Result<Vec<ResolvedRepo>, CredentialError> {
    let prefix = match (scope, &options.namespace) {
        (Scope::Group(_), NamespaceFilter::Prefix(prefix)) => Some(prefix.to_lowercase()),
        _ => None,
    };

    let mut resolved = Vec::with_capacity(records.len());
    for record in records {
        let in_namespace = prefix
            .as_deref()
            .is_none_or(|prefix| record.path_with_namespace.to_lowercase().starts_with(prefix));
        if !in_namespace {
            debug!(path = %record.path_with_namespace, "skipping repo outside namespace");
            continue;
        }

        if options.skip_archived && record.archived {
            debug!(path = %record.path_with_namespace, "skipping archived repo");
            continue;
        }

        resolved.push(resolve_record(record, options)?);
    }

    Ok(resolved)
}

fn resolve_record(
    record: RepositoryRecord,
    options: &DiscoveryOptions,
) -> Result<ResolvedRepo, CredentialError> {
    match options.protocol {
        CloneProtocol::Https => {
            let https_url = HttpsUrl::parse(&record.http_url_to_repo)?;
            Ok(ResolvedRepo {
                path: record.path_with_namespace,
                clone_url: embed_token(&https_url, &options.token),
                url: record.http_url_to_repo,
            })
        }
        CloneProtocol::Ssh => Ok(ResolvedRepo {
            path: record.path_with_namespace,
            url: record.ssh_url_to_repo.clone(),
            clone_url: record.ssh_url_to_repo,
        }),
    }
}
