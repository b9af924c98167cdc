use clap::ValueEnum;
use gitlab_discovery::ResolvedRepo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of `{path, url, clone_url}` objects.
    #[default]
    Json,
    /// One `path<TAB>clone_url` line per repo.
    Lines,
}

pub fn render(repos: &[ResolvedRepo], format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string(repos),
        OutputFormat::Lines => Ok(repos
            .iter()
            .map(|repo| format!("{}\t{}", repo.path, repo.clone_url))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
