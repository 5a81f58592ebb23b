use crate::registry::index::VersionMatch;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// These are the supported cli configuration options for the chart publisher.
#[derive(Parser)]
#[command(version)]
#[command(
    about = "Packages Helm charts and pushes them to an Artifactory Helm repository",
    long_about = None
)]
pub(crate) struct CliArgs {
    /// This is the root directory containing one subdirectory per Helm chart.
    #[arg(long, value_name = "DIR_PATH")]
    chart_folder: PathBuf,

    /// This is the name of the target Artifactory Helm repository.
    #[arg(long)]
    repository_name: String,

    /// This is the base URL of the Artifactory instance.
    #[arg(long)]
    artifactory_url: Url,

    /// This is the API key used to authenticate against Artifactory.
    #[arg(long)]
    api_key: String,

    /// If set, charts whose version already exists in the repository are packaged and
    /// pushed again anyway.
    #[arg(long, default_value_t = false)]
    override_charts: bool,

    /// This picks how a chart's version is compared against the versions listed in the
    /// repository index when deciding whether it already exists.
    #[arg(long, value_enum, default_value = "substring")]
    version_match: VersionMatch,
}

impl CliArgs {
    /// This returns the root directory which is scanned for chart subdirectories.
    pub(crate) fn chart_folder(&self) -> PathBuf {
        self.chart_folder.clone()
    }

    /// This returns the name of the target Artifactory Helm repository.
    pub(crate) fn repository_name(&self) -> String {
        self.repository_name.clone()
    }

    /// This returns the base URL of the Artifactory instance.
    pub(crate) fn artifactory_url(&self) -> Url {
        self.artifactory_url.clone()
    }

    /// This returns the Artifactory API key.
    pub(crate) fn api_key(&self) -> String {
        self.api_key.clone()
    }

    /// This returns true if existing chart versions must be republished.
    pub(crate) fn override_charts(&self) -> bool {
        self.override_charts
    }

    /// This returns the version comparison policy for the existence check.
    pub(crate) fn version_match(&self) -> VersionMatch {
        self.version_match
    }
}
