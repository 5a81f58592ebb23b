use crate::{
    chart::Chart,
    common::{
        constants::API_KEY_HEADER,
        error::{
            ChartUploadRequest, ChartUploadResponse, HttpClientBuild, IndexRequest, IndexResponse,
            IndexResponseBody, ReadingFile, Result,
        },
    },
    registry::index::RegistryIndex,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use snafu::{ensure, ResultExt};
use std::{fs, path::Path};
use tracing::debug;
use url::Url;

/// This type makes the HTTP calls against the Artifactory instance: fetching the
/// repository index and uploading packaged chart archives.
pub(crate) struct RegistryClient {
    client: ClientWithMiddleware,
    artifactory_url: Url,
    repository_name: String,
    api_key: String,
}

impl RegistryClient {
    pub(crate) fn new(
        artifactory_url: Url,
        repository_name: String,
        api_key: String,
    ) -> Result<Self> {
        // Retry up to 3 times with increasing intervals between attempts.
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(3);

        let client_config = reqwest::Client::builder()
            .build()
            .context(HttpClientBuild)?;

        Ok(Self {
            client: ClientBuilder::new(client_config)
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build(),
            artifactory_url,
            repository_name,
            api_key,
        })
    }

    /// Fetches and parses the repository's index.yaml document.
    pub(crate) async fn fetch_index(&self) -> Result<RegistryIndex> {
        let url = index_url(&self.artifactory_url, self.repository_name.as_str());

        debug!(%url, "Fetching repository index");

        let response = self
            .client
            .get(url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .send()
            .await
            .context(IndexRequest { url: url.clone() })?;

        ensure!(
            response.status().is_success(),
            IndexResponse {
                url: url.clone(),
                status: response.status()
            }
        );

        let body = response
            .bytes()
            .await
            .context(IndexResponseBody { url })?;

        RegistryIndex::try_from(body.as_ref())
    }

    /// Uploads a packaged chart archive with an HTTP PUT to
    /// `<artifactory-url>/<repository-name>/<chart>/<version>/<chart>-<version>.tgz`.
    pub(crate) async fn upload_chart(&self, chart: &Chart, archive: &Path) -> Result<()> {
        let url = upload_url(&self.artifactory_url, self.repository_name.as_str(), chart);

        let body = fs::read(archive).context(ReadingFile {
            filepath: archive.to_path_buf(),
        })?;

        debug!(%url, archive = %archive.display(), "Uploading chart archive");

        let response = self
            .client
            .put(url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .body(body)
            .send()
            .await
            .context(ChartUploadRequest { url: url.clone() })?;

        ensure!(
            response.status().is_success(),
            ChartUploadResponse {
                url,
                status: response.status()
            }
        );

        Ok(())
    }
}

/// The index document of a Helm repository hosted on Artifactory lives under the
/// `api/helm` route.
fn index_url(artifactory_url: &Url, repository_name: &str) -> String {
    format!(
        "{}/api/helm/{}/index.yaml",
        artifactory_url.as_str().trim_end_matches('/'),
        repository_name
    )
}

fn upload_url(artifactory_url: &Url, repository_name: &str, chart: &Chart) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        artifactory_url.as_str().trim_end_matches('/'),
        repository_name,
        chart.name(),
        chart.version(),
        chart.archive_file_name()
    )
}
