/// This is the name of the binary used for chart dependency and packaging commands.
pub(crate) const HELM_COMMAND: &str = "helm";

/// This is the file which carries a chart's name and version metadata.
pub(crate) const CHART_METADATA_FILE: &str = "Chart.yaml";

/// This is the HTTP header which carries the Artifactory API key.
pub(crate) const API_KEY_HEADER: &str = "X-JFrog-Art-Api";
