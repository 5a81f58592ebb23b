/// This is the name of the binary used for chart repository and templating commands.
pub(crate) const HELM_COMMAND: &str = "helm";

/// This is the URL scheme prefix identifying a chart that is local to the CI workspace.
pub(crate) const FILE_SCHEME_PREFIX: &str = "file://";

/// This is the suffix appended to a chart's name to synthesize the name its remote
/// repository is registered under.
pub(crate) const HELM_REPO_NAME_SUFFIX: &str = "-repo";

/// This is the workspace subdirectory which remote charts are pulled and untarred into.
/// It is shared by all deployment targets of a run.
pub(crate) const CHART_CACHE_DIR: &str = "downloaded-charts";

/// This is the file name of the rendered manifests written for each deployment target.
pub(crate) const GEN_MANIFESTS_FILE: &str = "gen_manifests.yaml";
