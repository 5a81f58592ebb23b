use crate::common::error::{ReadingFile, YamlParseFromFile};
use serde::Deserialize;
use snafu::ResultExt;
use std::{
    fs::read,
    path::{Path, PathBuf},
};

/// This struct is used to deserialize a deployment target descriptor file. One descriptor
/// identifies one environment/chart/release combination to render.
#[derive(Deserialize)]
pub(crate) struct DeploymentTarget {
    chart: ChartSpec,
    deployment: DeploymentSpec,
}

/// This is the `chart` section of a descriptor. It locates the chart to render.
#[derive(Deserialize)]
struct ChartSpec {
    /// This is the name of the helm chart.
    name: String,
    /// This is the version of the helm chart, as understood by the chart repository.
    version: String,
    /// This locates the chart: either a `file://` reference relative to the CI
    /// workspace, or the URL of a remote chart repository.
    repository: String,
    /// This is the helm release name the chart is rendered under.
    #[serde(rename(deserialize = "releaseName"))]
    release_name: String,
}

/// This is the `deployment` section of a descriptor. It names the render destination and
/// the value files merged into the chart's templating context.
#[derive(Deserialize)]
struct DeploymentSpec {
    environment: String,
    #[serde(rename(deserialize = "targetName"))]
    target_name: String,
    #[serde(default, rename(deserialize = "valueFiles"))]
    value_files: ValueFiles,
}

/// These are the two ordered lists of value files for one deployment target.
#[derive(Default, Deserialize)]
struct ValueFiles {
    #[serde(default)]
    application: Vec<String>,
    #[serde(default)]
    infrastructure: Vec<String>,
}

impl TryFrom<&Path> for DeploymentTarget {
    type Error = crate::common::error::Error;

    fn try_from(filepath: &Path) -> Result<Self, Self::Error> {
        let buf = read(filepath).context(ReadingFile {
            filepath: filepath.to_path_buf(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile {
            filepath: filepath.to_path_buf(),
        })
    }
}

impl DeploymentTarget {
    /// This is a getter for the helm chart name.
    pub(crate) fn chart_name(&self) -> &str {
        self.chart.name.as_str()
    }

    /// This is a getter for the helm chart version.
    pub(crate) fn chart_version(&self) -> &str {
        self.chart.version.as_str()
    }

    /// This is a getter for the chart repository locator.
    pub(crate) fn chart_repository(&self) -> &str {
        self.chart.repository.as_str()
    }

    /// This is a getter for the helm release name.
    pub(crate) fn release_name(&self) -> &str {
        self.chart.release_name.as_str()
    }

    /// This is a getter for the environment name.
    pub(crate) fn environment(&self) -> &str {
        self.deployment.environment.as_str()
    }

    /// This is a getter for the target name.
    pub(crate) fn target_name(&self) -> &str {
        self.deployment.target_name.as_str()
    }

    /// Value files in templating order: application files first, then infrastructure
    /// files, each list in its original order. Later files take merge precedence per
    /// helm's own value-merging semantics.
    pub(crate) fn ordered_value_files(&self) -> Vec<&str> {
        self.deployment
            .value_files
            .application
            .iter()
            .chain(self.deployment.value_files.infrastructure.iter())
            .map(String::as_str)
            .collect()
    }

    /// This derives the output directory for this deployment target:
    /// `<gen_manifests_path>/<environment>/<releaseName>-<targetName>`.
    pub(crate) fn manifest_dir(&self, gen_manifests_path: &Path) -> PathBuf {
        gen_manifests_path.join(self.environment()).join(format!(
            "{}-{}",
            self.release_name(),
            self.target_name()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::DeploymentTarget;
    use std::path::{Path, PathBuf};

    const DEV_TARGET: &str = r#"
chart:
  name: billing
  version: 1.4.2
  repository: file://charts/billing
  releaseName: billing-api
deployment:
  environment: dev
  targetName: eu-west
  valueFiles:
    application:
      - values/app-base.yaml
      - values/app-dev.yaml
    infrastructure:
      - values/infra-dev.yaml
"#;

    #[test]
    fn parses_descriptor() {
        let target: DeploymentTarget = serde_yaml::from_str(DEV_TARGET).unwrap();
        assert_eq!(target.chart_name(), "billing");
        assert_eq!(target.chart_version(), "1.4.2");
        assert_eq!(target.chart_repository(), "file://charts/billing");
        assert_eq!(target.release_name(), "billing-api");
        assert_eq!(target.environment(), "dev");
        assert_eq!(target.target_name(), "eu-west");
    }

    #[test]
    fn value_files_keep_application_before_infrastructure() {
        let target: DeploymentTarget = serde_yaml::from_str(DEV_TARGET).unwrap();
        assert_eq!(
            target.ordered_value_files(),
            vec![
                "values/app-base.yaml",
                "values/app-dev.yaml",
                "values/infra-dev.yaml"
            ]
        );
    }

    #[test]
    fn missing_value_files_section_defaults_to_empty() {
        let yaml = r#"
chart:
  name: billing
  version: 1.4.2
  repository: https://charts.example.com/stable
  releaseName: billing-api
deployment:
  environment: qa
  targetName: us-east
"#;
        let target: DeploymentTarget = serde_yaml::from_str(yaml).unwrap();
        assert!(target.ordered_value_files().is_empty());
    }

    #[test]
    fn manifest_dir_separates_environments() {
        let dev: DeploymentTarget = serde_yaml::from_str(DEV_TARGET).unwrap();
        let qa: DeploymentTarget =
            serde_yaml::from_str(&DEV_TARGET.replace("environment: dev", "environment: qa"))
                .unwrap();

        let root = Path::new("manifests");
        assert_eq!(
            dev.manifest_dir(root),
            PathBuf::from("manifests/dev/billing-api-eu-west")
        );
        assert_eq!(
            qa.manifest_dir(root),
            PathBuf::from("manifests/qa/billing-api-eu-west")
        );
        assert_ne!(dev.manifest_dir(root), qa.manifest_dir(root));
    }

    #[test]
    fn malformed_descriptor_is_an_error() {
        let result: Result<DeploymentTarget, _> = serde_yaml::from_str("chart: [not, a, mapping");
        assert!(result.is_err());
    }
}
