use crate::common::{
    constants::CHART_METADATA_FILE,
    error::{ReadingFile, YamlParseFromFile},
};
use semver::Version;
use serde::Deserialize;
use snafu::ResultExt;
use std::{fs::read, path::Path};

/// This struct is used to deserialize a helm chart's Chart.yaml file.
#[derive(Deserialize)]
pub(crate) struct Chart {
    /// This is the name of the helm chart.
    name: String,
    /// This is the version of the helm chart.
    version: Version,
}

impl Chart {
    /// This is a getter for the helm chart name.
    pub(crate) fn name(&self) -> &str {
        self.name.as_str()
    }

    /// This is a getter for the helm chart version.
    pub(crate) fn version(&self) -> &Version {
        &self.version
    }

    /// This is the file name `helm package` gives the packaged chart archive.
    pub(crate) fn archive_file_name(&self) -> String {
        format!("{}-{}.tgz", self.name, self.version)
    }
}

impl TryFrom<&Path> for Chart {
    type Error = crate::common::error::Error;

    /// Reads the Chart.yaml inside a chart directory. A missing file, a missing
    /// name/version key, or an unparseable version all fail here, which makes the
    /// chart folder ineligible for publishing.
    fn try_from(chart_dir: &Path) -> Result<Self, Self::Error> {
        let filepath = chart_dir.join(CHART_METADATA_FILE);
        let buf = read(filepath.as_path()).context(ReadingFile {
            filepath: filepath.clone(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile { filepath })
    }
}

#[cfg(test)]
mod tests {
    use super::Chart;
    use std::fs;

    #[test]
    fn reads_chart_metadata_from_chart_yaml() {
        let chart_dir = tempfile::tempdir().unwrap();
        fs::write(
            chart_dir.path().join("Chart.yaml"),
            "apiVersion: v2\nname: billing\nversion: 1.4.2\n",
        )
        .unwrap();

        let chart = Chart::try_from(chart_dir.path()).unwrap();
        assert_eq!(chart.name(), "billing");
        assert_eq!(chart.version().to_string(), "1.4.2");
        assert_eq!(chart.archive_file_name(), "billing-1.4.2.tgz");
    }

    #[test]
    fn missing_version_key_is_an_error() {
        let chart_dir = tempfile::tempdir().unwrap();
        fs::write(chart_dir.path().join("Chart.yaml"), "name: billing\n").unwrap();

        assert!(Chart::try_from(chart_dir.path()).is_err());
    }

    #[test]
    fn missing_chart_yaml_is_an_error() {
        let chart_dir = tempfile::tempdir().unwrap();
        assert!(Chart::try_from(chart_dir.path()).is_err());
    }

    #[test]
    fn unparseable_version_is_an_error() {
        let chart_dir = tempfile::tempdir().unwrap();
        fs::write(
            chart_dir.path().join("Chart.yaml"),
            "name: billing\nversion: not-semver\n",
        )
        .unwrap();

        assert!(Chart::try_from(chart_dir.path()).is_err());
    }
}
