use crate::{
    chart::Chart,
    common::error::{
        CollectDirEntries, NotADirectory, ReadingDirectoryContents, Result, ValidateDirPath,
    },
    helm::client as helm,
    opts::CliArgs,
    registry::client::RegistryClient,
};
use snafu::{ensure, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, warn};

/// This function walks the chart folder and publishes every chart whose version is not
/// already in the repository (or every chart, with the override flag). A failure in one
/// chart is reported and does not abort the processing of its siblings.
pub(crate) async fn push_charts(opts: &CliArgs) -> Result<()> {
    let chart_folder = opts.chart_folder();
    let metadata = fs::metadata(chart_folder.as_path()).context(ValidateDirPath {
        path: chart_folder.clone(),
    })?;
    ensure!(
        metadata.is_dir(),
        NotADirectory {
            path: chart_folder.clone()
        }
    );

    let registry = RegistryClient::new(
        opts.artifactory_url(),
        opts.repository_name(),
        opts.api_key(),
    )?;

    for chart_dir in sorted_chart_dirs(chart_folder.as_path())? {
        console_logger::info(&format!("Processing chart path: '{}'", chart_dir.display()));

        // Subfolders without valid chart metadata are not an error, they are simply
        // not publishable charts.
        let chart = match Chart::try_from(chart_dir.as_path()) {
            Ok(chart) => chart,
            Err(error) => {
                warn!(%error, path = %chart_dir.display(), "Skipping folder without valid chart metadata");
                continue;
            }
        };

        if let Err(error) = publish_chart(&registry, opts, &chart, chart_dir.as_path()).await {
            error!(
                %error,
                chart = chart.name(),
                version = %chart.version(),
                "Failed to publish chart"
            );
        }
    }

    Ok(())
}

/// Decides whether one chart must be published and, if so, runs the three publish steps
/// in order: dependency update, package, upload. A failing step aborts the remaining
/// steps for this chart; completed steps are not rolled back, so a partially published
/// chart (e.g. packaged but not uploaded) is possible and is cleaned up manually.
async fn publish_chart(
    registry: &RegistryClient,
    opts: &CliArgs,
    chart: &Chart,
    chart_dir: &Path,
) -> Result<()> {
    let index = registry.fetch_index().await?;
    let exists = index.contains(
        chart.name(),
        chart.version().to_string().as_str(),
        opts.version_match(),
    );

    if !should_publish(exists, opts.override_charts()) {
        console_logger::info(&format!(
            "Chart version {} for the chart {} already exists in the repository. Skipping...",
            chart.version(),
            chart.name()
        ));
        return Ok(());
    }

    if exists {
        console_logger::info(&format!(
            "Overriding chart version {} for the chart {} in the repository...",
            chart.version(),
            chart.name()
        ));
    }

    console_logger::info("Updating chart dependencies...");
    helm::dependency_update(chart_dir)?;

    console_logger::info("Building chart...");
    helm::package(chart_dir)?;

    console_logger::info("Pushing chart to registry...");
    let archive = chart_dir.join(chart.archive_file_name());
    registry.upload_chart(chart, archive.as_path()).await?;

    console_logger::done(&format!(
        "Pushed chart {} version {} to the repository",
        chart.name(),
        chart.version()
    ));

    Ok(())
}

/// A chart is published when its version is absent from the repository, or
/// unconditionally when the override flag is set.
fn should_publish(exists: bool, override_charts: bool) -> bool {
    !exists || override_charts
}

/// Lists the immediate subdirectories of the chart folder, sorted by path so that
/// processing order does not depend on the platform's directory listing order.
fn sorted_chart_dirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .context(ReadingDirectoryContents {
            path: dir.to_path_buf(),
        })?
        .map(|res| res.map(|e| e.path()))
        .collect::<Result<Vec<_>, std::io::Error>>()
        .context(CollectDirEntries {
            path: dir.to_path_buf(),
        })?;

    let mut dirs: Vec<PathBuf> = entries.into_iter().filter(|path| path.is_dir()).collect();
    dirs.sort();

    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::{push_charts, should_publish, sorted_chart_dirs};
    use crate::opts::CliArgs;
    use clap::Parser;
    use std::fs;

    #[test]
    fn absent_version_is_published() {
        assert!(should_publish(false, false));
        assert!(should_publish(false, true));
    }

    #[test]
    fn present_version_is_published_only_with_override() {
        assert!(!should_publish(true, false));
        assert!(should_publish(true, true));
    }

    #[test]
    fn chart_dirs_are_sorted_and_files_ignored() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("zeta")).unwrap();
        fs::create_dir(root.path().join("alpha")).unwrap();
        fs::write(root.path().join("README.md"), "not a chart").unwrap();

        let dirs = sorted_chart_dirs(root.path()).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn folder_without_chart_metadata_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("not-a-chart")).unwrap();
        // No version key, so this folder is not a publishable chart.
        fs::write(
            root.path().join("not-a-chart/Chart.yaml"),
            "name: only-a-name\n",
        )
        .unwrap();

        let opts = CliArgs::parse_from([
            "push-charts",
            "--chart-folder",
            root.path().to_str().unwrap(),
            "--repository-name",
            "helm-local",
            "--artifactory-url",
            "https://artifactory.example.com",
            "--api-key",
            "secret",
        ]);

        assert!(push_charts(&opts).await.is_ok());
    }
}
