use crate::{
    common::{
        constants::GEN_MANIFESTS_FILE,
        error::{
            CollectDirEntries, CreateOutputDir, Error, NotADirectory, ReadingDirectoryContents,
            Result, ValidateDirPath, WriteRenderedManifests,
        },
    },
    helm::client::HelmClient,
    opts::CliArgs,
    target::DeploymentTarget,
};
use snafu::{ensure, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

/// This function renders manifests for every valid deployment target descriptor found in
/// the deployment targets directory. A failure in one descriptor is reported and does not
/// abort the processing of its siblings.
pub(crate) fn generate_manifests(opts: &CliArgs) -> Result<()> {
    let targets_dir = opts.deployment_targets_path();
    let metadata = fs::metadata(targets_dir.as_path()).context(ValidateDirPath {
        path: targets_dir.clone(),
    })?;
    ensure!(
        metadata.is_dir(),
        NotADirectory {
            path: targets_dir.clone()
        }
    );

    let helm = HelmClient::new(opts.workspace_path());

    for filepath in sorted_descriptor_files(targets_dir.as_path())? {
        match generate_for_descriptor(&helm, opts, filepath.as_path()) {
            Ok(()) => {}
            // Output directory creation failing for anything other than the directory
            // already existing is unexpected, and aborts the run.
            Err(error @ Error::CreateOutputDir { .. }) => return Err(error),
            Err(error) => {
                error!(%error, filepath = %filepath.display(), "Skipping deployment target");
            }
        }
    }

    Ok(())
}

/// Renders the manifests for a single deployment target descriptor file into
/// `<gen_manifests_path>/<environment>/<releaseName>-<targetName>/gen_manifests.yaml`.
fn generate_for_descriptor(helm: &HelmClient, opts: &CliArgs, filepath: &Path) -> Result<()> {
    let target = DeploymentTarget::try_from(filepath)?;

    info!(
        environment = target.environment(),
        target = target.target_name(),
        release = target.release_name(),
        chart = target.chart_name(),
        "Rendering deployment target"
    );

    let chart_dir = helm.resolve_chart(&target)?;

    let output_dir = target.manifest_dir(opts.gen_manifests_path().as_path());
    // create_dir_all does not error on directories which already exist.
    fs::create_dir_all(output_dir.as_path()).context(CreateOutputDir {
        path: output_dir.clone(),
    })?;

    let workspace_root = opts.workspace_path();
    let value_files: Vec<PathBuf> = target
        .ordered_value_files()
        .into_iter()
        .map(|value_file| workspace_root.join(value_file))
        .collect();

    let rendered = helm.template(target.release_name(), chart_dir.as_path(), &value_files)?;

    let manifest_file = output_dir.join(GEN_MANIFESTS_FILE);
    fs::write(manifest_file.as_path(), rendered).context(WriteRenderedManifests {
        filepath: manifest_file.clone(),
    })?;

    surface_rendered_manifests(&target, manifest_file.as_path());

    Ok(())
}

/// Reads the rendered manifest file back and prints its content to the job console. The
/// read-back going wrong is reported, not fatal: the render itself has already succeeded.
fn surface_rendered_manifests(target: &DeploymentTarget, manifest_file: &Path) {
    match fs::read_to_string(manifest_file) {
        Ok(rendered) => {
            console_logger::info(&format!(
                "Rendered manifests for release '{}' at {}:",
                target.release_name(),
                manifest_file.display()
            ));
            console_logger::data(&rendered);
        }
        Err(error) => {
            console_logger::warn(
                "Could not read back the rendered manifest file:",
                &format!("{}: {}", manifest_file.display(), error),
            );
        }
    }
}

/// Lists the regular files in the deployment targets directory, sorted by path so that
/// processing order does not depend on the platform's directory listing order.
fn sorted_descriptor_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .context(ReadingDirectoryContents {
            path: dir.to_path_buf(),
        })?
        .map(|res| res.map(|e| e.path()))
        .collect::<Result<Vec<_>, std::io::Error>>()
        .context(CollectDirEntries {
            path: dir.to_path_buf(),
        })?;

    let mut files: Vec<PathBuf> = entries.into_iter().filter(|path| path.is_file()).collect();
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{generate_manifests, sorted_descriptor_files};
    use crate::opts::CliArgs;
    use clap::Parser;
    use std::fs;

    #[test]
    fn descriptor_files_are_sorted_and_directories_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("zeta.yaml"), "b").unwrap();
        fs::write(dir.path().join("alpha.yaml"), "a").unwrap();
        fs::write(dir.path().join("mid.yaml"), "m").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let files = sorted_descriptor_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["alpha.yaml", "mid.yaml", "zeta.yaml"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        assert!(sorted_descriptor_files(missing.as_path()).is_err());
    }

    #[test]
    fn invalid_descriptor_does_not_abort_the_run() {
        let workspace = tempfile::tempdir().unwrap();
        let targets = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::write(targets.path().join("broken.yaml"), "chart: [not, a, mapping").unwrap();

        let opts = CliArgs::parse_from([
            "generate-manifests",
            workspace.path().to_str().unwrap(),
            targets.path().to_str().unwrap(),
            output.path().to_str().unwrap(),
        ]);

        assert!(generate_manifests(&opts).is_ok());
    }

    #[test]
    fn missing_targets_directory_aborts_the_run() {
        let workspace = tempfile::tempdir().unwrap();
        let missing = workspace.path().join("no-targets");
        let output = tempfile::tempdir().unwrap();

        let opts = CliArgs::parse_from([
            "generate-manifests",
            workspace.path().to_str().unwrap(),
            missing.to_str().unwrap(),
            output.path().to_str().unwrap(),
        ]);

        assert!(generate_manifests(&opts).is_err());
    }
}
