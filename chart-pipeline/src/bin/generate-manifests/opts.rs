use clap::Parser;
use std::path::PathBuf;

/// These are the supported cli configuration options for the manifest generator.
#[derive(Parser)]
#[command(version)]
#[command(
    about = "Renders Helm chart manifests for a directory of deployment targets",
    long_about = None
)]
pub(crate) struct CliArgs {
    /// This is the CI workspace root. Local chart references and value file paths
    /// resolve against this directory.
    #[arg(value_name = "WORKSPACE_PATH")]
    workspace_path: PathBuf,

    /// This is the directory containing the deployment target descriptor files.
    #[arg(value_name = "DEPLOYMENT_TARGETS_PATH")]
    deployment_targets_path: PathBuf,

    /// This is the directory the rendered manifests are written into.
    #[arg(value_name = "GEN_MANIFESTS_PATH")]
    gen_manifests_path: PathBuf,
}

impl CliArgs {
    /// This returns the CI workspace root directory.
    pub(crate) fn workspace_path(&self) -> PathBuf {
        self.workspace_path.clone()
    }

    /// This returns the directory which is scanned for deployment target descriptors.
    pub(crate) fn deployment_targets_path(&self) -> PathBuf {
        self.deployment_targets_path.clone()
    }

    /// This returns the root directory for the rendered manifest tree.
    pub(crate) fn gen_manifests_path(&self) -> PathBuf {
        self.gen_manifests_path.clone()
    }
}
