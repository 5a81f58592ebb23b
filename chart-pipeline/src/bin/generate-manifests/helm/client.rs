use crate::{
    common::{
        constants::{CHART_CACHE_DIR, FILE_SCHEME_PREFIX, HELM_COMMAND, HELM_REPO_NAME_SUFFIX},
        error::{
            HelmCommand, HelmPullCommand, HelmRepoAddCommand, HelmTemplateCommand, Result,
            U8VectorToString,
        },
    },
    target::DeploymentTarget,
    vec_to_strings,
};
use snafu::{ensure, ResultExt};
use std::{
    path::{Path, PathBuf},
    process::Command,
    str,
};
use tracing::debug;

/// This type has functions which execute helm commands to resolve charts and render their
/// manifests.
pub(crate) struct HelmClient {
    workspace_root: PathBuf,
    chart_cache_dir: PathBuf,
}

impl HelmClient {
    pub(crate) fn new(workspace_root: PathBuf) -> Self {
        let chart_cache_dir = workspace_root.join(CHART_CACHE_DIR);
        Self {
            workspace_root,
            chart_cache_dir,
        }
    }

    /// Resolves a deployment target's chart reference to a chart directory on disk.
    /// A `file://` reference resolves against the workspace root without any helm
    /// repository interaction. Anything else is treated as a remote chart repository:
    /// the repository is registered under a name synthesized from the chart name, and
    /// the exact requested chart version is pulled and untarred into the shared cache
    /// directory.
    pub(crate) fn resolve_chart(&self, target: &DeploymentTarget) -> Result<PathBuf> {
        if let Some(relative) = local_chart_reference(target.chart_repository()) {
            return Ok(self.workspace_root.join(relative));
        }

        let repo_name = format!("{}{}", target.chart_name(), HELM_REPO_NAME_SUFFIX);
        self.repo_add(repo_name.as_str(), target.chart_repository())?;
        self.pull(
            repo_name.as_str(),
            target.chart_name(),
            target.chart_version(),
        )?;

        Ok(self.chart_cache_dir.join(target.chart_name()))
    }

    /// Runs command `helm repo add <repo_name> <repo_url>`. Re-registering the same name
    /// overwrites the previous entry, which keeps the run stateless.
    fn repo_add(&self, repo_name: &str, repo_url: &str) -> Result<()> {
        let command: &str = HELM_COMMAND;
        let args = repo_add_args(repo_name, repo_url);

        debug!(%command, ?args, "Helm repo add command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        ensure!(
            output.status.success(),
            HelmRepoAddCommand {
                command: command.to_string(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        Ok(())
    }

    /// Runs command `helm pull <repo_name>/<chart_name> --version <version> --untar
    /// --untardir <cache>`. The pull requests exactly the descriptor's version; there is
    /// no fallback to another version on failure.
    fn pull(&self, repo_name: &str, chart_name: &str, chart_version: &str) -> Result<()> {
        let command: &str = HELM_COMMAND;
        let args = pull_args(
            repo_name,
            chart_name,
            chart_version,
            self.chart_cache_dir.as_path(),
        );

        debug!(%command, ?args, "Helm pull command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        ensure!(
            output.status.success(),
            HelmPullCommand {
                command: command.to_string(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        Ok(())
    }

    /// Runs command `helm template <release_name> <chart_dir> --values <file>...` and
    /// returns its standard output verbatim.
    pub(crate) fn template(
        &self,
        release_name: &str,
        chart_dir: &Path,
        value_files: &[PathBuf],
    ) -> Result<Vec<u8>> {
        let command: &str = HELM_COMMAND;
        let args = template_args(release_name, chart_dir, value_files);

        debug!(%command, ?args, "Helm template command");

        let output = Command::new(command)
            .args(args.clone())
            .output()
            .context(HelmCommand {
                command: command.to_string(),
                args: args.clone(),
            })?;

        ensure!(
            output.status.success(),
            HelmTemplateCommand {
                command: command.to_string(),
                args,
                std_err: str::from_utf8(output.stderr.as_slice())
                    .context(U8VectorToString)?
                    .to_string()
            }
        );

        Ok(output.stdout)
    }
}

/// Returns the relative path carried by a `file://` chart reference, or None for a
/// remote chart repository URL.
fn local_chart_reference(repository: &str) -> Option<&str> {
    repository.strip_prefix(FILE_SCHEME_PREFIX)
}

fn repo_add_args(repo_name: &str, repo_url: &str) -> Vec<String> {
    vec_to_strings!["repo", "add", repo_name, repo_url]
}

fn pull_args(
    repo_name: &str,
    chart_name: &str,
    chart_version: &str,
    untar_dir: &Path,
) -> Vec<String> {
    vec_to_strings![
        "pull",
        format!("{repo_name}/{chart_name}"),
        "--version",
        chart_version,
        "--untar",
        "--untardir",
        untar_dir.to_string_lossy()
    ]
}

/// The `--values` flags are emitted in the order the caller provides the files: helm
/// gives later files merge precedence, so callers control override priority through
/// list order.
fn template_args(release_name: &str, chart_dir: &Path, value_files: &[PathBuf]) -> Vec<String> {
    let mut args: Vec<String> =
        vec_to_strings!["template", release_name, chart_dir.to_string_lossy()];

    for value_file in value_files {
        args.push("--values".to_string());
        args.push(value_file.to_string_lossy().to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::{local_chart_reference, pull_args, repo_add_args, template_args, HelmClient};
    use crate::target::DeploymentTarget;
    use std::path::{Path, PathBuf};

    #[test]
    fn file_scheme_resolves_against_workspace_root() {
        let yaml = r#"
chart:
  name: billing
  version: 1.4.2
  repository: file://charts/billing
  releaseName: billing-api
deployment:
  environment: dev
  targetName: eu-west
"#;
        let target: DeploymentTarget = serde_yaml::from_str(yaml).unwrap();
        let client = HelmClient::new(PathBuf::from("/workspace"));

        // No repo add/pull runs on this path, so resolution must not touch helm at all.
        let chart_dir = client.resolve_chart(&target).unwrap();
        assert_eq!(chart_dir, PathBuf::from("/workspace/charts/billing"));
    }

    #[test]
    fn remote_reference_is_not_local() {
        assert_eq!(local_chart_reference("https://charts.example.com"), None);
        assert_eq!(
            local_chart_reference("file://charts/billing"),
            Some("charts/billing")
        );
    }

    #[test]
    fn repo_add_args_register_the_url() {
        assert_eq!(
            repo_add_args("billing-repo", "https://charts.example.com/stable"),
            vec!["repo", "add", "billing-repo", "https://charts.example.com/stable"]
        );
    }

    #[test]
    fn pull_args_request_the_exact_version() {
        let args = pull_args(
            "billing-repo",
            "billing",
            "1.4.2",
            Path::new("/workspace/downloaded-charts"),
        );
        assert_eq!(
            args,
            vec![
                "pull",
                "billing-repo/billing",
                "--version",
                "1.4.2",
                "--untar",
                "--untardir",
                "/workspace/downloaded-charts"
            ]
        );
    }

    #[test]
    fn template_args_keep_value_file_order() {
        let value_files = vec![
            PathBuf::from("/ws/values/app-base.yaml"),
            PathBuf::from("/ws/values/app-dev.yaml"),
            PathBuf::from("/ws/values/infra-dev.yaml"),
        ];
        let args = template_args("billing-api", Path::new("/ws/charts/billing"), &value_files);

        assert_eq!(
            args,
            vec![
                "template",
                "billing-api",
                "/ws/charts/billing",
                "--values",
                "/ws/values/app-base.yaml",
                "--values",
                "/ws/values/app-dev.yaml",
                "--values",
                "/ws/values/infra-dev.yaml"
            ]
        );
    }

    #[test]
    fn template_args_without_value_files() {
        let args = template_args("billing-api", Path::new("/ws/charts/billing"), &[]);
        assert_eq!(args, vec!["template", "billing-api", "/ws/charts/billing"]);
    }
}
