use crate::{
    common::{
        constants::HELM_COMMAND,
        error::{
            HelmCommand, HelmDependencyUpdateCommand, HelmPackageCommand, Result, U8VectorToString,
        },
    },
    vec_to_strings,
};
use snafu::{ensure, ResultExt};
use std::{path::Path, process::Command, str};
use tracing::debug;

/// Runs command `helm dependency update --skip-refresh`. The chart directory is passed as
/// the subprocess working directory, so the process-wide working directory never changes.
pub(crate) fn dependency_update(chart_dir: &Path) -> Result<()> {
    let command: &str = HELM_COMMAND;
    let args: Vec<String> = vec_to_strings!["dependency", "update", "--skip-refresh"];

    debug!(%command, ?args, chart_dir = %chart_dir.display(), "Helm dependency update command");

    let output = Command::new(command)
        .current_dir(chart_dir)
        .args(args.clone())
        .output()
        .context(HelmCommand {
            command: command.to_string(),
            args: args.clone(),
        })?;

    ensure!(
        output.status.success(),
        HelmDependencyUpdateCommand {
            command: command.to_string(),
            args,
            std_err: str::from_utf8(output.stderr.as_slice())
                .context(U8VectorToString)?
                .to_string()
        }
    );

    Ok(())
}

/// Runs command `helm package .` with the chart directory as the subprocess working
/// directory. The archive lands in the chart directory as `<name>-<version>.tgz`.
pub(crate) fn package(chart_dir: &Path) -> Result<()> {
    let command: &str = HELM_COMMAND;
    let args: Vec<String> = vec_to_strings!["package", "."];

    debug!(%command, ?args, chart_dir = %chart_dir.display(), "Helm package command");

    let output = Command::new(command)
        .current_dir(chart_dir)
        .args(args.clone())
        .output()
        .context(HelmCommand {
            command: command.to_string(),
            args: args.clone(),
        })?;

    ensure!(
        output.status.success(),
        HelmPackageCommand {
            command: command.to_string(),
            args,
            std_err: str::from_utf8(output.stderr.as_slice())
                .context(U8VectorToString)?
                .to_string()
        }
    );

    Ok(())
}
