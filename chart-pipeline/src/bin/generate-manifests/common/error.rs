use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub(crate) enum Error {
    /// Error for when the path to a directory cannot be validated.
    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path is not that of a directory.
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    /// Error for when the contents of a directory cannot be listed.
    #[snafu(display("Failed to read directory contents at {}: {}", path.display(), source))]
    ReadingDirectoryContents {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the entries of a directory listing cannot be collected.
    #[snafu(display("Failed to collect entries in directory {}: {}", path.display(), source))]
    CollectDirEntries {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when a file cannot be read.
    #[snafu(display("Failed to read file {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when yaml could not be parsed from a file (Reader).
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when a Helm command fails.
    #[snafu(display(
        "Failed to run Helm command,\ncommand: {},\nargs: {:?},\ncommand_error: {}",
        command,
        args,
        source
    ))]
    HelmCommand {
        source: std::io::Error,
        command: String,
        args: Vec<String>,
    },

    /// Error for when the `helm repo add` command returns an error.
    #[snafu(display(
        "`helm repo add` command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmRepoAddCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm pull` command returns an error.
    #[snafu(display(
        "`helm pull` command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmPullCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm template` command returns an error.
    #[snafu(display(
        "`helm template` command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmTemplateCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when a Vec<u8> cannot be converted into a String.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted String: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the output directory for a deployment target cannot be created.
    /// A directory which already exists is not an error.
    #[snafu(display("Failed to create output directory {}: {}", path.display(), source))]
    CreateOutputDir {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the rendered manifests cannot be written to the output file.
    #[snafu(display("Failed to write rendered manifests to {}: {}", filepath.display(), source))]
    WriteRenderedManifests {
        source: std::io::Error,
        filepath: PathBuf,
    },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
