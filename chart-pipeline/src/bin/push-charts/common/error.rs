use reqwest::StatusCode;
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

    /// Error for when yaml could not be parsed from a slice.
    #[snafu(display("Failed to parse YAML {}: {}", input_yaml, source))]
    YamlParseFromSlice {
        source: serde_yaml::Error,
        input_yaml: String,
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

    /// Error for when the `helm dependency update` command returns an error.
    #[snafu(display(
        "`helm dependency update` command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmDependencyUpdateCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when the `helm package` command returns an error.
    #[snafu(display(
        "`helm package` command failed,\ncommand: {},\nargs: {:?},\nstd_err: {}",
        command,
        args,
        std_err
    ))]
    HelmPackageCommand {
        command: String,
        args: Vec<String>,
        std_err: String,
    },

    /// Error for when a Vec<u8> cannot be converted into a String.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted String: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the HTTP client cannot be built.
    #[snafu(display("Failed to build HTTP client: {}", source))]
    HttpClientBuild { source: reqwest::Error },

    /// Error for when the GET request for the repository index fails.
    #[snafu(display("Failed to GET repository index from {}: {}", url, source))]
    IndexRequest {
        source: reqwest_middleware::Error,
        url: String,
    },

    /// Error for when the repository index GET request returns a non-success status.
    #[snafu(display("GET {} returned HTTP status {}", url, status))]
    IndexResponse { url: String, status: StatusCode },

    /// Error for when the repository index response body cannot be read.
    #[snafu(display("Failed to read repository index body from {}: {}", url, source))]
    IndexResponseBody {
        source: reqwest::Error,
        url: String,
    },

    /// Error for when the PUT request uploading a chart archive fails.
    #[snafu(display("Failed to upload chart archive to {}: {}", url, source))]
    ChartUploadRequest {
        source: reqwest_middleware::Error,
        url: String,
    },

    /// Error for when the chart archive upload returns a non-success status.
    #[snafu(display("PUT {} returned HTTP status {}", url, status))]
    ChartUploadResponse { url: String, status: StatusCode },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
