/// Contains the Artifactory HTTP client.
pub(crate) mod client;

/// Contains the repository index model and the version-existence check.
pub(crate) mod index;
