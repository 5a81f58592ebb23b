use crate::common::error::{U8VectorToString, YamlParseFromSlice};
use clap::ValueEnum;
use serde::Deserialize;
use snafu::ResultExt;
use std::{collections::HashMap, str};

/// This picks how a chart's version is compared against the versions listed in the
/// repository index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum VersionMatch {
    /// An index entry matches when its version contains the chart's version as a
    /// substring. This is the historical behavior of the publisher: e.g. version
    /// `1.2` matches an entry for `1.2.3`.
    Substring,
    /// An index entry matches only when its version equals the chart's version exactly.
    Exact,
}

/// This struct is used to deserialize the repository's index.yaml document.
#[derive(Deserialize)]
pub(crate) struct RegistryIndex {
    /// Mapping from chart name to the records of the versions published for that chart.
    /// An index document without an `entries` key lists no charts at all.
    #[serde(default)]
    entries: HashMap<String, Vec<IndexEntry>>,
}

/// One published chart record listed in the repository index.
#[derive(Deserialize)]
struct IndexEntry {
    #[serde(default)]
    version: String,
}

impl TryFrom<&[u8]> for RegistryIndex {
    type Error = crate::common::error::Error;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        serde_yaml::from_slice(buf).context(YamlParseFromSlice {
            input_yaml: str::from_utf8(buf).context(U8VectorToString)?.to_string(),
        })
    }
}

impl RegistryIndex {
    /// Returns true if the index lists the chart name with at least one record whose
    /// version matches per the configured policy.
    pub(crate) fn contains(
        &self,
        chart_name: &str,
        chart_version: &str,
        policy: VersionMatch,
    ) -> bool {
        self.entries.get(chart_name).map_or(false, |records| {
            records.iter().any(|record| match policy {
                VersionMatch::Substring => record.version.contains(chart_version),
                VersionMatch::Exact => record.version == chart_version,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistryIndex, VersionMatch};

    const INDEX: &str = r#"
apiVersion: v1
entries:
  foo:
    - version: "1.2.3"
    - version: "2.0.0"
"#;

    fn index() -> RegistryIndex {
        RegistryIndex::try_from(INDEX.as_bytes()).unwrap()
    }

    #[test]
    fn listed_version_exists() {
        assert!(index().contains("foo", "1.2.3", VersionMatch::Substring));
        assert!(index().contains("foo", "1.2.3", VersionMatch::Exact));
    }

    #[test]
    fn unlisted_version_does_not_exist() {
        assert!(!index().contains("foo", "9.9.9", VersionMatch::Substring));
        assert!(!index().contains("foo", "9.9.9", VersionMatch::Exact));
    }

    #[test]
    fn unlisted_chart_does_not_exist() {
        assert!(!index().contains("bar", "1.2.3", VersionMatch::Substring));
    }

    #[test]
    fn document_without_entries_lists_nothing() {
        let empty = RegistryIndex::try_from("apiVersion: v1\n".as_bytes()).unwrap();
        assert!(!empty.contains("foo", "1.2.3", VersionMatch::Substring));
    }

    #[test]
    fn substring_policy_is_loose_and_exact_policy_is_not() {
        assert!(index().contains("foo", "1.2", VersionMatch::Substring));
        assert!(!index().contains("foo", "1.2", VersionMatch::Exact));
    }
}
