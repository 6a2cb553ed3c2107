//! Picks one encounter description when several are present.

use crate::catalog::DescriptionFile;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How to choose between several eligible description files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Highest number in an `@_<n>_<label>.csv` name wins
    #[serde(alias = "num")]
    #[value(alias = "num")]
    BySequenceNumber,
    /// Most recently modified file wins
    #[default]
    #[serde(alias = "mod")]
    #[value(alias = "mod")]
    ByRecency,
}

/// Select a single description. `None` only when `descriptions` is empty.
///
/// Equal sequence numbers or equal modification times resolve to the
/// lexically smallest file name.
pub fn select(descriptions: &[DescriptionFile], policy: SelectionPolicy) -> Option<&DescriptionFile> {
    if let [only] = descriptions {
        return Some(only);
    }

    if policy == SelectionPolicy::BySequenceNumber {
        let numbered = descriptions
            .iter()
            .filter_map(|d| d.sequence_number.map(|n| (n, d)))
            .max_by(|(a, da), (b, db)| a.cmp(b).then_with(|| by_name_desc(da, db)));
        if let Some((_, description)) = numbered {
            return Some(description);
        }
        tracing::debug!("no numbered descriptions, falling back to recency");
    }

    descriptions
        .iter()
        .max_by(|a, b| a.modified.cmp(&b.modified).then_with(|| by_name_desc(a, b)))
}

// smaller name ranks higher so `max_by` prefers it
fn by_name_desc(a: &DescriptionFile, b: &DescriptionFile) -> Ordering {
    b.file_name.cmp(&a.file_name)
}
