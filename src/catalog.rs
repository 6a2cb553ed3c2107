use crate::error::EncounterError;
use crate::tabular;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Leading character that flags a file as an encounter description.
pub const DESCRIPTION_MARKER: &str = "@";
const DESCRIPTION_EXTENSION: &str = "csv";
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpeg", "jpg", "png"];
pub const SUMMARY_FILE_NAME: &str = "_SourceImagesSummary.csv";

/// A candidate encounter description found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionFile {
    pub path: PathBuf,
    pub file_name: String,
    pub modified: OffsetDateTime,
    pub sequence_number: Option<i64>,
}

impl DescriptionFile {
    pub fn new(path: PathBuf, modified: OffsetDateTime) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?.to_string();
        let sequence_number = parse_sequence_number(&file_name);
        Some(Self {
            path,
            file_name,
            modified,
            sequence_number,
        })
    }

    /// Encounter label without marker, sequence segment or extension.
    /// `@_2_KoboldAmbush.csv` and `@KoboldAmbush.csv` both give `KoboldAmbush`,
    /// `@Goblins_3_Night.csv` gives `Goblins_Night`.
    pub fn label(&self) -> String {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.file_name);
        let stem = stem.strip_prefix(DESCRIPTION_MARKER).unwrap_or(stem);
        if self.sequence_number.is_none() {
            return stem.to_string();
        }
        match stem.splitn(3, '_').collect::<Vec<_>>()[..] {
            ["", _, rest] => rest.to_string(),
            [prefix, _, rest] => format!("{prefix}_{rest}"),
            _ => stem.to_string(),
        }
    }
}

pub fn is_description_name(file_name: &str) -> bool {
    file_name.starts_with(DESCRIPTION_MARKER) && has_extension(file_name, &[DESCRIPTION_EXTENSION])
}

pub fn is_image_name(file_name: &str) -> bool {
    has_extension(file_name, &IMAGE_EXTENSIONS)
}

fn has_extension(file_name: &str, accepted: &[&str]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| accepted.iter().any(|a| ext.eq_ignore_ascii_case(a)))
        .unwrap_or(false)
}

/// Parse the disambiguation number from the `_<int>_` segment of a name
/// such as `@_2_Bridge.csv` or `@Goblins_3_Night.csv`. The name must split
/// on `_` into exactly three parts.
pub fn parse_sequence_number(file_name: &str) -> Option<i64> {
    match file_name.split('_').collect::<Vec<_>>()[..] {
        [_, number, _] => number.parse().ok(),
        _ => None,
    }
}

/// Regular files directly inside `dir` (no recursion) whose name passes `keep`,
/// sorted by file name. Raw `read_dir` order differs between platforms.
fn list_files(dir: &Path, keep: fn(&str) -> bool) -> Result<Vec<PathBuf>, EncounterError> {
    let read_dir = fs::read_dir(dir).map_err(|source| EncounterError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<_> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| e.file_name().to_str().map(keep).unwrap_or(false))
        .collect();
    files.sort_by_key(|e| e.file_name());

    Ok(files.into_iter().map(|e| e.path()).collect())
}

pub fn enumerate_descriptions(dir: &Path) -> Result<Vec<DescriptionFile>, EncounterError> {
    let mut descriptions = Vec::new();
    for path in list_files(dir, is_description_name)? {
        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => OffsetDateTime::from(modified),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping description without mtime");
                continue;
            }
        };
        if let Some(description) = DescriptionFile::new(path, modified) {
            descriptions.push(description);
        }
    }
    Ok(descriptions)
}

/// Image assets of `dir`. A missing directory has no assets.
pub fn enumerate_assets(dir: &Path) -> Result<Vec<PathBuf>, EncounterError> {
    if !dir.exists() {
        tracing::warn!(dir = %dir.display(), "image directory not found, using placeholders");
        return Ok(Vec::new());
    }
    list_files(dir, is_image_name)
}

/// Export the base names (without extension) of every asset in `dir`
/// to `_SourceImagesSummary.csv` inside that directory.
pub fn write_asset_summary(dir: &Path) -> Result<PathBuf, EncounterError> {
    let rows: Vec<tabular::Row> = enumerate_assets(dir)?
        .iter()
        .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
        .map(|stem| vec![stem.to_string()])
        .collect();

    let summary_path = dir.join(SUMMARY_FILE_NAME);
    tabular::write_rows(&summary_path, &rows).map_err(|source| EncounterError::WriteTabular {
        path: summary_path.clone(),
        source,
    })?;
    tracing::info!(path = %summary_path.display(), assets = rows.len(), "wrote asset summary");
    Ok(summary_path)
}
