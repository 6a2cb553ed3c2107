use crate::turn_order::TurnOrder;
use std::path::{Path, PathBuf};

/// What the surface should show for one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetReference {
    /// A located image file
    Image(PathBuf),
    /// No image matched; render a generated card bearing this name
    Placeholder(String),
}

impl AssetReference {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, AssetReference::Placeholder(_))
    }

    /// Title text: image file stem, or the placeholder's name.
    pub fn display_name(&self) -> String {
        match self {
            AssetReference::Image(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            AssetReference::Placeholder(name) => name.clone(),
        }
    }
}

/// Map each name in `order` onto the first asset whose file name contains it.
///
/// Matching is a case-sensitive substring test in `assets` order, so "Rat"
/// also matches `GiantRat.png`. Output has one entry per name, same order.
pub fn resolve(order: &TurnOrder, assets: &[PathBuf]) -> Vec<AssetReference> {
    order
        .iter()
        .map(|name| match first_match(name, assets) {
            Some(path) => AssetReference::Image(path.to_path_buf()),
            None => {
                tracing::debug!(name = %name, "no image found, using placeholder");
                AssetReference::Placeholder(name.clone())
            }
        })
        .collect()
}

fn first_match<'a>(name: &str, assets: &'a [PathBuf]) -> Option<&'a Path> {
    assets
        .iter()
        .find(|path| {
            path.file_name()
                .and_then(|f| f.to_str())
                .is_some_and(|f| f.contains(name))
        })
        .map(PathBuf::as_path)
}
