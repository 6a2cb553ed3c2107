use crate::assets::{self, AssetReference};
use crate::catalog::{self, DescriptionFile};
use crate::error::EncounterError;
use crate::selector::{self, SelectionPolicy};
use crate::tabular;
use crate::turn_order::{self, TurnOrder};
use std::path::Path;

/// Result of the load phase: the chosen description and its display sequence.
#[derive(Debug, Clone)]
pub struct LoadedEncounter {
    pub source: DescriptionFile,
    pub order: TurnOrder,
    /// One entry per `order` name, same order
    pub sequence: Vec<AssetReference>,
}

impl LoadedEncounter {
    pub fn placeholder_count(&self) -> usize {
        self.sequence.iter().filter(|a| a.is_placeholder()).count()
    }
}

/// Locate, select and parse the encounter in `encounter_dir`, then resolve
/// each participant against the images in `image_dir`.
pub fn load_encounter(
    encounter_dir: &Path,
    image_dir: &Path,
    policy: SelectionPolicy,
) -> Result<LoadedEncounter, EncounterError> {
    let descriptions = catalog::enumerate_descriptions(encounter_dir)?;
    let source = selector::select(&descriptions, policy)
        .cloned()
        .ok_or_else(|| EncounterError::NoEncounterFound {
            dir: encounter_dir.to_path_buf(),
        })?;
    tracing::info!(
        file = %source.file_name,
        candidates = descriptions.len(),
        ?policy,
        "selected encounter"
    );

    let rows = tabular::read_rows(&source.path).map_err(|e| EncounterError::ReadTabular {
        path: source.path.clone(),
        source: e,
    })?;
    let order = turn_order::compute_order(&rows)?;

    let images = catalog::enumerate_assets(image_dir)?;
    let sequence = assets::resolve(&order, &images);

    let encounter = LoadedEncounter {
        source,
        order,
        sequence,
    };
    tracing::info!(
        participants = encounter.order.len(),
        placeholders = encounter.placeholder_count(),
        images = images.len(),
        "resolved encounter"
    );
    Ok(encounter)
}
