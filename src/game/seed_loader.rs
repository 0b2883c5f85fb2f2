//! Catalog loading from JSON so content can be customized without recompiling.
//!
//! The file holds a whole [`Catalog`] object; `achievements`, `monster_names` and
//! `motivational` may be omitted.

use log::info;
use std::fs;
use std::path::Path;

use crate::game::content::Catalog;
use crate::game::errors::GameError;

/// Load and validate a catalog from a JSON file.
pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Catalog, GameError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let catalog = parse_catalog(&contents).map_err(|e| match e {
        GameError::Json(err) => GameError::InvalidCatalog(format!(
            "failed to parse {}: {}",
            path.display(),
            err
        )),
        other => other,
    })?;
    info!(
        "loaded catalog from {} ({} quests, {} skills, {} zones)",
        path.display(),
        catalog.quests.len(),
        catalog.skills.len(),
        catalog.zones.len()
    );
    Ok(catalog)
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(contents: &str) -> Result<Catalog, GameError> {
    let catalog: Catalog = serde_json::from_str(contents)?;
    catalog.validate()?;
    Ok(catalog)
}
