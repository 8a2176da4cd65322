use once_cell::sync::OnceCell;

use super::{Dataset, GeoReference};
use crate::shared::config::Config;

static DATASET: OnceCell<Dataset> = OnceCell::new();
static GEO: OnceCell<GeoReference> = OnceCell::new();

/// Load the workbook and the geography once, before the server binds.
/// Any failure here stops the process.
pub async fn initialize(config: &Config) -> anyhow::Result<()> {
    let workbook_path = crate::shared::config::resolve_path(&config.data.workbook_path);
    let dataset = super::workbook::load_dataset(
        &workbook_path,
        &config.data.orders_sheet,
        &config.data.returns_sheet,
    )?;
    let geo = super::geo::load_geo_reference(&config.geo).await?;

    tracing::info!(
        "Dataset ready: {} order lines, {} marked returned",
        dataset.len(),
        dataset.returned_count()
    );

    DATASET
        .set(dataset)
        .map_err(|_| anyhow::anyhow!("dataset already initialized"))?;
    GEO.set(geo)
        .map_err(|_| anyhow::anyhow!("geography already initialized"))?;
    Ok(())
}

/// `None` until `initialize` has completed
pub fn get_dataset() -> Option<&'static Dataset> {
    DATASET.get()
}

pub fn get_geo() -> Option<&'static GeoReference> {
    GEO.get()
}
