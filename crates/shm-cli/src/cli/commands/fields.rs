//! Field listing.

use anyhow::Result;
use comfy_table::{ContentArrangement, Table};
use shm_editor::fields::{FieldId, FieldStore};
use shm_editor::state::blank_policy;

pub fn run(no_config: bool) -> Result<()> {
    let config = super::load_config(no_config, None)?;
    let mut store = FieldStore::new(blank_policy(config.editor.layout));
    store.load_persisted(&config.fields);
    println!("{}", table(&store));
    Ok(())
}

/// One row per field: label, default, current value and suggested choices.
pub fn table(store: &FieldStore) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Field", "Default", "Current", "Choices"]);

    for id in FieldId::ALL {
        table.add_row(vec![
            id.label().to_string(),
            id.default_value().to_string(),
            store.raw(id).to_string(),
            id.choices().join(", "),
        ]);
    }
    table
}
