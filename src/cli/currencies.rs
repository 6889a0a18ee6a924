use super::ui;
use crate::core::{CurrencyCatalog, RateConverter};
use anyhow::Result;
use comfy_table::Cell;

pub fn render_catalog(catalog: &CurrencyCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for (code, name) in catalog.iter() {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }

    format!(
        "{}\n\n{}\n\n{}",
        ui::style_text("Supported currencies", ui::StyleType::Title),
        table,
        ui::style_text(
            &format!("{} currencies", catalog.len()),
            ui::StyleType::Subtle
        )
    )
}

pub async fn run(converter: &RateConverter<'_>, show_details: bool) -> Result<()> {
    let pb = ui::new_spinner("Loading currencies...");
    let catalog = converter.load_currencies().await;
    pb.finish_and_clear();

    let catalog = catalog.map_err(|e| anyhow::anyhow!(e.user_message(show_details)))?;
    println!("{}", render_catalog(&catalog));
    Ok(())
}
