use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook};

use crate::{
    configuration::ExportSettings,
    domain::result_row::{ResultTable, COLUMNS},
};

const SHEET_NAME: &str = "Prices";

/// `<prefix>_<YYYYMMDD_HHMMSS>.xlsx`
pub fn output_file_name(prefix: &str, timestamp: NaiveDateTime) -> String {
    format!("{}_{}.xlsx", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// Writes the table to a workbook named after `started_at` and returns its absolute path.
pub fn export_results(
    table: &ResultTable,
    settings: &ExportSettings,
    started_at: NaiveDateTime,
) -> anyhow::Result<PathBuf> {
    let file_name = output_file_name(&settings.file_prefix, started_at);
    let path = Path::new(&settings.directory).join(file_name);

    write_workbook(table, &path)?;

    let absolute_path = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    Ok(absolute_path)
}

fn write_workbook(table: &ResultTable, path: &Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in table.rows().iter().enumerate() {
        let row_number = index as u32 + 1;
        for (col, cell) in row.cells().iter().enumerate() {
            worksheet.write_string(row_number, col as u16, cell.as_str())?;
        }
    }
    worksheet.autofit();

    workbook
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
