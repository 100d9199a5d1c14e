//! テンプレートブックの薄いラッパー（umya-spreadsheet）

use crate::error::{NotaError, Result};
use nota_credito_common::{CellRange, CellRef};
use std::path::Path;
use umya_spreadsheet::Spreadsheet;

/// セルに書く値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

pub struct TemplateWorkbook {
    book: Spreadsheet,
    merges: Vec<CellRange>,
}

impl TemplateWorkbook {
    pub fn open(path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(path)
            .map_err(|e| NotaError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

        let mut workbook = Self { book, merges: Vec::new() };
        workbook.merges = workbook
            .book
            .get_active_sheet_mut()
            .get_merge_cells()
            .iter()
            .filter_map(|range| CellRange::parse(&range.get_range()))
            .collect();
        Ok(workbook)
    }

    /// セルを隠している結合範囲（左上以外に当たる場合）
    pub fn hiding_merge(&self, cell: CellRef) -> Option<&CellRange> {
        self.merges.iter().find(|m| m.hides(cell))
    }

    pub fn rename_active_sheet(&mut self, title: &str) {
        self.book.get_active_sheet_mut().set_name(title);
    }

    pub fn write(&mut self, cell: CellRef, value: &CellValue) {
        let address = cell.to_string();
        let target = self.book.get_active_sheet_mut().get_cell_mut(address.as_str());
        match value {
            CellValue::Text(text) => {
                target.set_value_string(text.as_str());
            }
            CellValue::Number(number) => {
                target.set_value_number(*number);
            }
        }
    }

    pub fn set_number_format(&mut self, cell: CellRef, format_code: &str) {
        let address = cell.to_string();
        self.book
            .get_active_sheet_mut()
            .get_cell_mut(address.as_str())
            .get_style_mut()
            .get_number_format_mut()
            .set_format_code(format_code);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, path)
            .map_err(|e| NotaError::Spreadsheet(format!("{}: {}", path.display(), e)))
    }
}
