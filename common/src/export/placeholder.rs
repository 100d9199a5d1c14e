//! プレースホルダーテンプレート生成
//!
//! 開発環境で本物のテンプレートが無いときだけ使う。
//! 各セルにラベルを書き、本番テンプレートと同じ結合範囲を作る。

use crate::error::{Error, Result};
use crate::layout::{
    CellRange, CellRef, NoteField, AMOUNT_FORMAT, NOTE_CELLS, PLACEHOLDER_MERGES,
    PLACEHOLDER_SHEET, SUPPLIER_CELL,
};
use rust_xlsxwriter::*;
use std::path::Path;

fn template_error(context: &str, e: XlsxError) -> Error {
    Error::Template(format!("{}: {}", context, e))
}

/// プレースホルダーをバッファに生成
pub fn placeholder_template_buffer() -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let label_format = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(PLACEHOLDER_SHEET)
        .map_err(|e| template_error("シート名設定エラー", e))?;

    let merges: Vec<CellRange> = PLACEHOLDER_MERGES
        .iter()
        .filter_map(|m| CellRange::parse(m))
        .collect();

    for slot in NOTE_CELLS.iter().chain(std::iter::once(&SUPPLIER_CELL)) {
        let cell = CellRef::parse(slot.cell)
            .ok_or_else(|| Error::Template(format!("不正なセル番地: {}", slot.cell)))?;
        let label = slot.field.label();
        let format = if slot.field == NoteField::Amount {
            label_format.clone().set_num_format(AMOUNT_FORMAT)
        } else {
            label_format.clone()
        };

        // 結合範囲の左上ならラベルごと結合する
        if let Some(range) = merges.iter().find(|m| m.start == cell) {
            let (first_row, first_col) = range.start.zero_based();
            let (last_row, last_col) = range.end.zero_based();
            worksheet
                .merge_range(first_row, first_col, last_row, last_col, label, &format)
                .map_err(|e| template_error("セルマージエラー", e))?;
        } else {
            let (row, col) = cell.zero_based();
            worksheet
                .write_string_with_format(row, col, label, &format)
                .map_err(|e| template_error("ラベル書き込みエラー", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| template_error("Excel保存エラー", e))
}

/// プレースホルダーをファイルに保存
pub fn write_placeholder_template(path: &Path) -> Result<()> {
    let buffer = placeholder_template_buffer()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, buffer)?;
    Ok(())
}
