//! 生成済みノートの読み戻し（calamine）

use crate::error::{NotaError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use nota_credito_common::naming::MAX_SHEET_NAME_LEN;
use nota_credito_common::{CellRef, NoteField, NOTE_CELLS, SUPPLIER_CELL};
use std::path::Path;

/// 読み戻した1セル
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
    pub field: NoteField,
    pub cell: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NoteContents {
    pub sheet_name: String,
    pub fields: Vec<FieldValue>,
}

impl NoteContents {
    pub fn get(&self, field: NoteField) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .and_then(|f| f.value.as_deref())
    }
}

fn data_to_string(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 生成時に書き込んだシート名（ファイル名と同じ `<識別子>_<番号>`、31文字まで）
fn expected_sheet_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    Some(stem.chars().take(MAX_SHEET_NAME_LEN).collect())
}

/// ノートから割り当てセルの値を読む
///
/// 生成時に名前を変えたシートを読む。見つからなければ先頭シート。
pub fn inspect_note(path: &Path) -> Result<NoteContents> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| NotaError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let names = workbook.sheet_names();
    let expected = expected_sheet_name(path);
    let sheet_name = expected
        .filter(|name| names.contains(name))
        .or_else(|| names.first().cloned())
        .ok_or_else(|| NotaError::Spreadsheet(format!("{}: planilha vazia", path.display())))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| NotaError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let fields = NOTE_CELLS
        .iter()
        .chain(std::iter::once(&SUPPLIER_CELL))
        .map(|slot| {
            let value = CellRef::parse(slot.cell).and_then(|cell| {
                let (row, col) = cell.zero_based();
                range
                    .get_value((row, col as u32))
                    .and_then(data_to_string)
            });
            FieldValue {
                field: slot.field,
                cell: slot.cell,
                value,
            }
        })
        .collect();

    Ok(NoteContents { sheet_name, fields })
}
