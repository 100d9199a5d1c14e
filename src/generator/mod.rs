//! クレジットノート生成
//!
//! テンプレートを開き、固定セルに値を書き込み、シート名を変えて出力フォルダに保存する。
//! 保存に成功したときだけ状態（次の請求番号・最後の摘要）を更新する。

pub mod inspect;
mod workbook;

pub use workbook::CellValue;

use crate::context::AppContext;
use crate::error::{NotaError, Result};
use crate::validation::NoteRequest;
use nota_credito_common::export::placeholder::write_placeholder_template;
use nota_credito_common::{
    output_file_name, sheet_title, short_identifier, CellRef, NoteField, ProgramState,
    NOTE_CELLS, SUPPLIER_CELL,
};
use std::fmt;
use std::path::{Path, PathBuf};
use workbook::TemplateWorkbook;

/// 書き込まなかったセルの理由
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// 結合範囲の左上以外
    MergedRegion(String),
    /// レイアウト上の番地が不正
    InvalidAddress,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MergedRegion(range) => write!(f, "dentro da mesclagem {}", range),
            SkipReason::InvalidAddress => write!(f, "endereço de célula inválido"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub field: NoteField,
    pub cell: String,
    pub reason: SkipReason,
}

/// 生成結果
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub template_path: PathBuf,
    pub sheet_title: String,
    pub skipped: Vec<SkippedCell>,
}

/// 生成に使うテンプレートのパス
pub fn template_for(ctx: &AppContext, request: &NoteRequest) -> PathBuf {
    match &request.supplier {
        Some(supplier) => ctx.config.supplier_template_path(&supplier.template_file),
        None => ctx.config.template_path(),
    }
}

/// 出力先のパス（生成前のプレビューにも使う）
pub fn note_path(output_dir: &Path, client_name: &str, invoice_number: u32) -> PathBuf {
    output_dir.join(output_file_name(&short_identifier(client_name), invoice_number))
}

/// テンプレートの存在確認。開発モードのときだけプレースホルダーを作る
pub fn ensure_template(path: &Path, dev_mode: bool) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if dev_mode {
        tracing::warn!(path = %path.display(), "template missing, writing placeholder (dev mode)");
        write_placeholder_template(path)?;
        if path.exists() {
            return Ok(());
        }
    }
    Err(NotaError::TemplateMissing(path.to_path_buf()))
}

/// 項目ごとの値
fn field_values(request: &NoteRequest) -> Vec<(NoteField, &'static str, CellValue)> {
    let mut values: Vec<(NoteField, &'static str, CellValue)> = NOTE_CELLS
        .iter()
        .map(|slot| {
            let value = match slot.field {
                NoteField::Date => CellValue::Text(request.date.clone()),
                NoteField::InvoiceNumber | NoteField::InvoiceNumberFooter => {
                    CellValue::Number(request.invoice_number as f64)
                }
                NoteField::ClientCode | NoteField::ClientCodeFooter => {
                    CellValue::Text(request.client.code.clone())
                }
                NoteField::BillTo | NoteField::ShipTo => CellValue::Text(request.client.name.clone()),
                NoteField::Description => CellValue::Text(request.description.clone()),
                NoteField::Amount => CellValue::Number(request.amount.as_f64()),
                NoteField::SupplierName => CellValue::Text(String::new()),
            };
            (slot.field, slot.cell, value)
        })
        .collect();

    if let Some(supplier) = &request.supplier {
        values.push((
            SUPPLIER_CELL.field,
            SUPPLIER_CELL.cell,
            CellValue::Text(supplier.name.clone()),
        ));
    }
    values
}

/// ノートを生成して保存し、状態を更新する
///
/// 失敗時は `state` もストアも変更しない。
pub fn generate_note(
    ctx: &AppContext,
    request: &NoteRequest,
    state: &mut ProgramState,
) -> Result<GenerationReport> {
    let template_path = template_for(ctx, request);
    ensure_template(&template_path, ctx.config.dev_mode)?;

    let short_id = short_identifier(&request.client.name);
    let title = sheet_title(&short_id, request.invoice_number);

    let mut workbook = TemplateWorkbook::open(&template_path)?;
    workbook.rename_active_sheet(&title);

    let mut skipped = Vec::new();
    for (field, address, value) in field_values(request) {
        let Some(cell) = CellRef::parse(address) else {
            skipped.push(SkippedCell {
                field,
                cell: address.to_string(),
                reason: SkipReason::InvalidAddress,
            });
            continue;
        };

        if let Some(range) = workbook.hiding_merge(cell) {
            skipped.push(SkippedCell {
                field,
                cell: address.to_string(),
                reason: SkipReason::MergedRegion(range.to_string()),
            });
            continue;
        }

        workbook.write(cell, &value);
        if field == NoteField::Amount {
            workbook.set_number_format(cell, &ctx.config.currency_format);
        }
    }

    for skip in &skipped {
        tracing::warn!(cell = %skip.cell, field = ?skip.field, reason = %skip.reason, "cell skipped");
    }
    if ctx.config.strict_cells {
        if let Some(first) = skipped.first() {
            return Err(NotaError::CellSkipped {
                cell: first.cell.clone(),
                reason: first.reason.to_string(),
            });
        }
    }

    let output_dir = ctx.output_dir();
    std::fs::create_dir_all(&output_dir)?;
    let output_path = output_dir.join(output_file_name(&short_id, request.invoice_number));
    workbook.save(&output_path)?;
    tracing::info!(path = %output_path.display(), invoice = request.invoice_number, "note saved");

    let mut next = state.clone();
    next.advance(request.invoice_number, &request.description);
    ctx.state.save(&next)?;
    *state = next;

    Ok(GenerationReport {
        output_path,
        template_path,
        sheet_title: title,
        skipped,
    })
}
