use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use nota_credito::config::Config;
use nota_credito::generator::{generate_note, GenerationReport};
use nota_credito::printer::{last_note, print_file};
use nota_credito::AppContext;
use nota_credito_common::ProgramState;

use crate::model::{AppState, NoteDraft};

pub fn load_context() -> Result<AppContext> {
    let config = Config::load().context("load config")?;
    Ok(AppContext::new(config))
}

/// ストアを読み直す（選択中のクライアントは残す）
pub fn reload_state(ctx: &AppContext, state: &mut AppState) -> Result<()> {
    state.clients = ctx.clients.load();
    state.suppliers = ctx.suppliers.load();
    state.templates = ctx.templates.load();
    state.program = ctx
        .state
        .try_load()
        .with_context(|| format!("read {}", ctx.state.path().display()))?;
    if let Some(code) = &state.selected_client {
        if !state.clients.iter().any(|c| &c.code == code) {
            state.selected_client = None;
        }
    }
    Ok(())
}

/// 検証してノートを生成する
pub fn generate(
    ctx: &AppContext,
    state: &mut AppState,
    draft: &NoteDraft,
) -> Result<GenerationReport> {
    let form = draft.to_form(state.selected_client.as_deref());
    let request = form.validate(&state.clients, &state.suppliers)?;

    let mut program: ProgramState = state.program.clone();
    let report = generate_note(ctx, &request, &mut program)
        .with_context(|| format!("generate note {}", request.invoice_number))?;
    state.program = program;
    state.last_note = Some(report.output_path.clone());
    Ok(report)
}

/// 直前に生成したノート、なければ出力フォルダの最新を印刷
pub fn print_latest(ctx: &AppContext, known: Option<&Path>) -> Result<PathBuf> {
    let path = match known.filter(|p| p.exists()) {
        Some(path) => path.to_path_buf(),
        None => last_note(&ctx.output_dir())?,
    };
    print_file(&path, &ctx.config).with_context(|| format!("print {}", path.display()))?;
    Ok(path)
}

/// 仕入先テンプレートを選ぶ（データフォルダ内ならその相対パス）
pub fn pick_template_file(data_dir: &Path) -> Option<String> {
    let path = rfd::FileDialog::new()
        .add_filter("Excel", &["xlsx"])
        .set_directory(data_dir)
        .pick_file()?;
    let relative = path.strip_prefix(data_dir).unwrap_or(&path);
    Some(relative.to_string_lossy().to_string())
}
