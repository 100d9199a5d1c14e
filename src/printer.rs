//! OSの印刷・表示コマンド（ベストエフォート）
//!
//! 失敗しても生成済みファイルは有効なので、呼び出し側は警告として扱う。

use crate::config::Config;
use crate::error::{NotaError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// 実行するコマンドを組み立てる
///
/// Windows だけが直接印刷する。macOS と他の Unix は既定アプリで開くだけなので、
/// 直接印刷したい場合は `print_command`（例: `lpr {file}`）を設定する。
pub fn print_command(path: &Path, config: &Config) -> (String, Vec<String>) {
    let file = path.to_string_lossy().to_string();

    if let Some(custom) = config.print_command.as_deref().filter(|c| !c.trim().is_empty()) {
        let mut parts = custom.split_whitespace().map(|p| p.replace("{file}", &file));
        let program = parts.next().unwrap_or_default();
        let mut args: Vec<String> = parts.collect();
        if !custom.contains("{file}") {
            args.push(file);
        }
        return (program, args);
    }

    if cfg!(target_os = "windows") {
        (
            "powershell".to_string(),
            vec![
                "-NoProfile".to_string(),
                "-Command".to_string(),
                format!("Start-Process -FilePath '{}' -Verb Print", file.replace('\'', "''")),
            ],
        )
    } else if cfg!(target_os = "macos") {
        ("open".to_string(), vec![file])
    } else {
        ("xdg-open".to_string(), vec![file])
    }
}

/// ファイルを印刷（またはOS既定のアプリで開く）
pub fn print_file(path: &Path, config: &Config) -> Result<()> {
    if !path.exists() {
        return Err(NotaError::Print {
            path: path.to_path_buf(),
            reason: "arquivo não encontrado".to_string(),
        });
    }

    let (program, args) = print_command(path, config);
    tracing::info!(program = %program, ?args, "sending note to print");

    let status = Command::new(&program)
        .args(&args)
        .status()
        .map_err(|e| NotaError::Print {
            path: path.to_path_buf(),
            reason: format!("{}: {}", program, e),
        })?;

    if !status.success() {
        return Err(NotaError::Print {
            path: path.to_path_buf(),
            reason: format!("{} terminou com {}", program, status),
        });
    }
    Ok(())
}

/// 出力フォルダで最後に更新された .xlsx
pub fn last_note(output_dir: &Path) -> Result<PathBuf> {
    let entries = std::fs::read_dir(output_dir)
        .map_err(|_| NotaError::NoNoteFound(output_dir.to_path_buf()))?;

    entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("xlsx"))
                .unwrap_or(false)
        })
        .filter_map(|p| {
            let modified = std::fs::metadata(&p).and_then(|m| m.modified()).ok()?;
            Some((modified, p))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, p)| p)
        .ok_or_else(|| NotaError::NoNoteFound(output_dir.to_path_buf()))
}
