use crate::error::Result;
use nota_credito_common::ProgramState;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// estado.json（請求番号カウンタと最後の摘要）
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 読み込み（失敗時は既定値）
    pub fn load(&self) -> ProgramState {
        match self.try_load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load state, using defaults");
                ProgramState::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<ProgramState> {
        if !self.path.exists() {
            return Ok(ProgramState::default());
        }
        let file = File::open(&self.path)?;
        let mut state: ProgramState = serde_json::from_reader(BufReader::new(file))?;
        if state.repair() {
            tracing::warn!(path = %self.path.display(), "invoice counter was 0, reset to 1");
        }
        Ok(state)
    }

    pub fn save(&self, state: &ProgramState) -> Result<()> {
        super::write_json(&self.path, state)?;
        tracing::debug!(
            path = %self.path.display(),
            next_invoice = state.next_invoice_number,
            "saved state"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_state_is_default() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = StateStore::new(dir.path().join("estado.json"));
        assert_eq!(store.load(), ProgramState::default());
    }

    #[test]
    fn test_zero_counter_repaired() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("estado.json");
        std::fs::write(&path, r#"{"ultima_fatura": 0, "ultima_descricao": "x"}"#).unwrap();
        let state = StateStore::new(&path).load();
        assert_eq!(state.next_invoice_number, 1);
        assert_eq!(state.last_description, "x");
    }

    #[test]
    fn test_negative_counter_falls_back() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("estado.json");
        std::fs::write(&path, r#"{"ultima_fatura": -3}"#).unwrap();
        let store = StateStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), ProgramState::default());
    }
}
