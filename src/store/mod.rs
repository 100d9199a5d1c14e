//! JSONレコードストア
//!
//! ファイル全体を読み込み・全体を上書き保存する。ロックもアトミック書き込みも無い。
//!
//! - `load`: ファイルが無い・壊れている場合は空（既定値）を返し、警告ログのみ
//! - `try_load`: 同じ処理でエラーを返す
//! - `add` / `update` / `remove`: `try_load` で読み込むので、壊れたファイルを上書きしない

mod state;

pub use state::StateStore;

use crate::error::Result;
use nota_credito_common::collection::{self, Keyed};
use nota_credito_common::{Client, DescriptionTemplate, Supplier};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

pub type ClientStore = JsonStore<Client>;
pub type SupplierStore = JsonStore<Supplier>;
pub type TemplateStore = JsonStore<DescriptionTemplate>;

/// JSON配列ファイルに保存されるコレクション
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T>
where
    T: Keyed + Serialize + DeserializeOwned + Clone,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 全件読み込み（失敗時は空）
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to load {}", T::COLLECTION);
                Vec::new()
            }
        }
    }

    /// 全件読み込み（失敗はエラー）
    pub fn try_load(&self) -> Result<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path)?;
        let records: Vec<T> = serde_json::from_reader(BufReader::new(file))?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "loaded {}", T::COLLECTION);
        Ok(records)
    }

    /// 全件上書き保存
    pub fn save(&self, records: &[T]) -> Result<()> {
        write_json(&self.path, records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved {}", T::COLLECTION);
        Ok(())
    }

    pub fn find(&self, key: &str) -> Option<T> {
        collection::find(&self.load(), key).cloned()
    }

    /// 追加して保存（重複キーなら保存しない）
    pub fn add(&self, record: T) -> Result<()> {
        let mut records = self.try_load()?;
        collection::insert(&mut records, record)?;
        self.save(&records)
    }

    /// 更新して保存
    pub fn update(&self, original_key: &str, record: T) -> Result<()> {
        let mut records = self.try_load()?;
        collection::update(&mut records, original_key, record)?;
        self.save(&records)
    }

    /// 削除して保存
    pub fn remove(&self, key: &str) -> Result<T> {
        let mut records = self.try_load()?;
        let removed = collection::remove(&mut records, key)?;
        self.save(&records)?;
        Ok(removed)
    }
}

/// 整形JSONで書き込む（親フォルダが無ければ作成）
pub(crate) fn write_json<V: Serialize + ?Sized>(path: &Path, value: &V) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotaError;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = ClientStore::new(dir.path().join("clientes.json"));
        assert!(store.load().is_empty());
        assert!(store.try_load().expect("読み込み失敗").is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("clientes.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = ClientStore::new(&path);

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(NotaError::JsonParse(_))));
    }

    #[test]
    fn test_add_does_not_clobber_corrupt_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("clientes.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = ClientStore::new(&path);

        assert!(store.add(Client::new("C1", "Nome")).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_save_creates_parent() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = TemplateStore::new(dir.path().join("dados").join("modelos.json"));
        store
            .save(&[DescriptionTemplate::new("Devolução", "Devolução de mercadoria")])
            .expect("保存失敗");
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_find() {
        let dir = tempdir().expect("Failed to create temp dir");
        let store = SupplierStore::new(dir.path().join("fornecedores.json"));
        store.add(Supplier::new("Agro Sul", "agro.xlsx")).unwrap();
        assert_eq!(store.find("Agro Sul").map(|s| s.template_file), Some("agro.xlsx".to_string()));
        assert!(store.find("Outro").is_none());
    }
}
