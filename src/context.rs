//! アプリケーションコンテキスト
//!
//! 設定とストアをまとめて持ち、必要なコンポーネントに渡す。

use crate::config::Config;
use crate::store::{ClientStore, StateStore, SupplierStore, TemplateStore};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub clients: ClientStore,
    pub suppliers: SupplierStore,
    pub templates: TemplateStore,
    pub state: StateStore,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            clients: ClientStore::new(config.clients_path()),
            suppliers: SupplierStore::new(config.suppliers_path()),
            templates: TemplateStore::new(config.templates_path()),
            state: StateStore::new(config.state_path()),
            config,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir()
    }
}
