use crate::error::{NotaError, Result};
use nota_credito_common::AMOUNT_FORMAT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CLIENTS_FILE: &str = "clientes.json";
pub const SUPPLIERS_FILE: &str = "fornecedores.json";
pub const TEMPLATES_FILE: &str = "modelos_descricao.json";
pub const STATE_FILE: &str = "estado.json";
pub const TEMPLATE_FILE: &str = "modelo.xlsx";
pub const OUTPUT_FOLDER: &str = "Notas_de_Credito_Geradas";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSONファイルとテンプレートを置くフォルダ
    pub data_dir: PathBuf,
    /// 出力フォルダ（省略時は data_dir/Notas_de_Credito_Geradas）
    pub output_dir: Option<PathBuf>,
    /// 既定テンプレート（相対パスは data_dir 基準）
    pub template_file: PathBuf,
    /// 金額セルの表示形式
    pub currency_format: String,
    /// 結合セル等で書き込めないセルがあればエラーにする
    pub strict_cells: bool,
    /// 開発モード（テンプレートが無ければプレースホルダーを生成）
    pub dev_mode: bool,
    /// 印刷コマンド（`{file}` をファイルパスに置換）
    pub print_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output_dir: None,
            template_file: PathBuf::from(TEMPLATE_FILE),
            currency_format: AMOUNT_FORMAT.to_string(),
            strict_cells: false,
            dev_mode: false,
            print_command: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("nota-credito"))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| NotaError::Config("diretório home não encontrado".into()))?;
        Ok(home.join(".config").join("nota-credito").join("config.json"))
    }

    /// data_dir を差し替えた設定（テストや --data-dir 用）
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    pub fn clients_path(&self) -> PathBuf {
        self.data_dir.join(CLIENTS_FILE)
    }

    pub fn suppliers_path(&self) -> PathBuf {
        self.data_dir.join(SUPPLIERS_FILE)
    }

    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join(TEMPLATES_FILE)
    }

    pub fn state_path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => self.resolve(dir),
            None => self.data_dir.join(OUTPUT_FOLDER),
        }
    }

    /// 既定テンプレートのパス
    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.template_file)
    }

    /// 仕入先テンプレートのパス
    pub fn supplier_template_path(&self, template_file: &str) -> PathBuf {
        self.resolve(Path::new(template_file))
    }
}
