use std::path::PathBuf;
use thiserror::Error;

/// 入力検証エラー（状態は変更されない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Selecione um cliente para prosseguir.")]
    ClientNotSelected,

    #[error("Cliente não encontrado: {0}")]
    ClientNotFound(String),

    #[error("Formato de Data inválido. Use DD/MM/AAAA: {0}")]
    InvalidDate(String),

    #[error("Número da Fatura deve ser um número inteiro positivo: {0}")]
    InvalidInvoiceNumber(String),

    #[error("Valor da Fatura inválido: {0}")]
    InvalidAmount(String),

    #[error("A Descrição/Histórico é obrigatória.")]
    MissingDescription,

    #[error("Fornecedor não encontrado: {0}")]
    SupplierNotFound(String),

    #[error("Modelo de descrição não encontrado: {0}")]
    DescriptionTemplateNotFound(String),
}

#[derive(Error, Debug)]
pub enum NotaError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("O arquivo modelo '{}' não foi encontrado.", .0.display())]
    TemplateMissing(PathBuf),

    #[error("Erro ao processar o arquivo XLSX: {0}")]
    Spreadsheet(String),

    #[error("Célula {cell} não pôde ser preenchida: {reason}")]
    CellSkipped { cell: String, reason: String },

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Não foi possível abrir o arquivo para impressão ({}): {reason}", .path.display())]
    Print { path: PathBuf, reason: String },

    #[error("Nenhuma nota gerada foi encontrada em {}", .0.display())]
    NoNoteFound(PathBuf),

    #[error("Erro de execução: {0}")]
    CliExecution(String),

    #[error(transparent)]
    Common(#[from] nota_credito_common::Error),
}

impl NotaError {
    /// 印刷失敗などの助言的エラーか
    pub fn is_advisory(&self) -> bool {
        matches!(self, NotaError::Print { .. })
    }
}

pub type Result<T> = std::result::Result<T, NotaError>;
