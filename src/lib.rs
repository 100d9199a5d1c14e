//! Nota de Crédito
//!
//! 顧客・仕入先・摘要テンプレートの管理と、XLSXテンプレートからのクレジットノート生成。

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod generator;
pub mod printer;
pub mod store;
pub mod validation;

pub use context::AppContext;
pub use error::{NotaError, Result, ValidationError};
pub use generator::{generate_note, GenerationReport, SkippedCell};
pub use validation::{NoteForm, NoteRequest};
