//! Nota de Crédito Common Library
//!
//! CLIとデスクトップ版で共有される型とユーティリティ（UI非依存）

pub mod types;
pub mod layout;
pub mod mask;
pub mod naming;
pub mod collection;
pub mod error;
pub mod export;

pub use types::{Amount, Client, DescriptionTemplate, ProgramState, Supplier, DEFAULT_DESCRIPTION};
pub use layout::{CellRange, CellRef, CellSlot, NoteField, AMOUNT_FORMAT, NOTE_CELLS, SUPPLIER_CELL};
pub use mask::{format_currency, format_date, mask_currency, mask_date, parse_currency, MaskedText, ZERO_CURRENCY};
pub use naming::{output_file_name, sheet_title, short_identifier};
pub use collection::{filter_clients, Keyed};
pub use error::{Error, Result};
