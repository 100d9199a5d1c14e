//! ノートのセル配置
//!
//! テンプレートの固定セル位置。テンプレート側のレイアウトは検証しないので、
//! テンプレートを差し替えるときはここと一致させること。

use std::fmt;

/// 金額セルの表示形式
pub const AMOUNT_FORMAT: &str = "R$ #,##0.00";

/// プレースホルダーのシート名
pub const PLACEHOLDER_SHEET: &str = "MODELO";

/// 書き込み対象の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    Date,
    InvoiceNumber,
    InvoiceNumberFooter,
    ClientCode,
    ClientCodeFooter,
    BillTo,
    ShipTo,
    Description,
    Amount,
    SupplierName,
}

impl NoteField {
    /// プレースホルダーに書くラベル
    pub fn label(&self) -> &'static str {
        match self {
            NoteField::Date => "DATA",
            NoteField::InvoiceNumber => "FATURA",
            NoteField::InvoiceNumberFooter => "FATURA_RODAPE",
            NoteField::ClientCode => "COD_CLIENTE",
            NoteField::ClientCodeFooter => "COD_CLIENTE_RODAPE",
            NoteField::BillTo => "NOME_CLIENTE_FATURAR_A",
            NoteField::ShipTo => "NOME_CLIENTE_ENVIADO_A",
            NoteField::Description => "DESCRICAO",
            NoteField::Amount => "VALOR",
            NoteField::SupplierName => "FORNECEDOR",
        }
    }
}

/// 項目とセル位置の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSlot {
    pub field: NoteField,
    pub cell: &'static str,
}

/// 常に書き込むセル
pub const NOTE_CELLS: &[CellSlot] = &[
    CellSlot { field: NoteField::Date, cell: "H9" },
    CellSlot { field: NoteField::InvoiceNumber, cell: "K9" },
    CellSlot { field: NoteField::ClientCode, cell: "A13" },
    CellSlot { field: NoteField::ClientCodeFooter, cell: "J52" },
    CellSlot { field: NoteField::BillTo, cell: "A15" },
    CellSlot { field: NoteField::ShipTo, cell: "G15" },
    CellSlot { field: NoteField::Description, cell: "B28" },
    CellSlot { field: NoteField::Amount, cell: "K50" },
    CellSlot { field: NoteField::InvoiceNumberFooter, cell: "L52" },
];

/// 仕入先別テンプレートのときだけ書き込むセル
pub const SUPPLIER_CELL: CellSlot = CellSlot { field: NoteField::SupplierName, cell: "A11" };

/// プレースホルダーの結合範囲
pub const PLACEHOLDER_MERGES: &[&str] = &[
    "H9:J9",
    "K9:M9",
    "A15:F19",
    "G15:M19",
    "B28:F45",
    "K50:M50",
];

/// セル番地（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub col: u32,
    pub row: u32,
}

impl CellRef {
    /// "H9" 形式を解析（`$` は無視）
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().replace('$', "");
        let split = s.find(|c: char| c.is_ascii_digit())?;
        let (letters, digits) = s.split_at(split);
        if letters.is_empty() || letters.len() > 3 {
            return None;
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
        }

        let row: u32 = digits.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Self { col, row })
    }

    /// rust_xlsxwriter 用の0始まり (row, col)
    pub fn zero_based(&self) -> (u32, u16) {
        (self.row - 1, (self.col - 1) as u16)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut letters = Vec::new();
        let mut n = self.col;
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push((b'A' + rem as u8) as char);
            n = (n - 1) / 26;
        }
        let col: String = letters.into_iter().rev().collect();
        write!(f, "{}{}", col, self.row)
    }
}

/// セル範囲 "A15:F19"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn parse(s: &str) -> Option<Self> {
        let (a, b) = match s.split_once(':') {
            Some((a, b)) => (CellRef::parse(a)?, CellRef::parse(b)?),
            None => {
                let single = CellRef::parse(s)?;
                (single, single)
            }
        };
        Some(Self {
            start: CellRef { col: a.col.min(b.col), row: a.row.min(b.row) },
            end: CellRef { col: a.col.max(b.col), row: a.row.max(b.row) },
        })
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.col..=self.end.col).contains(&cell.col)
            && (self.start.row..=self.end.row).contains(&cell.row)
    }

    /// 結合範囲の左上以外のセルか（書き込んでも表示されない）
    pub fn hides(&self, cell: CellRef) -> bool {
        self.contains(cell) && cell != self.start
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
