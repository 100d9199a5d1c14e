//! レコード型定義
//!
//! JSONファイルに保存される型:
//! - Client: 顧客（clientes.json）
//! - Supplier: 仕入先とテンプレートの対応（fornecedores.json）
//! - DescriptionTemplate: 摘要テンプレート（modelos_descricao.json）
//! - ProgramState: 次の請求番号と最後の摘要（estado.json）
//!
//! キー名は既存データとの互換性のためポルトガル語のまま。

use serde::{Deserialize, Serialize};

/// 状態ファイルが無いときの摘要
pub const DEFAULT_DESCRIPTION: &str =
    "DESCONTO COMERCIAL REFERENTE A ACERTO COMERCIAL DE PRODUTOS.";

/// 顧客
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// 一意の顧客コード
    #[serde(rename = "codigo")]
    pub code: String,

    /// 名称（Razão Social）
    #[serde(rename = "nome")]
    pub name: String,
}

impl Client {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self { code: code.into(), name: name.into() }
    }

    /// 一覧表示用 "[C001] - Nome"
    pub fn display_label(&self) -> String {
        format!("[{}] - {}", self.code, self.name)
    }
}

/// 仕入先（テンプレートの切り替え先）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    #[serde(rename = "nome")]
    pub name: String,

    /// テンプレートファイル（データフォルダからの相対パス可）
    #[serde(rename = "modelo")]
    pub template_file: String,
}

impl Supplier {
    pub fn new(name: impl Into<String>, template_file: impl Into<String>) -> Self {
        Self { name: name.into(), template_file: template_file.into() }
    }
}

/// 摘要テンプレート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTemplate {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "texto")]
    pub text: String,
}

impl DescriptionTemplate {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

/// プログラム状態（シングルトン）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramState {
    /// 次に発行する請求番号（1以上）
    #[serde(rename = "ultima_fatura")]
    pub next_invoice_number: u32,

    /// 直前に使った摘要
    #[serde(rename = "ultima_descricao", default)]
    pub last_description: String,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            next_invoice_number: 1,
            last_description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl ProgramState {
    /// 読み込んだ値を検証する。0 は 1 に補正し、補正した場合 true を返す
    pub fn repair(&mut self) -> bool {
        if self.next_invoice_number == 0 {
            self.next_invoice_number = 1;
            return true;
        }
        false
    }

    /// 発行成功後の状態更新。次の番号は今回発行した番号 + 1
    pub fn advance(&mut self, used_invoice: u32, description: &str) {
        self.next_invoice_number = used_invoice.saturating_add(1);
        self.last_description = description.to_string();
    }
}

/// 金額（センタボ単位の整数）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    cents: u64,
}

impl Amount {
    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub const fn cents(&self) -> u64 {
        self.cents
    }

    /// セルに書き込む数値
    pub fn as_f64(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::mask::group_cents(self.cents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_serialize_keys() {
        let client = Client::new("C001", "Acme Fertilizantes LTDA");
        let json = serde_json::to_string(&client).expect("シリアライズ失敗");
        assert_eq!(json, r#"{"codigo":"C001","nome":"Acme Fertilizantes LTDA"}"#);
    }

    #[test]
    fn test_client_deserialize() {
        let json = r#"{"codigo": "042", "nome": "Fazenda São João"}"#;
        let client: Client = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(client.code, "042");
        assert_eq!(client.name, "Fazenda São João");
        assert_eq!(client.display_label(), "[042] - Fazenda São João");
    }

    #[test]
    fn test_supplier_keys() {
        let supplier = Supplier::new("Agro Sul", "modelo_agro.xlsx");
        let json = serde_json::to_string(&supplier).expect("シリアライズ失敗");
        assert!(json.contains("\"nome\":\"Agro Sul\""));
        assert!(json.contains("\"modelo\":\"modelo_agro.xlsx\""));
    }

    #[test]
    fn test_state_default() {
        let state = ProgramState::default();
        assert_eq!(state.next_invoice_number, 1);
        assert_eq!(state.last_description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn test_state_deserialize_without_description() {
        let json = r#"{"ultima_fatura": 17}"#;
        let state: ProgramState = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(state.next_invoice_number, 17);
        assert_eq!(state.last_description, "");
    }

    #[test]
    fn test_state_repair_zero() {
        let mut state = ProgramState { next_invoice_number: 0, last_description: String::new() };
        assert!(state.repair());
        assert_eq!(state.next_invoice_number, 1);
        assert!(!state.repair());
    }

    #[test]
    fn test_state_advance() {
        let mut state = ProgramState::default();
        state.advance(41, "DEVOLUÇÃO");
        assert_eq!(state.next_invoice_number, 42);
        assert_eq!(state.last_description, "DEVOLUÇÃO");
    }

    #[test]
    fn test_state_advance_follows_used_number() {
        let mut state = ProgramState { next_invoice_number: 100, last_description: String::new() };
        state.advance(5, "x");
        assert_eq!(state.next_invoice_number, 6);
        assert_eq!(state.last_description, "x");
    }

    #[test]
    fn test_amount() {
        let amount = Amount::from_cents(12345);
        assert_eq!(amount.as_f64(), 123.45);
        assert_eq!(amount.to_string(), "123,45");
        assert_eq!(Amount::from_cents(123456789).to_string(), "1.234.567,89");
        assert_eq!(Amount::default().to_string(), "0,00");
    }
}
