use nota_credito::validation::{today, NoteForm};
use nota_credito_common::{Client, DescriptionTemplate, ProgramState, Supplier, ZERO_CURRENCY};
use std::path::PathBuf;

/// クライアント編集フォーム
#[derive(Debug, Clone, Default)]
pub struct ClientDraft {
    pub code: String,
    pub name: String,
    /// 編集中の元コード（None なら新規）
    pub editing: Option<String>,
}

impl ClientDraft {
    pub fn edit(client: &Client) -> Self {
        Self {
            code: client.code.clone(),
            name: client.name.clone(),
            editing: Some(client.code.clone()),
        }
    }

    pub fn to_client(&self) -> Client {
        Client::new(self.code.trim(), self.name.trim())
    }
}

/// ノート入力フォーム（表示中の文字列そのまま）
#[derive(Debug, Clone)]
pub struct NoteDraft {
    pub date: String,
    pub invoice_number: String,
    pub description: String,
    pub amount: String,
    pub supplier: Option<String>,
    pub print_after: bool,
}

impl NoteDraft {
    pub fn from_state(state: &ProgramState) -> Self {
        Self {
            date: today(),
            invoice_number: state.next_invoice_number.to_string(),
            description: state.last_description.clone(),
            amount: ZERO_CURRENCY.to_string(),
            supplier: None,
            print_after: false,
        }
    }

    /// 発行後: 次の番号を入れ、金額を 0,00 に戻す
    pub fn reset_after_generate(&mut self, state: &ProgramState) {
        self.invoice_number = state.next_invoice_number.to_string();
        self.amount = ZERO_CURRENCY.to_string();
    }

    pub fn to_form(&self, client_code: Option<&str>) -> NoteForm {
        NoteForm {
            date: self.date.clone(),
            invoice_number: self.invoice_number.clone(),
            client_code: client_code.map(str::to_string),
            description: self.description.clone(),
            amount: self.amount.clone(),
            supplier: self.supplier.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub clients: Vec<Client>,
    pub suppliers: Vec<Supplier>,
    pub templates: Vec<DescriptionTemplate>,
    pub program: ProgramState,
    pub search: String,
    pub selected_client: Option<String>,
    pub last_note: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_prefill() {
        let state = ProgramState {
            next_invoice_number: 57,
            last_description: "DESCONTO".into(),
        };
        let draft = NoteDraft::from_state(&state);
        assert_eq!(draft.invoice_number, "57");
        assert_eq!(draft.description, "DESCONTO");
        assert_eq!(draft.amount, "0,00");
        assert_eq!(draft.date.len(), 10);
    }

    #[test]
    fn test_reset_after_generate() {
        let mut draft = NoteDraft::from_state(&ProgramState::default());
        draft.amount = "1.234,56".into();
        draft.description = "DEVOLUÇÃO".into();

        let state = ProgramState {
            next_invoice_number: 8,
            last_description: "DEVOLUÇÃO".into(),
        };
        draft.reset_after_generate(&state);
        assert_eq!(draft.invoice_number, "8");
        assert_eq!(draft.amount, "0,00");
        assert_eq!(draft.description, "DEVOLUÇÃO");
    }

    #[test]
    fn test_client_draft_trims() {
        let draft = ClientDraft {
            code: " C001 ".into(),
            name: " Acme ".into(),
            editing: None,
        };
        assert_eq!(draft.to_client(), Client::new("C001", "Acme"));
    }
}
