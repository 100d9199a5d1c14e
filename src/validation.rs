//! フォーム入力の検証
//!
//! UI（CLI・デスクトップ）から受け取った文字列を検証し、ノート生成の入力に変換する。
//! 検証に失敗しても状態は一切変更しない。

use crate::error::ValidationError;
use chrono::NaiveDate;
use nota_credito_common::collection::find;
use nota_credito_common::{parse_currency, Amount, Client, Supplier};
use regex::Regex;

pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// フォームの生の入力
#[derive(Debug, Clone, Default)]
pub struct NoteForm {
    pub date: String,
    pub invoice_number: String,
    pub client_code: Option<String>,
    pub description: String,
    pub amount: String,
    pub supplier: Option<String>,
}

/// 検証済みの生成要求
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRequest {
    /// DD/MM/YYYY
    pub date: String,
    pub invoice_number: u32,
    pub client: Client,
    pub description: String,
    pub amount: Amount,
    pub supplier: Option<Supplier>,
}

/// 今日の日付（DD/MM/YYYY）
pub fn today() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// DD/MM/YYYY 形式かつ実在する日付
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
    }

    let text = text.trim();
    if !DATE_RE.is_match(text) {
        return Err(ValidationError::InvalidDate(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

/// 正の整数
pub fn parse_invoice_number(text: &str) -> Result<u32, ValidationError> {
    let text = text.trim();
    match text.parse::<u32>() {
        Ok(n) if n > 0 && text.chars().all(|c| c.is_ascii_digit()) => Ok(n),
        _ => Err(ValidationError::InvalidInvoiceNumber(text.to_string())),
    }
}

pub fn parse_amount(text: &str) -> Result<Amount, ValidationError> {
    parse_currency(text).ok_or_else(|| ValidationError::InvalidAmount(text.trim().to_string()))
}

impl NoteForm {
    /// 画面表示と同じ順で検証する
    pub fn validate(
        &self,
        clients: &[Client],
        suppliers: &[Supplier],
    ) -> Result<NoteRequest, ValidationError> {
        let code = self
            .client_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(ValidationError::ClientNotSelected)?;
        let client = find(clients, code)
            .cloned()
            .ok_or_else(|| ValidationError::ClientNotFound(code.to_string()))?;

        parse_date(&self.date)?;
        let invoice_number = parse_invoice_number(&self.invoice_number)?;
        let amount = parse_amount(&self.amount)?;

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let supplier = match self.supplier.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(name) => Some(
                find(suppliers, name)
                    .cloned()
                    .ok_or_else(|| ValidationError::SupplierNotFound(name.to_string()))?,
            ),
            None => None,
        };

        Ok(NoteRequest {
            date: self.date.trim().to_string(),
            invoice_number,
            client,
            description: description.to_string(),
            amount,
            supplier,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients() -> Vec<Client> {
        vec![Client::new("C001", "Acme Fertilizantes LTDA")]
    }

    fn suppliers() -> Vec<Supplier> {
        vec![Supplier::new("Agro Sul", "agro.xlsx")]
    }

    fn valid_form() -> NoteForm {
        NoteForm {
            date: "01/02/2024".into(),
            invoice_number: "42".into(),
            client_code: Some("C001".into()),
            description: "  DEVOLUÇÃO DE MERCADORIA  ".into(),
            amount: "123,45".into(),
            supplier: None,
        }
    }

    #[test]
    fn test_valid_form() {
        let request = valid_form().validate(&clients(), &suppliers()).expect("検証失敗");
        assert_eq!(request.invoice_number, 42);
        assert_eq!(request.client.name, "Acme Fertilizantes LTDA");
        assert_eq!(request.description, "DEVOLUÇÃO DE MERCADORIA");
        assert_eq!(request.amount, Amount::from_cents(12345));
        assert!(request.supplier.is_none());
    }

    #[test]
    fn test_client_required() {
        let form = NoteForm { client_code: None, ..valid_form() };
        assert_eq!(form.validate(&clients(), &[]), Err(ValidationError::ClientNotSelected));

        let form = NoteForm { client_code: Some("X".into()), ..valid_form() };
        assert_eq!(
            form.validate(&clients(), &[]),
            Err(ValidationError::ClientNotFound("X".into()))
        );
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("01/02/2024").is_ok());
        assert!(parse_date("29/02/2024").is_ok());
        assert!(parse_date("29/02/2023").is_err());
        assert!(parse_date("1/2/2024").is_err());
        assert!(parse_date("01022024").is_err());
        assert!(parse_date("32/01/2024").is_err());
    }

    #[test]
    fn test_parse_invoice_number() {
        assert_eq!(parse_invoice_number("42"), Ok(42));
        assert!(parse_invoice_number("0").is_err());
        assert!(parse_invoice_number("-1").is_err());
        assert!(parse_invoice_number("+5").is_err());
        assert!(parse_invoice_number("abc").is_err());
        assert!(parse_invoice_number("").is_err());
    }

    #[test]
    fn test_invalid_amount() {
        let form = NoteForm { amount: "doze".into(), ..valid_form() };
        assert!(matches!(
            form.validate(&clients(), &[]),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_missing_description() {
        let form = NoteForm { description: "   ".into(), ..valid_form() };
        assert_eq!(form.validate(&clients(), &[]), Err(ValidationError::MissingDescription));
    }

    #[test]
    fn test_supplier_lookup() {
        let form = NoteForm { supplier: Some("Agro Sul".into()), ..valid_form() };
        let request = form.validate(&clients(), &suppliers()).expect("検証失敗");
        assert_eq!(request.supplier.map(|s| s.template_file), Some("agro.xlsx".into()));

        let form = NoteForm { supplier: Some("Outro".into()), ..valid_form() };
        assert_eq!(
            form.validate(&clients(), &suppliers()),
            Err(ValidationError::SupplierNotFound("Outro".into()))
        );
    }

    #[test]
    fn test_today_format() {
        assert!(parse_date(&today()).is_ok());
    }
}
