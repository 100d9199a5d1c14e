//! エラーケーステスト
//!
//! 入力検証・ファイル欠落・印刷失敗のエラーハンドリングを検証

use nota_credito::config::Config;
use nota_credito::error::{NotaError, ValidationError};
use nota_credito::generator::inspect::inspect_note;
use nota_credito::printer;
use nota_credito::validation::NoteForm;
use nota_credito_common::{Client, Supplier};
use std::path::Path;
use tempfile::tempdir;

fn valid_form() -> NoteForm {
    NoteForm {
        date: "15/03/2024".to_string(),
        invoice_number: "10".to_string(),
        client_code: Some("C001".to_string()),
        description: "DESCONTO".to_string(),
        amount: "1.234,56".to_string(),
        supplier: None,
    }
}

fn clients() -> Vec<Client> {
    vec![Client::new("C001", "Acme Fertilizantes LTDA")]
}

#[test]
fn test_valid_form() {
    let request = valid_form().validate(&clients(), &[]).expect("検証失敗");
    assert_eq!(request.invoice_number, 10);
    assert_eq!(request.amount.cents(), 123456);
    assert_eq!(request.client.name, "Acme Fertilizantes LTDA");
}

/// 検証は クライアント → 日付 → 番号 → 金額 → 説明 の順
#[test]
fn test_validation_order() {
    let form = NoteForm {
        client_code: None,
        date: "31/02/2024".to_string(),
        ..valid_form()
    };
    assert_eq!(
        form.validate(&clients(), &[]).unwrap_err(),
        ValidationError::ClientNotSelected
    );

    let form = NoteForm {
        date: "31/02/2024".to_string(),
        invoice_number: "abc".to_string(),
        ..valid_form()
    };
    assert!(matches!(
        form.validate(&clients(), &[]).unwrap_err(),
        ValidationError::InvalidDate(_)
    ));
}

#[test]
fn test_invalid_fields() {
    let cases = [
        (NoteForm { invoice_number: "0".into(), ..valid_form() }, "Número da Fatura"),
        (NoteForm { invoice_number: "-5".into(), ..valid_form() }, "Número da Fatura"),
        (NoteForm { amount: "abc".into(), ..valid_form() }, "Valor da Fatura"),
        (NoteForm { description: "   ".into(), ..valid_form() }, "Descrição"),
        (NoteForm { date: "2024-03-15".into(), ..valid_form() }, "DD/MM/AAAA"),
    ];
    for (form, expected) in cases {
        let err = form.validate(&clients(), &[]).unwrap_err();
        assert!(err.to_string().contains(expected), "{} / {}", err, expected);
    }
}

#[test]
fn test_unknown_supplier() {
    let form = NoteForm {
        supplier: Some("Nenhum".to_string()),
        ..valid_form()
    };
    let suppliers = vec![Supplier::new("Agro Sul", "agro.xlsx")];
    assert_eq!(
        form.validate(&clients(), &suppliers).unwrap_err(),
        ValidationError::SupplierNotFound("Nenhum".to_string())
    );
}

#[test]
fn test_validation_error_converts() {
    let err: NotaError = ValidationError::MissingDescription.into();
    assert_eq!(err.to_string(), "A Descrição/Histórico é obrigatória.");
    assert!(!err.is_advisory());
}

#[test]
fn test_inspect_missing_file() {
    let err = inspect_note(Path::new("/nonexistent/path/nota.xlsx")).unwrap_err();
    assert!(matches!(err, NotaError::Spreadsheet(_)));
}

#[test]
fn test_print_missing_file_is_advisory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::with_data_dir(dir.path());
    let err = printer::print_file(&dir.path().join("nao_existe.xlsx"), &config).unwrap_err();
    assert!(err.is_advisory());
}

#[test]
fn test_last_note_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = printer::last_note(dir.path()).unwrap_err();
    assert!(matches!(err, NotaError::NoNoteFound(_)));
}
