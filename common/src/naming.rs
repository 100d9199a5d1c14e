//! ファイル名・シート名の生成規則
//!
//! 顧客名の先頭2語と請求番号から決定的に導出する。

/// シート名に使えない文字
pub const ILLEGAL_SHEET_CHARS: &[char] = &['\\', '/', '?', '*', '[', ']', '\'', ':'];

/// 顧客名が空のときの代替名
pub const UNNAMED_CLIENT: &str = "CLIENTE_SEM_NOME";

/// xlsx のシート名の最大長
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// 顧客名から短い識別子を作る
///
/// 禁止文字を除去し、空白区切りの先頭2語を `_` で連結する。
pub fn short_identifier(client_name: &str) -> String {
    let cleaned: String = client_name
        .chars()
        .filter(|c| !ILLEGAL_SHEET_CHARS.contains(c))
        .collect();
    let parts: Vec<&str> = cleaned.split_whitespace().take(2).collect();

    if parts.is_empty() {
        UNNAMED_CLIENT.to_string()
    } else {
        parts.join("_")
    }
}

/// シート名 `<識別子>_<番号>`（31文字まで）
pub fn sheet_title(short_id: &str, invoice_number: u32) -> String {
    format!("{}_{}", short_id, invoice_number)
        .replace(' ', "_")
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect()
}

/// 出力ファイル名 `<識別子>_<番号>.xlsx`
pub fn output_file_name(short_id: &str, invoice_number: u32) -> String {
    format!("{}_{}.xlsx", short_id, invoice_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_identifier_two_words() {
        assert_eq!(short_identifier("Acme Fertilizantes LTDA"), "Acme_Fertilizantes");
    }

    #[test]
    fn test_short_identifier_single_word() {
        assert_eq!(short_identifier("  Cooperativa  "), "Cooperativa");
    }

    #[test]
    fn test_short_identifier_empty() {
        assert_eq!(short_identifier(""), UNNAMED_CLIENT);
        assert_eq!(short_identifier("   "), UNNAMED_CLIENT);
        assert_eq!(short_identifier("*?:"), UNNAMED_CLIENT);
    }

    #[test]
    fn test_short_identifier_strips_illegal() {
        assert_eq!(short_identifier("D'Ávila [Matriz] S/A"), "DÁvila_Matriz");
        assert_eq!(short_identifier("Agro: Sul / Norte"), "Agro_Sul");
    }

    #[test]
    fn test_output_file_name() {
        let id = short_identifier("Acme Fertilizantes LTDA");
        assert_eq!(output_file_name(&id, 42), "Acme_Fertilizantes_42.xlsx");
    }

    #[test]
    fn test_sheet_title_truncated() {
        let id = short_identifier("Comercializadora Internacional de Grãos");
        let title = sheet_title(&id, 123456);
        assert!(title.chars().count() <= MAX_SHEET_NAME_LEN);
        assert_eq!(title, "Comercializadora_Internacional_");
    }

    #[test]
    fn test_sheet_title_short() {
        assert_eq!(sheet_title("Acme_Fertilizantes", 42), "Acme_Fertilizantes_42");
    }

    #[test]
    fn test_deterministic() {
        let a = short_identifier("Fazenda Boa Vista");
        let b = short_identifier("Fazenda Boa Vista");
        assert_eq!(sheet_title(&a, 7), sheet_title(&b, 7));
        assert_eq!(output_file_name(&a, 7), output_file_name(&b, 7));
    }
}
