//! コレクション操作（一意キーの追加・更新・削除）
//!
//! 顧客・仕入先・摘要テンプレートに共通。線形探索のみ。
//! 失敗した操作はスライスを変更しない。

use crate::error::{Error, Result};
use crate::types::{Client, DescriptionTemplate, Supplier};

/// 一意キーを持つレコード
pub trait Keyed {
    /// コレクション名（エラーメッセージ用）
    const COLLECTION: &'static str;
    /// キーのラベル（必須チェック用）
    const KEY_LABEL: &'static str;
    /// 値のラベル（必須チェック用）
    const VALUE_LABEL: &'static str;

    fn key(&self) -> &str;
    fn value(&self) -> &str;
    /// 前後の空白を除去
    fn trimmed(self) -> Self;
}

impl Keyed for Client {
    const COLLECTION: &'static str = "clientes";
    const KEY_LABEL: &'static str = "código";
    const VALUE_LABEL: &'static str = "nome";

    fn key(&self) -> &str { &self.code }
    fn value(&self) -> &str { &self.name }
    fn trimmed(self) -> Self {
        Client::new(self.code.trim(), self.name.trim())
    }
}

impl Keyed for Supplier {
    const COLLECTION: &'static str = "fornecedores";
    const KEY_LABEL: &'static str = "nome";
    const VALUE_LABEL: &'static str = "modelo";

    fn key(&self) -> &str { &self.name }
    fn value(&self) -> &str { &self.template_file }
    fn trimmed(self) -> Self {
        Supplier::new(self.name.trim(), self.template_file.trim())
    }
}

impl Keyed for DescriptionTemplate {
    const COLLECTION: &'static str = "modelos de descrição";
    const KEY_LABEL: &'static str = "nome";
    const VALUE_LABEL: &'static str = "texto";

    fn key(&self) -> &str { &self.name }
    fn value(&self) -> &str { &self.text }
    fn trimmed(self) -> Self {
        DescriptionTemplate::new(self.name.trim(), self.text.trim())
    }
}

fn check_required<T: Keyed>(record: &T) -> Result<()> {
    if record.key().is_empty() {
        return Err(Error::MissingField(T::KEY_LABEL));
    }
    if record.value().is_empty() {
        return Err(Error::MissingField(T::VALUE_LABEL));
    }
    Ok(())
}

/// キーで検索
pub fn find<'a, T: Keyed>(records: &'a [T], key: &str) -> Option<&'a T> {
    records.iter().find(|r| r.key() == key)
}

/// 追加（重複キーは拒否）
pub fn insert<T: Keyed>(records: &mut Vec<T>, record: T) -> Result<()> {
    let record = record.trimmed();
    check_required(&record)?;
    if find(records, record.key()).is_some() {
        return Err(Error::DuplicateKey {
            collection: T::COLLECTION,
            key: record.key().to_string(),
        });
    }
    records.push(record);
    Ok(())
}

/// 更新（キー変更時は他レコードとの重複を拒否）
pub fn update<T: Keyed>(records: &mut [T], original_key: &str, record: T) -> Result<()> {
    let record = record.trimmed();
    check_required(&record)?;

    let index = records
        .iter()
        .position(|r| r.key() == original_key)
        .ok_or_else(|| Error::NotFound {
            collection: T::COLLECTION,
            key: original_key.to_string(),
        })?;

    let collides = records
        .iter()
        .enumerate()
        .any(|(i, r)| i != index && r.key() == record.key());
    if collides {
        return Err(Error::DuplicateKey {
            collection: T::COLLECTION,
            key: record.key().to_string(),
        });
    }

    records[index] = record;
    Ok(())
}

/// 削除
pub fn remove<T: Keyed>(records: &mut Vec<T>, key: &str) -> Result<T> {
    let index = records
        .iter()
        .position(|r| r.key() == key)
        .ok_or_else(|| Error::NotFound {
            collection: T::COLLECTION,
            key: key.to_string(),
        })?;
    Ok(records.remove(index))
}

/// コード順（大文字小文字無視）に並べ、コードまたは名前の部分一致で絞り込む
pub fn filter_clients<'a>(clients: &'a [Client], query: &str) -> Vec<&'a Client> {
    let query = query.trim().to_lowercase();
    let mut sorted: Vec<&Client> = clients.iter().collect();
    sorted.sort_by_key(|c| c.code.to_lowercase());
    sorted
        .into_iter()
        .filter(|c| {
            query.is_empty()
                || c.code.to_lowercase().contains(&query)
                || c.name.to_lowercase().contains(&query)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Client> {
        vec![
            Client::new("B02", "Fazenda Boa Vista"),
            Client::new("a01", "Acme Fertilizantes LTDA"),
            Client::new("C03", "Cooperativa Agro Sul"),
        ]
    }

    #[test]
    fn test_insert() {
        let mut clients = sample();
        insert(&mut clients, Client::new(" D04 ", " Nova Terra ")).expect("追加失敗");
        assert_eq!(clients.len(), 4);
        assert_eq!(clients[3], Client::new("D04", "Nova Terra"));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut clients = sample();
        let err = insert(&mut clients, Client::new("B02", "Outro")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
        assert_eq!(clients, sample());
    }

    #[test]
    fn test_insert_missing_field() {
        let mut clients = sample();
        let err = insert(&mut clients, Client::new("  ", "Nome")).unwrap_err();
        assert!(matches!(err, Error::MissingField("código")));
        let err = insert(&mut clients, Client::new("X", "")).unwrap_err();
        assert!(matches!(err, Error::MissingField("nome")));
        assert_eq!(clients.len(), 3);
    }

    #[test]
    fn test_update_same_key() {
        let mut clients = sample();
        update(&mut clients, "B02", Client::new("B02", "Fazenda Boa Vista II")).expect("更新失敗");
        assert_eq!(clients[0].name, "Fazenda Boa Vista II");
    }

    #[test]
    fn test_update_key_collision() {
        let mut clients = sample();
        let err = update(&mut clients, "B02", Client::new("C03", "x")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { .. }));
        assert_eq!(clients, sample());
    }

    #[test]
    fn test_update_missing() {
        let mut clients = sample();
        let err = update(&mut clients, "ZZZ", Client::new("ZZZ", "x")).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let mut clients = sample();
        let removed = remove(&mut clients, "C03").expect("削除失敗");
        assert_eq!(removed.code, "C03");
        assert_eq!(clients.len(), 2);
        assert!(remove(&mut clients, "C03").is_err());
    }

    #[test]
    fn test_template_duplicate_name() {
        let mut templates = vec![DescriptionTemplate::new("Devolução", "Devolução de mercadoria")];
        let err = insert(&mut templates, DescriptionTemplate::new("Devolução", "outro")).unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { collection: "modelos de descrição", .. }));
        assert_eq!(templates.len(), 1);
    }

    #[test]
    fn test_filter_clients_sorted() {
        let clients = sample();
        let codes: Vec<&str> = filter_clients(&clients, "").iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["a01", "B02", "C03"]);
    }

    #[test]
    fn test_filter_clients_query() {
        let clients = sample();
        let found = filter_clients(&clients, "agro");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "C03");

        let found = filter_clients(&clients, "b0");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "B02");
    }
}
