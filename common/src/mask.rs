//! 入力マスク（日付・金額）
//!
//! 入力のたびに呼ばれる純粋関数。UIに依存しない。
//! カーソル位置はすべて文字単位のインデックス。
//!
//! - 日付: 数字のみ最大8桁、2桁目と4桁目の後に `/` を挿入
//! - 金額: 入力された数字をすべてセンタボとして扱い、`1.234,56` 形式で表示

use crate::types::Amount;

/// 日付の最大桁数（DDMMYYYY）
pub const DATE_DIGITS: usize = 8;

/// 金額の最大桁数（u64 と f64 で誤差なく扱える範囲）
pub const CURRENCY_MAX_DIGITS: usize = 15;

/// 空欄の金額表示
pub const ZERO_CURRENCY: &str = "0,00";

/// 整形後のテキストとカーソル位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText {
    pub text: String,
    pub cursor: usize,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn digits_before(s: &str, cursor: usize) -> usize {
    s.chars().take(cursor).filter(|c| c.is_ascii_digit()).count()
}

fn digits_after(s: &str, cursor: usize) -> usize {
    s.chars().skip(cursor).filter(|c| c.is_ascii_digit()).count()
}

/// 左から n 桁目の数字の直後の位置
fn position_after_digit(s: &str, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut count = 0;
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_digit() {
            count += 1;
            if count == n {
                return i + 1;
            }
        }
    }
    char_len(s)
}

/// 右側に n 桁の数字が残る位置
fn position_before_trailing_digits(s: &str, n: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    if n == 0 {
        return chars.len();
    }
    let mut count = 0;
    for i in (0..chars.len()).rev() {
        if chars[i].is_ascii_digit() {
            count += 1;
            if count == n {
                return i;
            }
        }
    }
    0
}

/// センタボを `1.234,56` 形式に整形
pub fn group_cents(cents: u64) -> String {
    let reais = (cents / 100).to_string();
    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, c) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{},{:02}", grouped, cents % 100)
}

/// 日付の整形（フォーカスアウト時にも使用）
pub fn format_date(text: &str) -> String {
    let mut out = String::with_capacity(DATE_DIGITS + 2);
    for (i, c) in text.chars().filter(|c| c.is_ascii_digit()).take(DATE_DIGITS).enumerate() {
        if i == 2 || i == 4 {
            out.push('/');
        }
        out.push(c);
    }
    out
}

/// 入力中の数字列をセンタボとして解釈
fn currency_cents(text: &str) -> u64 {
    let digits: String = text
        .chars()
        .filter(|c| c.is_ascii_digit())
        .skip_while(|c| *c == '0')
        .take(CURRENCY_MAX_DIGITS)
        .collect();
    digits.parse().unwrap_or(0)
}

/// 金額の整形（フォーカスアウト時にも使用）
pub fn format_currency(text: &str) -> String {
    group_cents(currency_cents(text))
}

/// 日付入力のライブ整形
///
/// カーソルの左にあった数字の数を保ち、末尾にあれば末尾に置く。
/// 入力で文字列が伸びたときにカーソルが `/` の直前に来たら、`/` の後ろへ送る。
pub fn mask_date(current: &str, cursor: usize, previous: &str) -> MaskedText {
    let current_len = char_len(current);
    let cursor = cursor.min(current_len);
    let text = format_date(current);
    let len = char_len(&text);

    let mut new_cursor = if cursor >= current_len {
        len
    } else {
        position_after_digit(&text, digits_before(current, cursor).min(DATE_DIGITS))
    };

    let grew = current_len > char_len(previous);
    if grew && new_cursor < len && text.chars().nth(new_cursor) == Some('/') {
        new_cursor += 1;
    }

    MaskedText { text, cursor: new_cursor }
}

/// 金額入力のライブ整形
///
/// 金額は右から伸びるので、カーソルの右にあった数字の数を保つ。
pub fn mask_currency(current: &str, cursor: usize, _previous: &str) -> MaskedText {
    let current_len = char_len(current);
    let cursor = cursor.min(current_len);
    let text = format_currency(current);

    let new_cursor = if cursor >= current_len {
        char_len(&text)
    } else {
        position_before_trailing_digits(&text, digits_after(current, cursor))
    };

    MaskedText { text, cursor: new_cursor }
}

/// 表示用の金額文字列を解析
///
/// `123,45` / `1.234,56` / `R$ 10,00` / `150`（レアル単位）を受け付ける。
pub fn parse_currency(text: &str) -> Option<Amount> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return None;
    }

    let (int_part, frac_part) = match trimmed.split_once(',') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if frac_part.len() > 2 || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let int_digits: String = int_part.chars().filter(|c| *c != '.').collect();
    if int_digits.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if int_digits.len() > CURRENCY_MAX_DIGITS {
        return None;
    }

    let reais: u64 = if int_digits.is_empty() { 0 } else { int_digits.parse().ok()? };
    let cents: u64 = match frac_part.len() {
        0 => 0,
        1 => frac_part.parse::<u64>().ok()? * 10,
        _ => frac_part.parse().ok()?,
    };

    reais.checked_mul(100)?.checked_add(cents).map(Amount::from_cents)
}
