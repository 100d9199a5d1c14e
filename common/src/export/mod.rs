//! テンプレート関連の生成処理

#[cfg(feature = "excel")]
pub mod placeholder;
