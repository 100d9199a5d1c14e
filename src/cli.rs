use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nota-credito")]
#[command(about = "Gestão de clientes e geração de notas de crédito (.xlsx)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// データフォルダ（設定より優先）
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 顧客の管理
    Clients {
        #[command(subcommand)]
        action: ClientAction,
    },

    /// 仕入先（テンプレート切り替え）の管理
    Suppliers {
        #[command(subcommand)]
        action: SupplierAction,
    },

    /// 摘要テンプレートの管理
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// クレジットノートを生成
    Generate {
        /// 顧客コード
        #[arg(short, long)]
        client: String,

        /// 金額（数字はセンタボ扱い: 12345 → 123,45。"123,45" も可）
        #[arg(short, long)]
        amount: String,

        /// 日付 DD/MM/AAAA（01022024 も可、省略時は今日）
        #[arg(short, long)]
        date: Option<String>,

        /// 請求番号（省略時は次の番号）
        #[arg(short, long)]
        invoice: Option<String>,

        /// 摘要（省略時は前回の摘要）
        #[arg(long, conflicts_with = "template")]
        description: Option<String>,

        /// 摘要テンプレート名
        #[arg(short, long)]
        template: Option<String>,

        /// 仕入先名（仕入先用テンプレートを使用）
        #[arg(short, long)]
        supplier: Option<String>,

        /// 生成後に印刷
        #[arg(short, long)]
        print: bool,
    },

    /// ノートを印刷（省略時は最後に生成したノート）
    Print {
        file: Option<PathBuf>,

        /// 確認しない
        #[arg(short, long)]
        yes: bool,
    },

    /// 生成済みノートの内容を表示
    Show {
        #[arg(required = true)]
        file: PathBuf,
    },

    /// 次の請求番号と前回の摘要を表示
    State,

    /// 開発用のプレースホルダーテンプレートを作成
    InitTemplate {
        /// 出力先（省略時は設定のテンプレートパス）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 既存ファイルを上書き
        #[arg(long)]
        force: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        #[arg(long)]
        set_template: Option<PathBuf>,

        /// 書き込めないセルをエラーにする
        #[arg(long)]
        set_strict_cells: Option<bool>,

        /// テンプレートが無いときプレースホルダーを生成
        #[arg(long)]
        set_dev_mode: Option<bool>,

        /// 印刷コマンド（{file} がパスに置換される）
        #[arg(long)]
        set_print_command: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ClientAction {
    /// 一覧（コード順）
    List {
        /// コードまたは名前で絞り込み
        #[arg(short, long)]
        search: Option<String>,
    },
    /// 追加
    Add { code: String, name: String },
    /// 編集
    Edit {
        code: String,
        #[arg(long)]
        new_code: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// 削除
    Delete {
        code: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SupplierAction {
    List,
    /// 追加（テンプレートはデータフォルダからの相対パス可）
    Add { name: String, template: String },
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        template: Option<String>,
    },
    Delete {
        name: String,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum TemplateAction {
    List,
    Add { name: String, text: String },
    Edit {
        name: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    Delete {
        name: String,
        #[arg(short, long)]
        yes: bool,
    },
}
