//! Throttle Head スタック定義
//!
//! KDLファイルからスタックごとの設定を読み込み、throttlehead.dev 静的サイトの
//! リソーストポロジーに解決する。

pub mod error;
pub mod loader;
pub mod model;
pub mod parser;
pub mod resolver;

pub use error::{Result, StackError};
pub use loader::{load_stack, load_stack_from_root};
pub use model::*;
pub use parser::{parse_stack_file, parse_stack_string};
pub use resolver::{ResolvedStack, resolve};
