//! スタック設定と解決済みトポロジーのデータモデル

mod domain;
mod resources;
mod stack;

pub use domain::*;
pub use resources::*;
pub use stack::*;
