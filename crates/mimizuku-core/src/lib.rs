//! DL データモデル
//!
//! このクレートは Mimizuku 推論エンジンの基本データモデルを提供します:
//! - アトミック概念・ロール・個体の識別子
//! - 推論モデルのノード識別子
//! - 協調的キャンセル用の割り込みフラグ

pub mod interrupt;
pub mod model;

pub use interrupt::InterruptFlag;
pub use model::{AtomicConcept, AtomicRole, DlIri, Individual, ModelNodeId, Role};
