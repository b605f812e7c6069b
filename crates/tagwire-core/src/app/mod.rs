//! App - 宣言フェーズと実行フェーズ
//!
//! - **builder**: `CodecBuilder`（Declaring: 登録 → 検証 → 凍結）
//! - **codec**: `Codec`（Frozen: encode/decode の dispatch）

pub mod builder;
pub mod codec;

pub use self::builder::CodecBuilder;
pub use self::codec::Codec;
