//! Typed - Handler の宣言・登録・検証
//!
//! # 二層構造
//! - **表層（Typed）**: `FieldEncoder<T>` / `FieldDecoder<T>` - 型安全
//! - **内部（Dyn）**: `DynEncoder` / `DynDecoder` - object-safe, type erasure
//!
//! `naming` が識別子から TypeTag を導き、`registry` が保持し、
//! `validator` が encoder/decoder の対称性を確認します。

pub mod handler;
pub mod naming;
pub mod registry;
pub mod validator;

// 主要な trait/型 を再エクスポート
pub use self::handler::{DynDecoder, DynEncoder, FieldDecoder, FieldEncoder, Handler};
pub use self::naming::{HANDLER_NAME_PATTERN, resolve};
pub use self::registry::Registry;
pub use self::validator::validate;
