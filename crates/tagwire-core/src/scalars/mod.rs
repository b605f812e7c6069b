//! Built-in scalar handlers.
//!
//! Each kind lives in its own module and is wired in only through
//! [`standard_declarations`]; the engine never names a kind.

pub mod int;

pub use self::int::{IntFieldDecoder, IntFieldEncoder};

use crate::typed::Handler;

/// `(identifier, handler)` pairs for every built-in kind, in declaration order.
pub fn standard_declarations() -> Vec<(&'static str, Handler)> {
    vec![
        (int::INT_ENCODER, Handler::encoder(IntFieldEncoder)),
        (int::INT_DECODER, Handler::decoder(IntFieldDecoder)),
    ]
}
