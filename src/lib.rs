pub mod attachment;
pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod record;

pub use codec::{FieldCodec, SafeDecrypt};
pub use errors::{FieldSealError, Result};
