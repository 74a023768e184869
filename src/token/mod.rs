// Public exports.
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, Tokenizer};

// Public mods.
pub mod token;

#[cfg(feature = "cli")]
pub mod cli_helper;
#[cfg(feature = "cli")]
pub mod interactive_stream;

// Private mods.
mod tokenizer;
