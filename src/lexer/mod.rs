pub mod dfa;
pub mod nfa;
pub mod scan;
pub mod state_set;
pub mod tables;
pub mod tokens;

pub use dfa::Dfa;
pub use nfa::{Nfa, Priority};
pub use scan::{Match, Scan};
pub use tokens::{Token, TokenKind};
