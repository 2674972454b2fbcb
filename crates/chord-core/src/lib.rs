//! Stroke encoding and layout search for a chorded kana keyboard.
//!
//! Every kana is typed with one or two keystrokes over 30 keys. `stroke`
//! maps kana to keystrokes and exports IME roman tables; `search` builds
//! layouts greedily from trigram frequencies and scores them.

pub mod corpus;
pub mod kana;
pub mod layout;
pub mod search;
pub mod settings;
pub mod stroke;
pub mod timing;
