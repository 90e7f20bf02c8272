// Text primitives shared by the ranker and the document loader:
// sentence splitting, word tokenization, and stop words.

pub mod sentences;
pub mod tokenize;
