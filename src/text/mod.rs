// Text processing — turning raw article text into stemmed tokens.

pub mod traits;
pub mod tokenizer;
