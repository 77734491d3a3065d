use serde::{Deserialize, Serialize};

/// One multiple-choice question produced by the drill generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mcq {
    /// Question text.
    pub q: String,
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub ans: usize,
}

impl Mcq {
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.ans
    }
}
