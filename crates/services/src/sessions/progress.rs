/// Aggregated view of session progress, useful for the prompt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub solved: usize,
    pub finished: bool,
}

impl SessionProgress {
    /// 1-based number of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.position + 1
    }
}
