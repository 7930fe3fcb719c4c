/// The two shapes a docs command arrives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Structured command carrying a named string option.
    Interaction { query: Option<String> },
    /// Plain-text command; the words after the command name.
    Text { args: Vec<String> },
}

impl Invocation {
    /// The search query, or `None` when absent or blank.
    pub fn query(&self) -> Option<String> {
        let raw = match self {
            Invocation::Interaction { query } => query.clone()?,
            Invocation::Text { args } => args.join(" "),
        };
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}
