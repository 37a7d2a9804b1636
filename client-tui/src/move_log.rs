/// Notation of every confirmed half-move in the current match, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vec<String>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notation: String) {
        self.entries.push(notation);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Moves paired per full move: `(white, black)`, the last black slot
    /// empty while white's move is unanswered.
    pub fn rows(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .chunks(2)
            .map(|pair| (pair[0].as_str(), pair.get(1).map(String::as_str)))
    }

    /// Forget everything; only a new match does this.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_pair_white_and_black() {
        let mut log = MoveLog::new();
        for san in ["e4", "e5", "Nf3"] {
            log.push(san.to_string());
        }
        let rows: Vec<_> = log.rows().collect();
        assert_eq!(rows, vec![("e4", Some("e5")), ("Nf3", None)]);
    }

    #[test]
    fn empty_log_has_no_rows() {
        let log = MoveLog::new();
        assert!(log.is_empty());
        assert_eq!(log.rows().count(), 0);
    }

    #[test]
    fn reset_clears_entries() {
        let mut log = MoveLog::new();
        log.push("e4".into());
        log.reset();
        assert_eq!(log.len(), 0);
    }
}
