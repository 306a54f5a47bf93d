use serde::{Deserialize, Serialize};

/// One step of the repair loop: the code before and after an automated fix
/// attempt, plus the run output and reasoning the engine reported for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchEntry {
    pub previous_code: String,
    pub next_code: String,
    pub stdout: String,
    pub stderr: String,
    pub reasoning: String,
    /// Discarded by the user. The entry stays in the log.
    pub rejected: bool,
}

impl PatchEntry {
    pub fn new(previous_code: impl Into<String>, next_code: impl Into<String>) -> Self {
        Self {
            previous_code: previous_code.into(),
            next_code: next_code.into(),
            stdout: String::new(),
            stderr: String::new(),
            reasoning: String::new(),
            rejected: false,
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Unified diff from `previous_code` to `next_code`.
    pub fn unified_diff(&self) -> String {
        crate::patch::unified_diff(&self.previous_code, &self.next_code)
    }
}

/// Append-only log of patch entries plus the selection cursor. Entries are
/// never removed; rejection only flips a flag, so the log stays a complete
/// record of what the repair loop produced.
#[derive(Debug, Default)]
pub struct PatchHistory {
    entries: Vec<PatchEntry>,
    selected: Option<usize>,
}

impl PatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, select it, and return its index. A newly created
    /// patch becomes the default view.
    pub fn push(&mut self, entry: PatchEntry) -> usize {
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Move the cursor. Out-of-range indexes normalize to `None`.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.entries.len());
    }

    /// Flip the rejected flag on an entry. Returns false without touching
    /// anything when the index is out of range.
    pub fn mark_rejected(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.rejected = true;
                true
            }
            None => false,
        }
    }

    /// Nearest non-rejected index strictly after `index`.
    pub fn next_active_after(&self, index: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, entry)| !entry.rejected)
            .map(|(i, _)| i)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    pub fn entries(&self) -> &[PatchEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PatchEntry> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&PatchEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&PatchEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }
}
