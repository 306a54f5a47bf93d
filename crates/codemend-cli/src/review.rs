/// What the reviewer chose for the patch under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Accept this patch as the new baseline and move on.
    Apply,
    /// Discard this patch and move to the next non-rejected one.
    Reject,
    /// Leave this patch undecided and look at the next one.
    Skip,
    /// Stop reviewing.
    Quit,
}

/// How a review ended, and what the caller should do with the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// At least one patch was applied; the session baseline gets written out.
    Accepted,
    /// The review ended without a single apply (everything rejected or
    /// skipped, or the user quit); the target file stays untouched.
    Declined,
}

impl ReviewOutcome {
    /// Applying is the only action that opts in to persistence.
    pub fn from_applied(applied: usize) -> Self {
        if applied > 0 {
            ReviewOutcome::Accepted
        } else {
            ReviewOutcome::Declined
        }
    }
}

/// Map one line of review input to an action. Unrecognized input (including
/// an empty line from EOF) skips, so the loop always terminates.
pub fn parse_review_input(input: &str) -> ReviewAction {
    match input.trim() {
        "a" | "apply" => ReviewAction::Apply,
        "r" | "reject" => ReviewAction::Reject,
        "q" | "quit" => ReviewAction::Quit,
        _ => ReviewAction::Skip,
    }
}
