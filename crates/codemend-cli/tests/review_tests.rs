use codemend_cli::{parse_review_input, ReviewAction, ReviewOutcome};

// ========================================================================
// Review Input Tests (review.rs)
// ========================================================================

#[test]
fn test_apply_input() {
    assert_eq!(parse_review_input("a"), ReviewAction::Apply);
    assert_eq!(parse_review_input("apply"), ReviewAction::Apply);
}

#[test]
fn test_reject_input() {
    assert_eq!(parse_review_input("r"), ReviewAction::Reject);
    assert_eq!(parse_review_input("reject"), ReviewAction::Reject);
}

#[test]
fn test_quit_input() {
    assert_eq!(parse_review_input("q"), ReviewAction::Quit);
    assert_eq!(parse_review_input("quit"), ReviewAction::Quit);
}

#[test]
fn test_input_is_trimmed() {
    assert_eq!(parse_review_input("  a\n"), ReviewAction::Apply);
    assert_eq!(parse_review_input("\tr "), ReviewAction::Reject);
}

#[test]
fn test_unrecognized_input_skips() {
    assert_eq!(parse_review_input("s"), ReviewAction::Skip);
    assert_eq!(parse_review_input("skip"), ReviewAction::Skip);
    assert_eq!(parse_review_input("yes"), ReviewAction::Skip);
    assert_eq!(parse_review_input(""), ReviewAction::Skip);
}

// ========================================================================
// Review Outcome Tests (review.rs)
// ========================================================================

#[test]
fn test_review_without_applies_declines_the_result() {
    // Rejecting everything, skipping everything, or quitting at the first
    // prompt all end with zero applies; none of them may touch the file.
    assert_eq!(ReviewOutcome::from_applied(0), ReviewOutcome::Declined);
}

#[test]
fn test_review_with_any_apply_accepts_the_result() {
    assert_eq!(ReviewOutcome::from_applied(1), ReviewOutcome::Accepted);
    assert_eq!(ReviewOutcome::from_applied(3), ReviewOutcome::Accepted);
}
