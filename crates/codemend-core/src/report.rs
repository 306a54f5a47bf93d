//! Cleanup of raw interpreter error output before it reaches a display
//! surface.

use regex::Regex;

/// Strip file-path noise out of an error report and collapse it to one line.
///
/// Interpreter locations like `File "/app/main.py", line 3` are removed so
/// the message reads as the error itself; runs of whitespace (including
/// newlines) collapse to single spaces.
pub fn clean_error(raw: &str) -> String {
    if raw.is_empty() {
        return "Unknown error".to_string();
    }

    let mut cleaned = raw.to_string();

    if let Ok(re) = Regex::new(r#"File\s+".+?",\s+line\s+\d+"#) {
        cleaned = re.replace_all(&cleaned, "").to_string();
    }
    if let Ok(re) = Regex::new(r"\s+") {
        cleaned = re.replace_all(&cleaned, " ").to_string();
    }
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return "Error occurred (empty message)".to_string();
    }
    cleaned.to_string()
}

/// First `line N` number mentioned in an error report, if any.
pub fn error_line_number(raw: &str) -> Option<u32> {
    let re = Regex::new(r"(?i)line\s+(\d+)").ok()?;
    let caps = re.captures(raw)?;
    caps.get(1)?.as_str().parse().ok()
}
