//! Input checks shared by the entity modules.

use crate::error::{PlannerError, PlannerResult};

/// Longest title accepted for events, tasks and milestones.
pub const MAX_TITLE_LEN: usize = 200;

/// Trim a title and check it is 1..=200 characters.
pub fn title(raw: &str) -> PlannerResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::validation("title cannot be empty"));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(PlannerError::validation(format!(
            "title is {len} characters, maximum is {MAX_TITLE_LEN}"
        )));
    }
    Ok(trimmed.to_string())
}

/// Collapse blank optional text to `None`.
pub fn optional_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_bounds() {
        assert_eq!(title("  Rust Night ").unwrap(), "Rust Night");
        assert!(title("   ").is_err());
        assert!(title(&"x".repeat(200)).is_ok());
        assert!(title(&"x".repeat(201)).is_err());
        // Counted in characters, not bytes.
        assert!(title(&"é".repeat(200)).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ".into())), None);
        assert_eq!(optional_text(Some(" ana ".into())), Some("ana".into()));
        assert_eq!(optional_text(None), None);
    }
}
