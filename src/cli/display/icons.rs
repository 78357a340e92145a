//! Status icons for CLI output

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Everything ready
    pub const SUCCESS: &'static str = "✓";

    /// Partially ready
    pub const WARNING: &'static str = "⚠";

    /// Nothing ready
    pub const ERROR: &'static str = "✗";

    /// Nothing to count
    pub const EMPTY: &'static str = "-";

    /// Get status icon based on ready/total counts
    pub fn get_ready_icon(ready: usize, total: usize) -> &'static str {
        if total == 0 {
            Self::EMPTY
        } else if ready == total {
            Self::SUCCESS
        } else if ready > 0 {
            Self::WARNING
        } else {
            Self::ERROR
        }
    }

    /// Get status text based on ready/total counts
    pub fn get_status_text(ready: usize, total: usize) -> &'static str {
        if total == 0 {
            "Empty"
        } else if ready == total {
            "Healthy"
        } else if ready > 0 {
            "Degraded"
        } else {
            "Down"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_ready_icon() {
        assert_eq!(StatusIcon::get_ready_icon(3, 3), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_ready_icon(2, 3), StatusIcon::WARNING);
        assert_eq!(StatusIcon::get_ready_icon(0, 3), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_ready_icon(0, 0), StatusIcon::EMPTY);
    }

    #[test]
    fn test_get_status_text() {
        assert_eq!(StatusIcon::get_status_text(3, 3), "Healthy");
        assert_eq!(StatusIcon::get_status_text(2, 3), "Degraded");
        assert_eq!(StatusIcon::get_status_text(0, 3), "Down");
        assert_eq!(StatusIcon::get_status_text(0, 0), "Empty");
    }
}
