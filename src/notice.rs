use serde::Serialize;

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Danger,
}

/// A transient message surfaced to the user alongside a response body.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Response body carrying only notices (logout, password change, deletes).
#[derive(Debug, Serialize)]
pub struct NoticeResponse {
    pub notices: Vec<Notice>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Danger,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_serializes_with_lowercase_level() {
        let json = serde_json::to_string(&Notice::success("Medicine added")).unwrap();
        assert!(json.contains(r#""level":"success""#));
        assert!(json.contains("Medicine added"));
    }

    #[test]
    fn constructors_set_levels() {
        assert_eq!(Notice::info("x").level, NoticeLevel::Info);
        assert_eq!(Notice::warning("x").level, NoticeLevel::Warning);
        assert_eq!(Notice::danger("x").level, NoticeLevel::Danger);
    }
}
