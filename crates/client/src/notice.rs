//! Transient user-facing notices - the headless analog of the web app's
//! toast stack. Screens push notices as they work; the front-end drains
//! them with [`NoticeSink::take_notices`] after each interaction.

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A single transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Per-screen notice buffer.
#[derive(Debug, Default)]
pub struct NoticeSink {
    notices: Vec<Notice>,
}

impl NoticeSink {
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Drain pending notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties_the_sink() {
        let mut sink = NoticeSink::default();
        sink.push(Notice::success("Cart updated successfully"));
        sink.push(Notice::error("Failed to update cart"));

        let drained = sink.take_notices();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, NoticeLevel::Success);
        assert!(sink.take_notices().is_empty());
    }
}
