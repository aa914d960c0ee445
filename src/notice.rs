use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

/// A transient message for the toast surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub display_ms: u32,
}

impl Notice {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity,
            display_ms: display_ms(severity),
        }
    }

    pub fn record_saved() -> Self {
        Self::new(Severity::Success, "Record saved", "Thanks, your hours are logged.")
    }

    pub fn exit_before_entry() -> Self {
        Self::new(
            Severity::Warning,
            "Invalid exit time",
            "The exit time is earlier than the entry time.",
        )
    }

    pub fn entry_before_previous_exit() -> Self {
        Self::new(
            Severity::Warning,
            "Invalid entry time",
            "The entry time is earlier than the previous record's exit.",
        )
    }

    pub fn exit_without_entry() -> Self {
        Self::new(
            Severity::Warning,
            "Missing entry time",
            "Set the entry time before the exit time.",
        )
    }

    pub fn previous_incomplete() -> Self {
        Self::new(
            Severity::Warning,
            "Previous record incomplete",
            "A new record cannot be added until the previous one is completed.",
        )
    }

    pub fn previous_empty() -> Self {
        Self::new(
            Severity::Warning,
            "Previous record empty",
            "A new record cannot be added while the previous one is empty.",
        )
    }

    pub fn last_record_kept() -> Self {
        Self::new(
            Severity::Danger,
            "Day must keep at least one record",
            "Every day needs at least one record.",
        )
    }

    pub fn week_cleared() -> Self {
        Self::new(Severity::Info, "Week cleared", "All recorded hours were removed.")
    }
}

/// Success toasts are short, everything else stays up longer.
pub fn display_ms(severity: Severity) -> u32 {
    match severity {
        Severity::Success => 1500,
        Severity::Info | Severity::Warning | Severity::Danger => 3500,
    }
}
