// src/probe/classify.rs
// =============================================================================
// Decides which HTTP status codes are worth reporting, and how to label them.
//
// Interesting codes:
// - 200-204: the path exists and answered
// - 301, 302, 307, 308: the path exists but points elsewhere
// - 401, 403: the path exists but is protected
//
// Everything else (404, 500, ...) still counts as a request but is dropped.
// =============================================================================

const INTERESTING: [u16; 11] = [200, 201, 202, 203, 204, 301, 302, 307, 308, 401, 403];

pub fn is_interesting(status: u16) -> bool {
    INTERESTING.contains(&status)
}

/// Display category of a kept status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Ok,
    Redirect,
    Forbidden,
    Unauthorized,
    Other,
}

impl StatusCategory {
    pub fn of(status: u16) -> Self {
        match status {
            200 => StatusCategory::Ok,
            301 | 302 | 307 | 308 => StatusCategory::Redirect,
            403 => StatusCategory::Forbidden,
            401 => StatusCategory::Unauthorized,
            _ => StatusCategory::Other,
        }
    }

    pub fn label(self) -> Option<&'static str> {
        match self {
            StatusCategory::Ok => Some("OK"),
            StatusCategory::Redirect => Some("REDIRECT"),
            StatusCategory::Forbidden => Some("FORBIDDEN"),
            StatusCategory::Unauthorized => Some("UNAUTHORIZED"),
            StatusCategory::Other => None,
        }
    }
}

/// "[200 OK]", "[302 REDIRECT]", or just "[204]" for codes without a label.
pub fn status_tag(status: u16) -> String {
    match StatusCategory::of(status).label() {
        Some(label) => format!("[{} {}]", status, label),
        None => format!("[{}]", status),
    }
}
