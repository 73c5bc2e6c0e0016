//! Maps core [`Notice`] signals to user-facing messages.

use std::io::{self, Write};

use cartsim_core::Notice;

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Severity and text for a notice.
#[must_use]
pub fn describe(notice: &Notice) -> (Severity, String) {
    match notice {
        Notice::AddedNew { name, .. } => (Severity::Success, format!("{name} added!")),
        Notice::Incremented { name, quantity, .. } => (
            Severity::Info,
            format!("Added one more {name} (now {quantity})"),
        ),
        Notice::Removed { name, .. } => (Severity::Success, format!("{name} has been removed.")),
        Notice::NotInCart { id } => (
            Severity::Warning,
            format!("Product {id} is not in the cart."),
        ),
        Notice::Cleared => (
            Severity::Success,
            "Cart cleared. The order and its saved data have been deleted.".to_string(),
        ),
        Notice::MissingPostalCode => (
            Severity::Warning,
            "Missing postal code: enter a postal code to calculate shipping.".to_string(),
        ),
        Notice::TotalsUnavailable => (
            Severity::Error,
            "The order total is too large to calculate. Remove some products.".to_string(),
        ),
        Notice::CatalogLoadFailed { reason } => (
            Severity::Error,
            format!("Could not load the product catalog. Check the catalog file. ({reason})"),
        ),
    }
}

/// Write every notice to `out`, one per line.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn notify_all<W: Write>(out: &mut W, notices: &[Notice]) -> io::Result<()> {
    for notice in notices {
        let (severity, text) = describe(notice);
        if notice.is_problem() {
            tracing::warn!(?notice, "Notifying user of a problem");
        } else {
            tracing::debug!(?notice, "Notifying user");
        }
        writeln!(out, "[{}] {text}", severity.label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cartsim_core::ProductId;

    use super::*;

    #[test]
    fn test_added_and_incremented_differ() {
        let (sev_new, new) = describe(&Notice::AddedNew {
            id: ProductId::new(1),
            name: "Widget".to_string(),
        });
        let (sev_more, more) = describe(&Notice::Incremented {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            quantity: 2,
        });
        assert_eq!(sev_new, Severity::Success);
        assert_eq!(sev_more, Severity::Info);
        assert_eq!(new, "Widget added!");
        assert!(more.contains("now 2"));
    }

    #[test]
    fn test_problem_notices_are_warnings_or_errors() {
        assert_eq!(describe(&Notice::MissingPostalCode).0, Severity::Warning);
        assert_eq!(describe(&Notice::TotalsUnavailable).0, Severity::Error);
        assert_eq!(
            describe(&Notice::CatalogLoadFailed {
                reason: "boom".to_string()
            })
            .0,
            Severity::Error
        );
    }

    #[test]
    fn test_notify_all_writes_lines() {
        let mut out = Vec::new();
        notify_all(&mut out, &[Notice::Cleared, Notice::MissingPostalCode]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[ok] Cart cleared"));
        assert!(lines[1].starts_with("[warning] Missing postal code"));
    }
}
