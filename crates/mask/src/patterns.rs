use once_cell::sync::Lazy;
use regex::Regex;

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| compile(r"[0-9]{11}"));
static NATIONAL_ID_RE: Lazy<Regex> = Lazy::new(|| compile(r"[0-9]{17}[0-9X]"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| compile(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"));
static PAYMENT_CARD_RE: Lazy<Regex> = Lazy::new(|| compile(r"[0-9]{16,19}"));

const EMAIL_MASK: &str = "***@***";

fn compile(pattern: &str) -> Regex {
    // Patterns are literals above; a failure here is a programming error.
    Regex::new(pattern).unwrap_or_else(|err| panic!("invalid PII pattern {pattern:?}: {err}"))
}

/// A category of personally identifiable information recognised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PiiKind {
    /// 11-digit mobile-number-like run.
    Mobile,
    /// 18-character national-ID-like run (17 digits + digit or `X`).
    NationalId,
    /// Email address.
    Email,
    /// 16 to 19 digit payment-card-like run.
    PaymentCard,
}

impl PiiKind {
    /// Rule table order used by [`mask`](crate::mask).
    pub const ORDER: [PiiKind; 4] = [
        PiiKind::Mobile,
        PiiKind::NationalId,
        PiiKind::Email,
        PiiKind::PaymentCard,
    ];

    /// Stable lowercase name, safe to log.
    pub fn as_str(self) -> &'static str {
        match self {
            PiiKind::Mobile => "mobile",
            PiiKind::NationalId => "national_id",
            PiiKind::Email => "email",
            PiiKind::PaymentCard => "payment_card",
        }
    }

    /// Compiled recognition pattern (unanchored).
    pub fn pattern(self) -> &'static Regex {
        match self {
            PiiKind::Mobile => Lazy::force(&MOBILE_RE),
            PiiKind::NationalId => Lazy::force(&NATIONAL_ID_RE),
            PiiKind::Email => Lazy::force(&EMAIL_RE),
            PiiKind::PaymentCard => Lazy::force(&PAYMENT_CARD_RE),
        }
    }

    /// Redaction template applied to one matched span.
    ///
    /// `matched` is expected to be a full match of [`pattern`](Self::pattern);
    /// every pattern only matches ASCII, so byte offsets are char offsets.
    pub fn redact(self, matched: &str) -> String {
        match self {
            PiiKind::Mobile => format!("{}****{}", head(matched, 3), from(matched, 7)),
            PiiKind::NationalId => format!("{}************{}", head(matched, 3), tail(matched, 4)),
            PiiKind::Email => EMAIL_MASK.to_owned(),
            PiiKind::PaymentCard => {
                format!("{} **** **** {}", head(matched, 4), tail(matched, 4))
            }
        }
    }
}

fn head(s: &str, n: usize) -> &str {
    s.get(..n).unwrap_or(s)
}

fn from(s: &str, n: usize) -> &str {
    s.get(n..).unwrap_or("")
}

fn tail(s: &str, n: usize) -> &str {
    s.get(s.len().saturating_sub(n)..).unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_fixed() {
        let names: Vec<_> = PiiKind::ORDER.iter().map(|k| k.as_str()).collect();
        assert_eq!(names, ["mobile", "national_id", "email", "payment_card"]);
    }

    #[test]
    fn mobile_template() {
        assert_eq!(PiiKind::Mobile.redact("13812345678"), "138****5678");
    }

    #[test]
    fn national_id_template_keeps_trailing_x() {
        assert_eq!(
            PiiKind::NationalId.redact("11010519491231002X"),
            "110************002X"
        );
    }

    #[test]
    fn email_template_is_constant() {
        assert_eq!(PiiKind::Email.redact("someone@example.com"), "***@***");
    }

    #[test]
    fn card_template() {
        assert_eq!(
            PiiKind::PaymentCard.redact("6222021234567890"),
            "6222 **** **** 7890"
        );
    }

    #[test]
    fn national_id_rejects_lowercase_x() {
        assert!(!PiiKind::NationalId.pattern().is_match("11010519491231002x"));
    }

    #[test]
    fn email_requires_tld_of_two_letters() {
        assert!(!PiiKind::Email.pattern().is_match("a@b.c"));
        assert!(PiiKind::Email.pattern().is_match("a@b.cn"));
    }
}
