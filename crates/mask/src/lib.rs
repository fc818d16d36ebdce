//! Stateless PII masking for free-form text.
//!
//! The engine walks a fixed, ordered table of [`PiiKind`] rules. Each rule
//! rewrites every non-overlapping match over the *whole* string before the
//! next rule runs, so later rules see the output of earlier ones:
//!
//! | Order | Kind | Pattern | Redaction |
//! |-------|------|---------|-----------|
//! | 1 | [`Mobile`](PiiKind::Mobile) | 11 digits | first 3 + `****` + from index 7 |
//! | 2 | [`NationalId`](PiiKind::NationalId) | 17 digits + digit or `X` | first 3 + 12 `*` + last 4 |
//! | 3 | [`Email`](PiiKind::Email) | `local@domain.tld` | `***@***` |
//! | 4 | [`PaymentCard`](PiiKind::PaymentCard) | 16-19 digits | first 4 + ` **** **** ` + last 4 |
//!
//! The order is part of the output contract. Any run of 11 or more digits is
//! split by the mobile rule first, which means the later digit rules only fire
//! when applied on their own through [`mask_with`].
//!
//! # Example
//!
//! ```rust
//! use mask::mask;
//!
//! let masked = mask("call 13812345678 or a@b.com");
//! assert_eq!(masked, "call 138****5678 or ***@***");
//! ```

mod patterns;

pub use patterns::PiiKind;

/// Result of a masking pass that also reports how many spans were replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    /// Redacted text.
    pub text: String,
    /// Number of spans replaced across all rules.
    pub redactions: usize,
}

/// Mask every PII span in `text` using the full rule table in [`PiiKind::ORDER`].
///
/// Pure, total and deterministic.
pub fn mask(text: &str) -> String {
    mask_detailed(text).text
}

/// Same as [`mask`], but also returns the number of replaced spans.
pub fn mask_detailed(text: &str) -> Masked {
    mask_with(text, &PiiKind::ORDER)
}

/// Apply only the given rules, in the given order.
pub fn mask_with(text: &str, kinds: &[PiiKind]) -> Masked {
    let mut current = text.to_owned();
    let mut redactions = 0;

    for kind in kinds {
        let pattern = kind.pattern();
        let hits = pattern.find_iter(&current).count();
        if hits == 0 {
            continue;
        }
        redactions += hits;
        current = pattern
            .replace_all(&current, |caps: &regex::Captures<'_>| kind.redact(&caps[0]))
            .into_owned();
    }

    Masked {
        text: current,
        redactions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_phone_and_email_in_sentence() {
        assert_eq!(
            mask("call 13812345678 or a@b.com"),
            "call 138****5678 or ***@***"
        );
    }

    #[test]
    fn text_without_pii_is_untouched() {
        let input = "nothing to hide here, order #12345";
        let out = mask_detailed(input);
        assert_eq!(out.text, input);
        assert_eq!(out.redactions, 0);
    }

    #[test]
    fn empty_input() {
        assert_eq!(mask(""), "");
    }

    #[test]
    fn counts_every_replacement() {
        let out = mask_detailed("13812345678, 13987654321 and x@y.org");
        assert_eq!(out.text, "138****5678, 139****4321 and ***@***");
        assert_eq!(out.redactions, 3);
    }

    #[test]
    fn national_id_is_split_by_mobile_rule_first() {
        // 17 digits + X: the mobile rule consumes the first 11 digits and the
        // remainder is too short for the ID rule.
        assert_eq!(mask("ID 11010519491231002X"), "ID 110****9491231002X");
    }

    #[test]
    fn national_id_rule_alone() {
        let out = mask_with("ID 11010519491231002X.", &[PiiKind::NationalId]);
        assert_eq!(out.text, "ID 110************002X.");
        assert_eq!(out.redactions, 1);
    }

    #[test]
    fn payment_card_rule_alone() {
        let out = mask_with("card 6222021234567890123 ok", &[PiiKind::PaymentCard]);
        assert_eq!(out.text, "card 6222 **** **** 0123 ok");
    }

    #[test]
    fn long_digit_runs_are_cut_in_elevens() {
        // 22 digits: two back-to-back mobile matches.
        assert_eq!(
            mask("1234567890123456789012"),
            "123****8901234****9012"
        );
    }

    #[test]
    fn email_masking_is_idempotent() {
        let once = mask("mail bob.smith+tag@example.co.uk now");
        assert_eq!(once, "mail ***@*** now");
        assert_eq!(mask(&once), once);
    }

    #[test]
    fn card_masking_is_idempotent() {
        let rule = [PiiKind::PaymentCard];
        let once = mask_with("4111111111111111", &rule).text;
        assert_eq!(once, "4111 **** **** 1111");
        assert_eq!(mask_with(&once, &rule).text, once);
    }

    #[test]
    fn non_ascii_digits_are_left_alone() {
        // Full-width digits are not matched by the ASCII digit class.
        let input = "电话 １３８１２３４５６７８";
        assert_eq!(mask(input), input);
    }

    #[test]
    fn surrounding_text_is_preserved() {
        let out = mask("前缀13812345678后缀");
        assert_eq!(out, "前缀138****5678后缀");
    }
}
