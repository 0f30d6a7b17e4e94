//! Amount formatting in the regional numbering convention.
//!
//! Digits are grouped as `xx,xx,xxx` and amounts are spelled out on the
//! lakh/crore scale, e.g. `1234567` becomes `"12,34,567"` and
//! `"Twelve Lakh Thirty-Four Thousand Five Hundred And Sixty-Seven Only"`.

use serde::Serialize;

const ONES: [&str; 20] = [
    "zero",
    "one",
    "two",
    "three",
    "four",
    "five",
    "six",
    "seven",
    "eight",
    "nine",
    "ten",
    "eleven",
    "twelve",
    "thirteen",
    "fourteen",
    "fifteen",
    "sixteen",
    "seventeen",
    "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// An amount together with both of its printed forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedAmount {
    /// Raw integer amount
    pub value: u64,
    /// Regional digit grouping
    pub grouped: String,
    /// Title-cased words ending in "Only"
    pub words: String,
}

impl FormattedAmount {
    /// Derives both printed forms from `value`.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self {
            value,
            grouped: group_digits(value),
            words: to_words(value),
        }
    }
}

/// Groups decimal digits as the last three, then pairs toward the left.
///
/// ```
/// use sanction_desk::core::amount::group_digits;
/// assert_eq!(group_digits(500), "500");
/// assert_eq!(group_digits(1234567), "12,34,567");
/// ```
#[must_use]
pub fn group_digits(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::with_capacity(head.len() / 2 + 2);
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

/// Spells `amount` in words on the lakh/crore scale, title-cased, with a
/// trailing "Only".
#[must_use]
pub fn to_words(amount: u64) -> String {
    format!("{} Only", title_case(&spell(amount)))
}

fn spell(n: u64) -> String {
    if n == 0 {
        return ONES[0].to_string();
    }

    let mut parts: Vec<String> = Vec::new();
    let crores = n / CRORE;
    let rest = n % CRORE;

    if crores > 0 {
        parts.push(format!("{} crore", spell(crores)));
    }
    let scales = [(rest / LAKH, "lakh"), ((rest % LAKH) / THOUSAND, "thousand")];
    for (count, name) in scales {
        if count > 0 {
            parts.push(format!("{} {name}", spell_below_hundred(count)));
        }
    }
    let hundreds = (rest % THOUSAND) / 100;
    if hundreds > 0 {
        parts.push(format!("{} hundred", spell_below_hundred(hundreds)));
    }

    let tail = rest % 100;
    if tail > 0 {
        let words = spell_below_hundred(tail);
        if parts.is_empty() {
            parts.push(words);
        } else {
            parts.push(format!("and {words}"));
        }
    }

    parts.join(" ")
}

fn spell_below_hundred(n: u64) -> String {
    // Callers only pass values below 100.
    let n = usize::try_from(n % 100).unwrap_or_default();
    if n < 20 {
        ONES[n].to_string()
    } else if n % 10 == 0 {
        TENS[n / 10].to_string()
    } else {
        format!("{}-{}", TENS[n / 10], ONES[n % 10])
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars().filter(|c| *c != ',') {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits_examples() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(500), "500");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(14450), "14,450");
        assert_eq!(group_digits(100_000), "1,00,000");
        assert_eq!(group_digits(1_234_567), "12,34,567");
        assert_eq!(group_digits(123_456_789), "12,34,56,789");
    }

    #[test]
    fn test_group_digits_preserves_digits_and_group_sizes() {
        let samples = (0..5000u64)
            .chain((0..64).map(|shift| 1u64 << shift))
            .chain([u64::MAX, 99_99_99_999, 10_00_00_000]);
        for n in samples {
            let grouped = group_digits(n);
            assert_eq!(grouped.replace(',', ""), n.to_string(), "digits of {n}");

            let sizes: Vec<usize> = grouped.rsplit(',').map(str::len).collect();
            if sizes.len() > 1 {
                assert_eq!(sizes[0], 3, "last group of {grouped}");
                if let Some((last, middle)) = sizes[1..].split_last() {
                    assert!(middle.iter().all(|s| *s == 2), "middle groups of {grouped}");
                    assert!((1..=2).contains(last), "leading group of {grouped}");
                }
            } else {
                assert!(grouped.len() <= 3);
            }
        }
    }

    #[test]
    fn test_to_words_zero() {
        assert_eq!(to_words(0), "Zero Only");
    }

    #[test]
    fn test_to_words_small_numbers() {
        assert_eq!(to_words(7), "Seven Only");
        assert_eq!(to_words(45), "Forty-Five Only");
        assert_eq!(to_words(100), "One Hundred Only");
        assert_eq!(to_words(101), "One Hundred And One Only");
        assert_eq!(to_words(1001), "One Thousand And One Only");
    }

    #[test]
    fn test_to_words_payment_amounts() {
        assert_eq!(
            to_words(14450),
            "Fourteen Thousand Four Hundred And Fifty Only"
        );
        assert_eq!(to_words(14030), "Fourteen Thousand And Thirty Only");
        assert_eq!(
            to_words(1_234_567),
            "Twelve Lakh Thirty-Four Thousand Five Hundred And Sixty-Seven Only"
        );
    }

    #[test]
    fn test_to_words_crore_scale() {
        assert_eq!(to_words(10_000_000), "One Crore Only");
        assert_eq!(
            to_words(99_999_999),
            "Nine Crore Ninety-Nine Lakh Ninety-Nine Thousand Nine Hundred And Ninety-Nine Only"
        );
        assert_eq!(to_words(10_000_000_000), "One Thousand Crore Only");
    }

    #[test]
    fn test_to_words_has_no_commas() {
        for n in [1_234, 12_345_678, 987_654_321_012] {
            assert!(!to_words(n).contains(','));
        }
    }

    #[test]
    fn test_formatted_amount_derives_both_forms() {
        let amount = FormattedAmount::new(28480);
        assert_eq!(amount.value, 28480);
        assert_eq!(amount.grouped, "28,480");
        assert_eq!(amount.words, "Twenty-Eight Thousand Four Hundred And Eighty Only");
    }
}
