//! Identity number validators.
//!
//! Both validators strip punctuation, require eleven digits that are not all
//! the same, and verify modulo-11 check digits. They are total predicates:
//! malformed input returns `false`.

const NATIONAL_ID_LENGTH: usize = 11;
const SOCIAL_INSURANCE_WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

fn digits_of(id: &str) -> Vec<u32> {
    id.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_identical(digits: &[u32]) -> bool {
    digits.windows(2).all(|pair| pair[0] == pair[1])
}

/// Maps a weighted sum to its modulo-11 check digit.
fn check_digit(weighted_sum: u32) -> u32 {
    let remainder = weighted_sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

fn weighted_sum(digits: &[u32], weights: impl Iterator<Item = u32>) -> u32 {
    digits.iter().zip(weights).map(|(d, w)| d * w).sum()
}

/// Returns true if `id` is a valid national identity number.
///
/// The first check digit uses weights 10 down to 2 over the first nine
/// digits; the second uses weights 11 down to 2 over the first ten.
///
/// # Examples
///
/// ```
/// use payroll_engine::validation::is_valid_national_id;
///
/// assert!(is_valid_national_id("529.982.247-25"));
/// assert!(!is_valid_national_id("529.982.247-26"));
/// assert!(!is_valid_national_id("11111111111"));
/// ```
pub fn is_valid_national_id(id: &str) -> bool {
    let digits = digits_of(id);
    if digits.len() != NATIONAL_ID_LENGTH || all_identical(&digits) {
        return false;
    }

    let first = check_digit(weighted_sum(&digits[..9], (2..=10).rev()));
    let second = check_digit(weighted_sum(&digits[..10], (2..=11).rev()));

    first == digits[9] && second == digits[10]
}

/// Returns true if `id` is a valid social insurance number.
///
/// A single check digit is computed with the weights
/// `[3, 2, 9, 8, 7, 6, 5, 4, 3, 2]` over the first ten digits.
///
/// # Examples
///
/// ```
/// use payroll_engine::validation::is_valid_social_insurance_number;
///
/// assert!(is_valid_social_insurance_number("120.54418.83-0"));
/// assert!(!is_valid_social_insurance_number("120.54418.83-1"));
/// ```
pub fn is_valid_social_insurance_number(id: &str) -> bool {
    let digits = digits_of(id);
    if digits.len() != NATIONAL_ID_LENGTH || all_identical(&digits) {
        return false;
    }

    let expected = check_digit(weighted_sum(&digits[..10], SOCIAL_INSURANCE_WEIGHTS.into_iter()));
    expected == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_national_ids() {
        assert!(is_valid_national_id("52998224725"));
        assert!(is_valid_national_id("111.444.777-35"));
    }

    #[test]
    fn test_national_id_with_wrong_check_digits() {
        assert!(!is_valid_national_id("52998224726"));
        assert!(!is_valid_national_id("52998224715"));
    }

    #[test]
    fn test_national_id_with_repeated_digits_is_rejected() {
        for digit in 0..=9 {
            let id = digit.to_string().repeat(11);
            assert!(!is_valid_national_id(&id), "{} should be rejected", id);
        }
    }

    #[test]
    fn test_national_id_with_wrong_length_is_rejected() {
        assert!(!is_valid_national_id(""));
        assert!(!is_valid_national_id("5299822472"));
        assert!(!is_valid_national_id("529982247250"));
        assert!(!is_valid_national_id("abc.def.ghi-jk"));
    }

    #[test]
    fn test_national_id_ignores_punctuation_and_letters() {
        assert!(is_valid_national_id(" 529 982 247 25 "));
        assert!(is_valid_national_id("529x982x247x25"));
    }

    #[test]
    fn test_valid_social_insurance_numbers() {
        assert!(is_valid_social_insurance_number("12054418830"));
        assert!(is_valid_social_insurance_number("123.45678.90-0"));
        assert!(is_valid_social_insurance_number("17000000005"));
    }

    #[test]
    fn test_social_insurance_number_with_wrong_check_digit() {
        assert!(!is_valid_social_insurance_number("12054418831"));
        assert!(!is_valid_social_insurance_number("17000000004"));
    }

    #[test]
    fn test_social_insurance_number_rejects_repeated_digits_and_bad_length() {
        assert!(!is_valid_social_insurance_number("00000000000"));
        assert!(!is_valid_social_insurance_number("1205441883"));
        assert!(!is_valid_social_insurance_number(""));
    }

    #[test]
    fn test_check_digit_maps_small_remainders_to_zero() {
        assert_eq!(check_digit(22), 0);
        assert_eq!(check_digit(23), 0);
        assert_eq!(check_digit(24), 9);
    }
}
