//! Input validation for award and redemption requests.
//!
//! Both callers (the admin action and the webhook ingestor) validate here
//! before any storage call; a rejected input performs no mutation.

use super::error::RewardError;

/// Validates an award request (add points).
///
/// # Errors
///
/// Returns an error if the email is empty or the point delta is not
/// positive.
pub fn validate_award(email: &str, points: i64) -> Result<(), RewardError> {
    if email.trim().is_empty() {
        return Err(RewardError::EmptyEmail);
    }
    validate_redemption(points)
}

/// Validates a redemption request (remove points).
///
/// The delta is expressed as a positive number of points to remove.
///
/// # Errors
///
/// Returns an error if the point delta is not positive.
pub fn validate_redemption(points: i64) -> Result<(), RewardError> {
    if points <= 0 {
        return Err(RewardError::NonPositivePoints(points));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_award() {
        assert_eq!(validate_award("a@x.com", 10), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_empty_email_rejected(#[case] email: &str) {
        assert_eq!(validate_award(email, 10), Err(RewardError::EmptyEmail));
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn test_non_positive_points_rejected(#[case] points: i64) {
        assert_eq!(
            validate_award("a@x.com", points),
            Err(RewardError::NonPositivePoints(points))
        );
        assert_eq!(
            validate_redemption(points),
            Err(RewardError::NonPositivePoints(points))
        );
    }

    #[test]
    fn test_empty_email_reported_before_points() {
        // Both fields invalid: the identity problem wins.
        assert_eq!(validate_award("", 0), Err(RewardError::EmptyEmail));
    }
}
