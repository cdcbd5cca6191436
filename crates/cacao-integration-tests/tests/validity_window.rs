//! Boundary behaviour of the validity window.

use cacao_core::{Cacao, format_timestamp};
use cacao_test::{signed_ethereum_cacao, test_ethereum_wallet, test_issued_at, test_siwe_request};
use cacao_verify::{VerificationError, VerifyOptions, verify};
use chrono::{DateTime, TimeDelta, Utc};

fn shifted(base: DateTime<Utc>, secs: i64) -> DateTime<Utc> {
    base.checked_add_signed(TimeDelta::seconds(secs)).unwrap()
}

fn capability(not_before: Option<i64>, expires: Option<i64>) -> Cacao {
    let wallet = test_ethereum_wallet();
    let mut request = test_siwe_request(&wallet.address());
    if let Some(secs) = not_before {
        request = request.with_not_before(format_timestamp(shifted(test_issued_at(), secs)));
    }
    if let Some(secs) = expires {
        request = request.with_expiration_time(format_timestamp(shifted(test_issued_at(), secs)));
    }
    signed_ethereum_cacao(&wallet, &request)
}

fn at(secs: i64) -> VerifyOptions {
    VerifyOptions::new()
        .at(shifted(test_issued_at(), secs))
        .with_clock_skew_secs(0)
}

#[test]
fn test_issued_at_boundary() {
    let cacao = capability(None, None);

    assert_eq!(verify(&cacao, &at(0)), Ok(()));
    assert!(matches!(
        verify(&cacao, &at(-1)),
        Err(VerificationError::NotYetValid { field: "iat", .. })
    ));
    // Skew pulls the boundary earlier by exactly its width.
    assert_eq!(verify(&cacao, &at(-30).with_clock_skew_secs(30)), Ok(()));
    assert!(verify(&cacao, &at(-31).with_clock_skew_secs(30)).is_err());
}

#[test]
fn test_not_before_boundary() {
    let cacao = capability(Some(600), None);

    assert!(matches!(
        verify(&cacao, &at(599)),
        Err(VerificationError::NotYetValid { field: "nbf", .. })
    ));
    assert_eq!(verify(&cacao, &at(600)), Ok(()));
    assert_eq!(verify(&cacao, &at(540).with_clock_skew_secs(60)), Ok(()));
}

#[test]
fn test_expiration_boundary() {
    let cacao = capability(None, Some(3600));

    assert_eq!(verify(&cacao, &at(3600)), Ok(()));
    assert!(matches!(
        verify(&cacao, &at(3601)),
        Err(VerificationError::Expired { .. })
    ));
    assert_eq!(verify(&cacao, &at(3660).with_clock_skew_secs(60)), Ok(()));
}

#[test]
fn test_phase_out_extends_expiration() {
    let cacao = capability(None, Some(3600));

    assert_eq!(
        verify(&cacao, &at(3900).with_revocation_phase_out_secs(300)),
        Ok(())
    );
    assert!(
        verify(&cacao, &at(3901).with_revocation_phase_out_secs(300)).is_err()
    );
    // Phase-out and skew add up.
    assert_eq!(
        verify(
            &cacao,
            &at(3960)
                .with_revocation_phase_out_secs(300)
                .with_clock_skew_secs(60)
        ),
        Ok(())
    );
}

#[test]
fn test_disabled_expiration_check() {
    let cacao = capability(None, Some(60));
    let years_later = at(100_000_000);

    assert!(verify(&cacao, &years_later).is_err());
    assert_eq!(
        verify(&cacao, &years_later.with_expiration_check(false)),
        Ok(())
    );
}

#[test]
fn test_inverted_window_never_verifies() {
    // nbf after exp: construction succeeds, every instant fails.
    let cacao = capability(Some(7200), Some(3600));

    for secs in [0, 3600, 5000, 7200, 9000] {
        assert!(
            verify(&cacao, &at(secs)).is_err(),
            "inverted window verified at +{secs}s"
        );
    }
}

#[test]
fn test_huge_tolerances_saturate() {
    let cacao = capability(None, Some(60));
    let options = VerifyOptions::new()
        .at(DateTime::<Utc>::MAX_UTC)
        .with_clock_skew_secs(u64::MAX)
        .with_revocation_phase_out_secs(u64::MAX);

    assert_eq!(verify(&cacao, &options), Ok(()));
}
