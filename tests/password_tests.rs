//! Unit tests for argon2 password hashing.

use grepolis_stats::auth::password;

#[test]
fn hash_then_verify_roundtrip() {
    let hash = password::hash("correct horse battery staple").expect("hash");
    assert!(password::verify("correct horse battery staple", &hash));
}

#[test]
fn wrong_password_is_rejected() {
    let hash = password::hash("s3cret").expect("hash");
    assert!(!password::verify("S3cret", &hash));
    assert!(
        !password::verify("s3cret ", &hash),
        "trailing space must not verify"
    );
}

#[test]
fn equal_passwords_hash_differently() {
    // Fresh salt per call
    let a = password::hash("same input").expect("hash");
    let b = password::hash("same input").expect("hash");
    assert_ne!(a, b);
}

#[test]
fn garbage_stored_hash_never_verifies() {
    assert!(!password::verify("anything", "not-a-phc-string"));
    assert!(!password::verify("anything", ""));
}
