/// Password hashing scheme.
///
/// Implementations must be deterministic in `verify`: a hash produced by
/// `hash(p)` verifies against `p` and nothing else.
pub trait PasswordHasher {
    fn hash(&self, password: &str) -> String;

    fn verify(&self, password: &str, hash: &str) -> bool;
}

impl<H: PasswordHasher + ?Sized> PasswordHasher for &H {
    fn hash(&self, password: &str) -> String {
        (**self).hash(password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        (**self).verify(password, hash)
    }
}
