//! core::naming
//!
//! Scratch vector naming.
//!
//! # Features
//!
//! - Generate collision-resistant scratch map names
//! - Apply the configured name prefix

use rand::Rng;

use crate::core::types::{TypeError, VectorName};

/// Default prefix for scratch vector maps.
pub const DEFAULT_SCRATCH_PREFIX: &str = "tmp_regionvector_";

/// Number of random letters appended to the prefix.
pub const SUFFIX_LEN: usize = 5;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a random suffix of ASCII letters.
pub fn random_suffix<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}

/// Generate a scratch vector name from a prefix.
///
/// Uniqueness is probabilistic: 52^5 names per prefix within one mapset.
///
/// # Example
///
/// ```
/// use region_area::core::naming::{scratch_name, DEFAULT_SCRATCH_PREFIX};
///
/// let name = scratch_name(DEFAULT_SCRATCH_PREFIX).unwrap();
/// assert!(name.as_str().starts_with("tmp_regionvector_"));
/// assert_eq!(name.as_str().len(), "tmp_regionvector_".len() + 5);
/// ```
pub fn scratch_name(prefix: &str) -> Result<VectorName, TypeError> {
    let suffix = random_suffix(&mut rand::rng(), SUFFIX_LEN);
    VectorName::new(format!("{}{}", prefix, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn suffix_has_requested_length() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(random_suffix(&mut rng, 5).len(), 5);
        assert_eq!(random_suffix(&mut rng, 0), "");
    }

    #[test]
    fn suffix_is_letters_only() {
        let mut rng = StdRng::seed_from_u64(42);
        let suffix = random_suffix(&mut rng, 200);
        assert!(suffix.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn same_seed_same_suffix() {
        let a = random_suffix(&mut StdRng::seed_from_u64(1), 5);
        let b = random_suffix(&mut StdRng::seed_from_u64(1), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn scratch_name_is_valid_vector_name() {
        let name = scratch_name(DEFAULT_SCRATCH_PREFIX).unwrap();
        assert!(name.as_str().starts_with(DEFAULT_SCRATCH_PREFIX));
        assert_eq!(name.mapset(), None);
    }

    #[test]
    fn scratch_names_differ() {
        let names: std::collections::HashSet<_> = (0..20)
            .map(|_| scratch_name(DEFAULT_SCRATCH_PREFIX).unwrap())
            .collect();
        assert!(names.len() > 1);
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        assert!(scratch_name("9tmp_").is_err());
        assert!(scratch_name("tmp-").is_err());
    }
}
