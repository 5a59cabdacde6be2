//! Emptiness rule for cached payloads.

/// Decides whether a payload is worth caching.
///
/// The same rule gates both sides of cache-aside access: a cached value that is
/// not populated does not short-circuit the fetch, and a fetched value that is not
/// populated is returned as absent without being stored. Collections are populated
/// when non-empty; scalar payloads should return `true` unconditionally.
pub trait Populated {
    /// Whether this value carries anything worth remembering.
    fn is_populated(&self) -> bool;
}

impl<T> Populated for Vec<T> {
    fn is_populated(&self) -> bool {
        !self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vec_is_not_populated() {
        assert!(!Vec::<u8>::new().is_populated());
        assert!(vec![1u8].is_populated());
    }
}
