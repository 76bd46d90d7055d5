use std::fmt;

/// Errors reported by a [`StripedHashMap`](crate::StripedHashMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapError {
    /// The map was constructed with a capacity of zero.
    InvalidCapacity,
    /// The map was constructed with a concurrency level of zero.
    InvalidConcurrencyLevel,
    /// The requested key is not present in the map.
    KeyNotFound,
    /// A bounded wait (`try_get`, `try_get_for`) could not acquire the
    /// stripe lock that owns the key.
    LockUnavailable,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::InvalidCapacity => write!(f, "capacity must be greater than zero"),
            MapError::InvalidConcurrencyLevel => {
                write!(f, "concurrency level must be greater than zero")
            }
            MapError::KeyNotFound => write!(f, "key not found"),
            MapError::LockUnavailable => write!(f, "stripe lock is held elsewhere"),
        }
    }
}

impl std::error::Error for MapError {}

#[cfg(test)]
mod tests {
    use super::MapError;

    #[test]
    fn test_display() {
        assert_eq!(MapError::KeyNotFound.to_string(), "key not found");
        assert_eq!(
            MapError::InvalidCapacity.to_string(),
            "capacity must be greater than zero"
        );
        let boxed: Box<dyn std::error::Error> = Box::new(MapError::LockUnavailable);
        assert_eq!(boxed.to_string(), "stripe lock is held elsewhere");
    }
}
