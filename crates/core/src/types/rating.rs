//! Product rating.

use serde::{Deserialize, Serialize};

/// An average review score with its sample size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average score in `[0.0, 5.0]`.
    pub rate: f64,
    /// Number of reviews behind the average.
    pub count: u32,
}

impl Rating {
    /// Create a new rating.
    #[must_use]
    pub const fn new(rate: f64, count: u32) -> Self {
        Self { rate, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_serde() {
        let rating = Rating::new(4.5, 120);
        let json = serde_json::to_string(&rating).expect("serialize");
        let back: Rating = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, rating);
    }
}
