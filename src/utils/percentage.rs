use std::{fmt::Display, ops::Deref};

use serde::Serialize;

use crate::routine::record::round_to;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `part` in `whole`, rounded to one decimal place. There is no share of nothing, so an
/// empty `whole` gives `None`.
pub fn count_percentage(part: usize, whole: usize) -> Option<Percentage> {
    if whole == 0 {
        return None;
    }
    Percentage::new_opt(round_to(part as f64 / whole as f64 * 100., 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_percentage() {
        assert_eq!(*count_percentage(1, 2).unwrap(), 50.0);
        assert_eq!(*count_percentage(1, 3).unwrap(), 33.3);
        assert_eq!(*count_percentage(2, 3).unwrap(), 66.7);
        assert_eq!(*count_percentage(0, 7).unwrap(), 0.0);
        assert_eq!(count_percentage(0, 0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(count_percentage(1, 2).unwrap().to_string(), "50.0%");
    }
}
