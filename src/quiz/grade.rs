//! Grade table
//!
//! Grades are listed lowest threshold first and checked from the top down;
//! the first entry is the catch-all.

use serde::{Deserialize, Serialize};

use crate::Rgba;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub name: String,
    pub color: Rgba,
    /// Fraction of correct answers required, 0-1
    pub threshold: f32,
}

impl Grade {
    pub fn new(name: impl Into<String>, color: Rgba, threshold: f32) -> Self {
        Self {
            name: name.into(),
            color,
            threshold,
        }
    }

    /// Correct answers needed out of `total`: `ceil(total * threshold)`.
    ///
    /// Computed in f64 with a relative slack of one f32 epsilon, which
    /// absorbs the representation error of the f32 threshold and nothing more.
    pub fn required(&self, total: usize) -> usize {
        let product = total as f64 * f64::from(self.threshold);
        let needed = (product - product * f64::from(f32::EPSILON)).ceil();
        needed.max(0.0) as usize
    }

    pub fn requirement_satisfied(&self, correct: usize, total: usize) -> bool {
        self.required(total) <= correct
    }
}

/// Non-empty grade list whose first entry always matches
#[derive(Debug, Clone)]
pub struct GradeTable {
    grades: Vec<Grade>,
}

impl GradeTable {
    pub fn new(grades: Vec<Grade>) -> Result<Self, ConfigError> {
        let Some(first) = grades.first() else {
            return Err(ConfigError::EmptyGradeTable);
        };
        if let Some(bad) = grades
            .iter()
            .find(|g| !(0.0..=1.0).contains(&g.threshold))
        {
            return Err(ConfigError::ThresholdOutOfRange {
                name: bad.name.clone(),
                threshold: bad.threshold,
            });
        }
        if first.threshold > 0.0 {
            return Err(ConfigError::MissingFallbackGrade {
                name: first.name.clone(),
                threshold: first.threshold,
            });
        }
        Ok(Self { grades })
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    /// Highest-indexed grade whose requirement is met, else the first
    pub fn grade(&self, correct: usize, total: usize) -> &Grade {
        self.grades
            .iter()
            .rev()
            .find(|g| g.requirement_satisfied(correct, total))
            .unwrap_or(&self.grades[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use proptest::prelude::*;

    fn table() -> GradeTable {
        GradeTable::new(vec![
            Grade::new("low", Vec4::X, 0.0),
            Grade::new("mid", Vec4::Y, 0.5),
            Grade::new("high", Vec4::Z, 0.8),
        ])
        .unwrap()
    }

    #[test]
    fn test_grade_lookup() {
        let t = table();
        assert_eq!(t.grade(8, 10).name, "high");
        assert_eq!(t.grade(5, 10).name, "mid");
        assert_eq!(t.grade(0, 10).name, "low");
        assert_eq!(t.grade(4, 10).name, "low");
        assert_eq!(t.grade(10, 10).name, "high");
    }

    #[test]
    fn test_required_rounds_up() {
        let mid = Grade::new("mid", Vec4::ONE, 0.5);
        assert_eq!(mid.required(10), 5);
        assert_eq!(mid.required(3), 2);
        assert_eq!(mid.required(0), 0);
        let seventy = Grade::new("b", Vec4::ONE, 0.7);
        assert_eq!(seventy.required(10), 7);
        let tenth = Grade::new("c", Vec4::ONE, 0.1);
        assert_eq!(tenth.required(10), 1);
    }

    #[test]
    fn test_threshold_just_above_fraction_needs_next_answer() {
        let t = GradeTable::new(vec![
            Grade::new("low", Vec4::X, 0.0),
            Grade::new("third", Vec4::Y, 0.33334),
        ])
        .unwrap();
        assert_eq!(t.grades()[1].required(3), 2);
        assert_eq!(t.grade(1, 3).name, "low");
        assert_eq!(t.grade(2, 3).name, "third");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            GradeTable::new(vec![]),
            Err(ConfigError::EmptyGradeTable)
        ));
    }

    #[test]
    fn test_missing_fallback_rejected() {
        let err = GradeTable::new(vec![
            Grade::new("mid", Vec4::ONE, 0.5),
            Grade::new("high", Vec4::ONE, 0.8),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFallbackGrade { .. }));
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let err = GradeTable::new(vec![
            Grade::new("low", Vec4::ONE, 0.0),
            Grade::new("silly", Vec4::ONE, 1.5),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOutOfRange { .. }));
    }

    proptest! {
        #[test]
        fn prop_more_correct_never_lowers_grade(total in 1usize..50, correct in 0usize..50) {
            let t = table();
            let correct = correct.min(total);
            let rank = |c: usize| {
                let name = &t.grade(c, total).name;
                t.grades().iter().position(|g| &g.name == name).unwrap()
            };
            if correct < total {
                prop_assert!(rank(correct) <= rank(correct + 1));
            }
        }

        #[test]
        fn prop_full_marks_get_top_grade(total in 1usize..50) {
            let t = table();
            prop_assert_eq!(&t.grade(total, total).name, "high");
        }
    }
}
