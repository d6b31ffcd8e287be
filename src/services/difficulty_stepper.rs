use crate::models::domain::Difficulty;

/// Moves the working difficulty one level after each graded answer.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyStepper {
    promotion_streak: usize,
}

impl DifficultyStepper {
    pub fn new(promotion_streak: usize) -> Self {
        Self {
            promotion_streak: promotion_streak.max(1),
        }
    }

    /// `outcomes` holds correctness flags newest first, current answer included.
    pub fn next(&self, current: Difficulty, outcomes: &[bool]) -> Difficulty {
        match outcomes.first() {
            Some(false) | None => current.easier(),
            Some(true) => {
                let streak = outcomes.iter().take_while(|correct| **correct).count();
                if streak >= self.promotion_streak {
                    current.harder()
                } else {
                    current
                }
            }
        }
    }
}

impl Default for DifficultyStepper {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_answer_promotes_with_default_streak() {
        let stepper = DifficultyStepper::default();
        assert_eq!(stepper.next(Difficulty::BEGINNER, &[true]), Difficulty::INTERMEDIATE);
        assert_eq!(stepper.next(Difficulty::ADVANCED, &[true]), Difficulty::ADVANCED);
    }

    #[test]
    fn incorrect_answer_demotes() {
        let stepper = DifficultyStepper::new(3);
        assert_eq!(stepper.next(Difficulty::ADVANCED, &[false, true, true]), Difficulty::INTERMEDIATE);
        assert_eq!(stepper.next(Difficulty::BEGINNER, &[false]), Difficulty::BEGINNER);
    }

    #[test]
    fn longer_streak_holds_until_reached() {
        let stepper = DifficultyStepper::new(3);
        assert_eq!(stepper.next(Difficulty::BEGINNER, &[true, true]), Difficulty::BEGINNER);
        assert_eq!(stepper.next(Difficulty::BEGINNER, &[true, true, false]), Difficulty::BEGINNER);
        assert_eq!(stepper.next(Difficulty::BEGINNER, &[true, true, true]), Difficulty::INTERMEDIATE);
    }

    #[test]
    fn zero_streak_is_treated_as_one() {
        let stepper = DifficultyStepper::new(0);
        assert_eq!(stepper.next(Difficulty::INTERMEDIATE, &[true]), Difficulty::ADVANCED);
    }

    #[test]
    fn difficulty_never_leaves_range() {
        let stepper = DifficultyStepper::new(2);
        let histories: [&[bool]; 5] = [&[], &[true], &[false], &[true, true], &[true, false]];
        for level in Difficulty::ALL {
            for history in histories {
                let next = stepper.next(level, history);
                assert!((1..=3).contains(&next.level()));
                assert!(next.distance(level) <= 1);
            }
        }
    }
}
