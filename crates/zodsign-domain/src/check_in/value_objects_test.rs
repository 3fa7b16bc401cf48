#[cfg(test)]
mod tests {
    use super::super::value_objects::*;

    #[test]
    fn test_success_carries_full_reward() {
        let outcome = CheckInOutcome::success("酱油", 4, "瓶");

        let reward = outcome.reward().unwrap();
        assert_eq!(reward.item, "酱油");
        assert_eq!(reward.count, 4);
        assert_eq!(reward.unit, "瓶");
        assert!(outcome.message().is_none());
    }

    #[test]
    fn test_reward_display() {
        let outcome = CheckInOutcome::success("soy-sauce", 4, "bottles");
        assert_eq!(outcome.reward().unwrap().to_string(), "soy-sauce 4 bottles");
    }

    #[test]
    fn test_duplicate_counts_as_checked_in() {
        let outcome = CheckInOutcome::Duplicate {
            message: "already checked in".to_string(),
        };
        assert!(outcome.is_checked_in());
        assert!(outcome.reward().is_none());
        assert_eq!(outcome.message(), Some("already checked in"));
    }

    #[test]
    fn test_failed_and_unknown_are_not_checked_in() {
        let failed = CheckInOutcome::Failed {
            message: "bad token".to_string(),
        };
        let unknown = CheckInOutcome::Unknown {
            message: "no recognizable check-in signal".to_string(),
        };

        assert!(!failed.is_checked_in());
        assert!(!unknown.is_checked_in());
    }

    #[test]
    fn test_outcome_clone_eq() {
        let outcome = CheckInOutcome::success("酱油", 1, "瓶");
        assert_eq!(outcome.clone(), outcome);
    }
}
