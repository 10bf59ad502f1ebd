// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan tiers and per-feature usage limits.
//!
//! The quota table is static configuration, not persisted. A limit of `-1`
//! means unlimited. All helpers are pure; unrecognized plan strings fall
//! back to the free tier.

/// Sentinel limit value meaning "no limit".
pub const UNLIMITED: i64 = -1;

/// Subscription plan tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    Free,
    Starter,
    Pro,
    Premium,
}

impl Plan {
    /// Parse a stored plan string. Total: unknown values map to `Free`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "starter" => Self::Starter,
            "pro" => Self::Pro,
            "premium" => Self::Premium,
            _ => Self::Free,
        }
    }
}

/// Quota-limited features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    CoverLetters,
    Resumes,
    StudyPlans,
    Interviews,
}

/// Per-feature limit for a plan. `-1` means unlimited.
pub const fn feature_limit(plan: Plan, feature: Feature) -> i64 {
    match plan {
        Plan::Free => match feature {
            Feature::CoverLetters => 3,
            Feature::Resumes => 2,
            Feature::StudyPlans => 2,
            Feature::Interviews => 3,
        },
        Plan::Starter => match feature {
            Feature::CoverLetters => 15,
            Feature::Resumes => 10,
            Feature::StudyPlans => 10,
            Feature::Interviews => 20,
        },
        Plan::Pro | Plan::Premium => UNLIMITED,
    }
}

/// Whether a limit value denotes "no limit".
pub const fn is_unlimited(limit: i64) -> bool {
    limit == UNLIMITED
}

/// Whether `used` consumes the whole quota. Never true for unlimited plans.
pub const fn has_reached_limit(used: u32, limit: i64) -> bool {
    if is_unlimited(limit) {
        false
    } else {
        used as i64 >= limit
    }
}

/// Remaining quota, clamped at zero. `-1` for unlimited plans.
pub const fn remaining_usage(used: u32, limit: i64) -> i64 {
    if is_unlimited(limit) {
        UNLIMITED
    } else {
        let remaining = limit - used as i64;
        if remaining < 0 {
            0
        } else {
            remaining
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse_normalizes_case_and_whitespace() {
        assert_eq!(Plan::parse("Pro"), Plan::Pro);
        assert_eq!(Plan::parse("  STARTER "), Plan::Starter);
        assert_eq!(Plan::parse("premium"), Plan::Premium);
        assert_eq!(Plan::parse("free"), Plan::Free);
    }

    #[test]
    fn test_plan_parse_falls_back_to_free() {
        assert_eq!(Plan::parse("enterprise"), Plan::Free);
        assert_eq!(Plan::parse(""), Plan::Free);
        assert_eq!(
            feature_limit(Plan::parse("no-such-plan"), Feature::Resumes),
            feature_limit(Plan::Free, Feature::Resumes)
        );
    }

    #[test]
    fn test_feature_limit_table() {
        assert_eq!(feature_limit(Plan::Free, Feature::CoverLetters), 3);
        assert_eq!(feature_limit(Plan::Free, Feature::Resumes), 2);
        assert_eq!(feature_limit(Plan::Free, Feature::StudyPlans), 2);
        assert_eq!(feature_limit(Plan::Free, Feature::Interviews), 3);

        assert_eq!(feature_limit(Plan::Starter, Feature::CoverLetters), 15);
        assert_eq!(feature_limit(Plan::Starter, Feature::Resumes), 10);
        assert_eq!(feature_limit(Plan::Starter, Feature::StudyPlans), 10);
        assert_eq!(feature_limit(Plan::Starter, Feature::Interviews), 20);

        assert_eq!(feature_limit(Plan::Pro, Feature::Interviews), UNLIMITED);
        assert_eq!(feature_limit(Plan::Premium, Feature::Resumes), UNLIMITED);
    }

    #[test]
    fn test_is_unlimited() {
        assert!(is_unlimited(-1));
        assert!(!is_unlimited(0));
        assert!(!is_unlimited(3));
        assert!(!is_unlimited(i64::MAX));
    }

    #[test]
    fn test_has_reached_limit() {
        assert!(!has_reached_limit(0, -1));
        assert!(!has_reached_limit(u32::MAX, -1));
        assert!(has_reached_limit(5, 5));
        assert!(has_reached_limit(6, 5));
        assert!(!has_reached_limit(4, 5));
        assert!(has_reached_limit(0, 0));
    }

    #[test]
    fn test_remaining_usage_clamps_at_zero() {
        assert_eq!(remaining_usage(3, 5), 2);
        assert_eq!(remaining_usage(5, 5), 0);
        assert_eq!(remaining_usage(10, 5), 0);
        assert_eq!(remaining_usage(0, -1), UNLIMITED);
        assert_eq!(remaining_usage(1000, -1), UNLIMITED);
    }
}
