//! Premium plan catalog: pricing, feature matrices and FAQ copy.
//!
//! Pure display data for the plans screen. Accounts are always job
//! seekers, so the employer matrix is shown for comparison only.

/// Billing cycle toggle on the plans screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BillingCycle {
    /// Month-to-month billing
    #[default]
    Monthly,
    /// Annual billing at the discounted monthly rate
    Annual,
}

impl BillingCycle {
    /// Monthly price of the premium plan under this cycle, as displayed.
    #[must_use]
    pub const fn premium_price(self) -> &'static str {
        match self {
            Self::Monthly => "19.99",
            Self::Annual => "15.99",
        }
    }

    /// Toggle label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Annual => "Annual",
        }
    }

    /// The other cycle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Monthly => Self::Annual,
            Self::Annual => Self::Monthly,
        }
    }
}

/// Discount badge shown next to the annual toggle.
pub const ANNUAL_SAVINGS_LABEL: &str = "Save 20%";

/// Plan card copy.
pub const FREE_PLAN_NAME: &str = "Free Plan";
/// Free plan subtitle.
pub const FREE_PLAN_TAGLINE: &str = "Basic features to get started";
/// Premium plan title.
pub const PREMIUM_PLAN_NAME: &str = "Premium Plan";
/// Premium plan subtitle.
pub const PREMIUM_PLAN_TAGLINE: &str = "All features to boost your success";

/// Which feature matrix to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanAudience {
    /// Job-seeker accounts (the only kind that exists)
    JobSeeker,
    /// Employer-side comparison matrix
    Employer,
}

/// One row of a feature matrix. Premium includes every row; the flag says
/// whether the free tier does too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanFeature {
    /// Feature name as displayed
    pub name: &'static str,
    /// Included in the free tier
    pub included_free: bool,
}

const JOB_SEEKER_FEATURES: [PlanFeature; 8] = [
    PlanFeature {
        name: "Basic CV templates",
        included_free: true,
    },
    PlanFeature {
        name: "Job search with filters",
        included_free: true,
    },
    PlanFeature {
        name: "Apply to 10 jobs per month",
        included_free: true,
    },
    PlanFeature {
        name: "Premium CV templates",
        included_free: false,
    },
    PlanFeature {
        name: "Priority in search results",
        included_free: false,
    },
    PlanFeature {
        name: "Unlimited job applications",
        included_free: false,
    },
    PlanFeature {
        name: "Early access to job postings",
        included_free: false,
    },
    PlanFeature {
        name: "AI-powered job recommendations",
        included_free: false,
    },
];

const EMPLOYER_FEATURES: [PlanFeature; 8] = [
    PlanFeature {
        name: "Post up to 3 jobs",
        included_free: true,
    },
    PlanFeature {
        name: "Basic candidate search",
        included_free: true,
    },
    PlanFeature {
        name: "Company profile",
        included_free: true,
    },
    PlanFeature {
        name: "Unlimited job postings",
        included_free: false,
    },
    PlanFeature {
        name: "Featured job listings",
        included_free: false,
    },
    PlanFeature {
        name: "Advanced candidate matching",
        included_free: false,
    },
    PlanFeature {
        name: "Premium candidate pool access",
        included_free: false,
    },
    PlanFeature {
        name: "Candidate analytics",
        included_free: false,
    },
];

/// The feature matrix for an audience.
#[must_use]
pub fn features(audience: PlanAudience) -> &'static [PlanFeature] {
    match audience {
        PlanAudience::JobSeeker => &JOB_SEEKER_FEATURES,
        PlanAudience::Employer => &EMPLOYER_FEATURES,
    }
}

/// One FAQ entry on the plans screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    /// Question heading
    pub question: &'static str,
    /// Answer paragraph
    pub answer: &'static str,
}

/// FAQ copy, in display order.
pub const FAQ: [FaqEntry; 4] = [
    FaqEntry {
        question: "What happens when I upgrade to Premium?",
        answer: "Upon upgrading to Premium, you'll instantly unlock all premium \
                 features. Job seekers gain access to premium templates and \
                 unlimited applications, while employers can post unlimited jobs \
                 and access advanced candidate matching.",
    },
    FaqEntry {
        question: "Can I cancel my subscription anytime?",
        answer: "Yes, you can cancel your premium subscription at any time. Your \
                 premium benefits will continue until the end of your billing \
                 period.",
    },
    FaqEntry {
        question: "How do premium CV templates differ from free ones?",
        answer: "Premium CV templates offer advanced design options, enhanced \
                 customization, and professionally crafted layouts that help your \
                 application stand out to potential employers.",
    },
    FaqEntry {
        question: "What payment methods do you accept?",
        answer: "We accept all major credit cards, PayPal, and bank transfers for \
                 premium subscriptions.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_prices_per_cycle() {
        assert_eq!(BillingCycle::Monthly.premium_price(), "19.99");
        assert_eq!(BillingCycle::Annual.premium_price(), "15.99");
        assert_eq!(BillingCycle::default(), BillingCycle::Monthly);
    }

    #[test]
    fn test_cycle_toggles_both_ways() {
        assert_eq!(BillingCycle::Monthly.toggled(), BillingCycle::Annual);
        assert_eq!(BillingCycle::Annual.toggled(), BillingCycle::Monthly);
    }

    #[test]
    fn test_feature_matrices_have_eight_rows() {
        assert_eq!(features(PlanAudience::JobSeeker).len(), 8);
        assert_eq!(features(PlanAudience::Employer).len(), 8);
    }

    #[test]
    fn test_free_tier_includes_first_three_features() {
        for audience in [PlanAudience::JobSeeker, PlanAudience::Employer] {
            let rows = features(audience);
            assert!(rows[..3].iter().all(|f| f.included_free));
            assert!(rows[3..].iter().all(|f| !f.included_free));
        }
    }

    #[test]
    fn test_job_seeker_matrix_names() {
        let names: Vec<&str> = features(PlanAudience::JobSeeker)
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names[0], "Basic CV templates");
        assert_eq!(names[7], "AI-powered job recommendations");
    }

    #[test]
    fn test_faq_has_four_entries() {
        assert_eq!(FAQ.len(), 4);
        assert!(FAQ[0].question.starts_with("What happens when I upgrade"));
    }
}
