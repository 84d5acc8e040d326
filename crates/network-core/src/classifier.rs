//! Rule-based job title classification.
//!
//! Both classifiers lowercase the title and walk a static, ordered rule table;
//! the first class owning a keyword that occurs as a substring of the title
//! wins. Titles routinely match keywords of several classes, so the order of
//! each table is what makes the classes mutually exclusive.

use crate::models::{PositionBucket, SeniorityLevel};

/// Fine seniority rules in priority order.
pub static SENIORITY_RULES: &[(SeniorityLevel, &[&str])] = &[
    (SeniorityLevel::EntryLevel, &["intern", "trainee", "apprentice"]),
    (SeniorityLevel::Junior, &["junior", "jr", "associate", "analyst"]),
    (
        SeniorityLevel::MidLevel,
        &["specialist", "engineer", "developer", "consultant"],
    ),
    (
        SeniorityLevel::SeniorLead,
        &["senior", "sr", "lead", "staff", "principal"],
    ),
    (SeniorityLevel::Manager, &["manager", "mgr"]),
    (SeniorityLevel::SeniorManager, &["senior manager", "sr. manager"]),
    (SeniorityLevel::Director, &["director", "dir."]),
    (
        SeniorityLevel::SeniorDirector,
        &["senior director", "sr. director"],
    ),
    (
        SeniorityLevel::VicePresident,
        &["vp", "vice president", "svp", "evp", "executive vice president"],
    ),
    (
        SeniorityLevel::Executive,
        &[
            "chief",
            "ceo",
            "cto",
            "cfo",
            "coo",
            "cio",
            "president",
            "founder",
            "partner",
        ],
    ),
];

/// Coarse bucket rules in priority order. [`PositionBucket::Other`] has no
/// keywords and is the fallback.
pub static BUCKET_RULES: &[(PositionBucket, &[&str])] = &[
    (
        PositionBucket::Executive,
        &["chief", "ceo", "coo", "cfo", "president"],
    ),
    (PositionBucket::Vp, &["vp", "vice president"]),
    (PositionBucket::Director, &["director"]),
    (PositionBucket::Manager, &["manager"]),
    (PositionBucket::Other, &[]),
];

/// Classify a job title into a [`SeniorityLevel`].
///
/// A missing title is [`SeniorityLevel::Other`]. A "manager" hit on the
/// Manager class is ignored when the title contains "product manager"; the
/// scan then continues, so a product manager lands in a later class or in
/// the catch-all.
///
/// ```
/// use network_core::classifier::classify_seniority;
/// use network_core::models::SeniorityLevel;
///
/// assert_eq!(classify_seniority("Software Intern"), SeniorityLevel::EntryLevel);
/// assert_eq!(classify_seniority(None), SeniorityLevel::Other);
/// ```
pub fn classify_seniority<'a>(title: impl Into<Option<&'a str>>) -> SeniorityLevel {
    let Some(title) = title.into() else {
        return SeniorityLevel::Other;
    };
    let t = title.to_lowercase();

    for (level, keywords) in SENIORITY_RULES {
        for kw in keywords.iter() {
            if !t.contains(kw) {
                continue;
            }
            if *level == SeniorityLevel::Manager && *kw == "manager" && t.contains("product manager")
            {
                continue;
            }
            return *level;
        }
    }
    SeniorityLevel::Other
}

/// Classify a job title into a coarse [`PositionBucket`].
///
/// ```
/// use network_core::classifier::bucket_position;
/// use network_core::models::PositionBucket;
///
/// assert_eq!(bucket_position("VP of Engineering"), PositionBucket::Vp);
/// assert_eq!(bucket_position(""), PositionBucket::Other);
/// ```
pub fn bucket_position<'a>(title: impl Into<Option<&'a str>>) -> PositionBucket {
    let Some(title) = title.into() else {
        return PositionBucket::Other;
    };
    let t = title.to_lowercase();

    BUCKET_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| t.contains(kw)))
        .map(|(bucket, _)| *bucket)
        .unwrap_or(PositionBucket::Other)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
