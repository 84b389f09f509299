//! Advice rule engine.
//!
//! A fixed, ordered catalog of rules, each gated on an optional criterion
//! threshold and an optional audience. Evaluation keeps catalog order and
//! then stable-sorts by priority tier, so equal tiers stay in declaration
//! order and output is reproducible byte for byte.

use crate::types::{Criterion, CriterionScores, OverallResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("gender is required before generating advice")]
    MissingGender,
    #[error("age is required before generating advice")]
    MissingAge,
    #[error("unknown gender {0:?} (expected female or male)")]
    UnknownGender(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" | "f" => Ok(Gender::Female),
            "male" | "m" => Ok(Gender::Male),
            _ => Err(ProfileError::UnknownGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => f.write_str("female"),
            Gender::Male => f.write_str("male"),
        }
    }
}

/// Demographic input required for advice generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub gender: Gender,
    /// Accepted for interface stability; no rule currently depends on it.
    pub age: u32,
}

impl Profile {
    pub fn new(gender: Gender, age: u32) -> Self {
        Self { gender, age }
    }

    /// Build a profile from optional form state; both fields are mandatory.
    pub fn from_parts(gender: Option<Gender>, age: Option<u32>) -> Result<Self, ProfileError> {
        let gender = gender.ok_or(ProfileError::MissingGender)?;
        let age = age.ok_or(ProfileError::MissingAge)?;
        Ok(Self { gender, age })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// When a rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    /// Fires when the criterion score is strictly below `threshold`.
    Below { criterion: Criterion, threshold: u8 },
}

impl Condition {
    pub fn holds(&self, scores: &CriterionScores) -> bool {
        match *self {
            Condition::Always => true,
            Condition::Below { criterion, threshold } => scores.get(criterion) < threshold,
        }
    }
}

/// Static text and tier of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceTemplate {
    /// 1 = highest impact … 5 = bonus.
    pub priority: u8,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub gain: &'static str,
    pub timeline: &'static str,
    pub difficulty: Difficulty,
    /// Opaque product reference forwarded to the caller untouched.
    pub product_ref: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdviceRule {
    pub condition: Condition,
    /// Restricts the rule to one gender.
    pub audience: Option<Gender>,
    pub template: AdviceTemplate,
}

impl AdviceRule {
    fn applies(&self, scores: &CriterionScores, gender: Gender) -> bool {
        self.audience.map_or(true, |g| g == gender) && self.condition.holds(scores)
    }
}

/// One recommendation in a per-analysis advice list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceItem {
    pub priority: u8,
    pub category: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub gain: &'static str,
    pub timeline: &'static str,
    pub difficulty: Difficulty,
    pub gender_restricted: bool,
    pub audience: Option<Gender>,
    pub product_ref: Option<&'static str>,
}

impl From<&AdviceRule> for AdviceItem {
    fn from(rule: &AdviceRule) -> Self {
        let t = &rule.template;
        AdviceItem {
            priority: t.priority,
            category: t.category,
            title: t.title,
            description: t.description,
            gain: t.gain,
            timeline: t.timeline,
            difficulty: t.difficulty,
            gender_restricted: rule.audience.is_some(),
            audience: rule.audience,
            product_ref: t.product_ref,
        }
    }
}

/// Drop items restricted to a gender other than `gender`.
pub fn filter_for_gender(items: Vec<AdviceItem>, gender: Gender) -> Vec<AdviceItem> {
    items
        .into_iter()
        .filter(|item| !item.gender_restricted || item.audience == Some(gender))
        .collect()
}

/// Evaluates a rule catalog against analysis results.
#[derive(Debug, Clone, Copy)]
pub struct AdviceEngine {
    rules: &'static [AdviceRule],
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new(&CATALOG)
    }
}

impl AdviceEngine {
    pub fn new(rules: &'static [AdviceRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [AdviceRule] {
        self.rules
    }

    /// Fired rules for this result and profile, sorted by priority tier.
    pub fn generate(&self, result: &OverallResult, profile: &Profile) -> Vec<AdviceItem> {
        let mut items: Vec<AdviceItem> = self
            .rules
            .iter()
            .filter(|rule| rule.applies(&result.scores, profile.gender))
            .map(AdviceItem::from)
            .collect();
        // `sort_by_key` is stable: equal tiers keep catalog order.
        items.sort_by_key(|item| item.priority);

        tracing::debug!(
            fired = items.len(),
            catalog = self.rules.len(),
            gender = %profile.gender,
            "generated advice"
        );
        tracing::trace!(age = profile.age, "age does not gate any rule");
        items
    }
}

const fn below(criterion: Criterion, threshold: u8) -> Condition {
    Condition::Below { criterion, threshold }
}

/// Built-in recommendation catalog, in declaration order.
pub static CATALOG: [AdviceRule; 17] = [
    AdviceRule {
        condition: below(Criterion::Jawline, 70),
        audience: None,
        template: AdviceTemplate {
            priority: 1,
            category: "body-composition",
            title: "Lower body fat",
            description: "Reaching a lean body-fat range reveals jaw and cheekbone definition more than any other single change.",
            gain: "+0.5 to +1.5",
            timeline: "8–16 weeks",
            difficulty: Difficulty::Medium,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::Symmetry, 75),
        audience: None,
        template: AdviceTemplate {
            priority: 1,
            category: "posture",
            title: "Fix forward head posture",
            description: "Chin tucks and upper-back work reduce the head tilt that skews facial symmetry in photos.",
            gain: "+0.2 to +0.5",
            timeline: "4–8 weeks",
            difficulty: Difficulty::Medium,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::Jawline, 80),
        audience: Some(Gender::Male),
        template: AdviceTemplate {
            priority: 1,
            category: "grooming",
            title: "Shape facial hair along the jaw",
            description: "A short beard with a squared neckline adds width and definition to a soft lower third.",
            gain: "+0.3 to +0.8",
            timeline: "2–6 weeks",
            difficulty: Difficulty::Easy,
            product_ref: Some("beard-trimmer"),
        },
    },
    AdviceRule {
        condition: below(Criterion::Jawline, 80),
        audience: Some(Gender::Female),
        template: AdviceTemplate {
            priority: 1,
            category: "makeup",
            title: "Contour the jaw and cheek hollows",
            description: "Matte contour under the cheekbone and along the jaw sharpens the lower-third outline.",
            gain: "+0.3 to +0.6",
            timeline: "Immediate",
            difficulty: Difficulty::Easy,
            product_ref: Some("contour-kit"),
        },
    },
    AdviceRule {
        condition: Condition::Always,
        audience: None,
        template: AdviceTemplate {
            priority: 2,
            category: "skincare",
            title: "Daily skincare routine",
            description: "Cleanser, moisturiser and SPF every day; add a night-time retinoid once the skin tolerates it.",
            gain: "+0.2 to +0.5",
            timeline: "4–12 weeks",
            difficulty: Difficulty::Easy,
            product_ref: Some("skincare-starter"),
        },
    },
    AdviceRule {
        condition: below(Criterion::Jawline, 70),
        audience: None,
        template: AdviceTemplate {
            priority: 2,
            category: "hydration",
            title: "Cut water retention",
            description: "Less sodium and alcohol with steady water intake reduces the facial puffiness that hides the jawline.",
            gain: "+0.1 to +0.3",
            timeline: "1–2 weeks",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::Eyes, 68),
        audience: None,
        template: AdviceTemplate {
            priority: 2,
            category: "under-eye",
            title: "Treat the under-eye area",
            description: "Regular sleep, a caffeine eye serum and cold compresses reduce hollows and dark circles.",
            gain: "+0.1 to +0.3",
            timeline: "2–6 weeks",
            difficulty: Difficulty::Easy,
            product_ref: Some("eye-serum"),
        },
    },
    AdviceRule {
        condition: below(Criterion::Eyes, 75),
        audience: Some(Gender::Female),
        template: AdviceTemplate {
            priority: 2,
            category: "makeup",
            title: "Lift the outer eye corner",
            description: "Winged liner and lash emphasis on the outer third elongate the eye and add apparent tilt.",
            gain: "+0.2 to +0.5",
            timeline: "Immediate",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::CanthalTilt, 50),
        audience: None,
        template: AdviceTemplate {
            priority: 3,
            category: "brows",
            title: "Groom brows to lift the outer third",
            description: "Clearing stray hairs under the brow tail raises the brow line and offsets a downturned eye corner.",
            gain: "+0.1 to +0.3",
            timeline: "1–3 weeks",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: Condition::Always,
        audience: None,
        template: AdviceTemplate {
            priority: 3,
            category: "hairstyle",
            title: "Get a haircut matched to your face shape",
            description: "Volume on top lengthens a round face; volume at the sides widens a long one.",
            gain: "+0.2 to +0.6",
            timeline: "1 day",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::Lips, 65),
        audience: None,
        template: AdviceTemplate {
            priority: 3,
            category: "lip-care",
            title: "Hydrate and define the lips",
            description: "Nightly balm and gentle exfoliation keep the lip border crisp and the upper/lower balance visible.",
            gain: "+0.1 to +0.2",
            timeline: "1–4 weeks",
            difficulty: Difficulty::Easy,
            product_ref: Some("lip-care"),
        },
    },
    AdviceRule {
        condition: below(Criterion::Jawline, 75),
        audience: Some(Gender::Male),
        template: AdviceTemplate {
            priority: 3,
            category: "training",
            title: "Masseter training",
            description: "Short daily sessions with firm chewing gum can thicken the masseter over months; stop if the jaw joint hurts.",
            gain: "+0.1 to +0.4",
            timeline: "3–6 months",
            difficulty: Difficulty::Hard,
            product_ref: Some("jaw-gum"),
        },
    },
    AdviceRule {
        condition: below(Criterion::DetectionQuality, 70),
        audience: None,
        template: AdviceTemplate {
            priority: 4,
            category: "photo",
            title: "Retake the photo in even light",
            description: "Low detector confidence drags the score down; shoot front-on in diffuse daylight with a neutral expression.",
            gain: "+0.1 to +0.4",
            timeline: "Immediate",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: below(Criterion::FacialThirds, 70),
        audience: None,
        template: AdviceTemplate {
            priority: 4,
            category: "hairstyle",
            title: "Balance the facial thirds with your hairline",
            description: "A fringe shortens a tall upper third; swept-back volume lengthens a short one.",
            gain: "+0.1 to +0.3",
            timeline: "1 day",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: Condition::Always,
        audience: Some(Gender::Female),
        template: AdviceTemplate {
            priority: 4,
            category: "makeup",
            title: "Even out skin tone",
            description: "A light skin tint and concealer under the eyes give the even texture that reads as health.",
            gain: "+0.1 to +0.3",
            timeline: "Immediate",
            difficulty: Difficulty::Easy,
            product_ref: Some("skin-tint"),
        },
    },
    AdviceRule {
        condition: Condition::Always,
        audience: None,
        template: AdviceTemplate {
            priority: 5,
            category: "sleep",
            title: "Sleep 7–9 hours",
            description: "Consistent sleep reduces puffiness and dark circles and supports every other change on this list.",
            gain: "+0.1 to +0.2",
            timeline: "1–2 weeks",
            difficulty: Difficulty::Easy,
            product_ref: None,
        },
    },
    AdviceRule {
        condition: Condition::Always,
        audience: None,
        template: AdviceTemplate {
            priority: 5,
            category: "fitness",
            title: "Strength training",
            description: "Compound lifts three times a week improve posture and neck thickness and support fat loss.",
            gain: "+0.1 to +0.4",
            timeline: "3–6 months",
            difficulty: Difficulty::Hard,
            product_ref: None,
        },
    },
];
