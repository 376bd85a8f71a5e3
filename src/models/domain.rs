use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

/// Self-declared playing level, ordered from least to most experienced
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Pro,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Pro => "Pro",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Beginner" => Ok(SkillLevel::Beginner),
            "Intermediate" => Ok(SkillLevel::Intermediate),
            "Pro" => Ok(SkillLevel::Pro),
            other => Err(format!("undefined skill level: {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Weekly availability: day -> time-slot labels ("Morning (6-10 AM)", ...)
pub type Availability = BTreeMap<DayOfWeek, BTreeSet<String>>;

/// A registered player's sport interests, skill, location and availability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(custom(function = "not_blank"))]
    pub id: String,
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    /// Postal code or city name, compared for exact equality
    #[validate(custom(function = "not_blank"))]
    #[serde(rename = "locationCode", alias = "pin_code")]
    pub location_code: String,
    #[validate(custom(function = "non_empty_sports"))]
    pub sports: BTreeSet<String>,
    #[serde(rename = "skillLevel", alias = "skill_level")]
    pub skill_level: SkillLevel,
    #[serde(rename = "isAvailable", alias = "is_available", default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub availability: Availability,
    #[serde(rename = "createdAt", alias = "created_at", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(rename = "updatedAt", alias = "updated_at", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Profile {
    pub fn new<I, S>(
        id: impl Into<String>,
        name: impl Into<String>,
        location_code: impl Into<String>,
        sports: I,
        skill_level: SkillLevel,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            location_code: location_code.into(),
            sports: sports.into_iter().map(Into::into).collect(),
            skill_level,
            is_available: true,
            availability: Availability::new(),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_available(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }

    pub fn with_availability(mut self, availability: Availability) -> Self {
        self.availability = availability;
        self
    }

    /// Sports declared by both profiles, in lexicographic order
    pub fn shared_sports<'a>(&'a self, other: &Profile) -> BTreeSet<&'a str> {
        self.sports
            .iter()
            .filter(|s| other.sports.contains(*s))
            .map(String::as_str)
            .collect()
    }

    pub fn same_location(&self, other: &Profile) -> bool {
        self.location_code == other.location_code
    }
}

fn default_true() -> bool { true }

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn non_empty_sports(sports: &BTreeSet<String>) -> Result<(), ValidationError> {
    if sports.is_empty() {
        return Err(ValidationError::new("no_sports"));
    }
    if sports.iter().any(|s| s.trim().is_empty()) {
        return Err(ValidationError::new("blank_sport"));
    }
    Ok(())
}

/// A candidate paired with its relevance to the requester.
///
/// Borrows the candidate; built fresh per request and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub profile: &'a Profile,
    pub shared_sports: BTreeSet<&'a str>,
    pub score: u8,
}

impl MatchResult<'_> {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.score)
    }

    /// Sports to propose when reaching out: all shared sports joined with
    /// ", ", else the candidate's first sport.
    pub fn suggested_sport(&self) -> Option<String> {
        if !self.shared_sports.is_empty() {
            let joined: Vec<&str> = self.shared_sports.iter().copied().collect();
            return Some(joined.join(", "));
        }
        self.profile.sports.iter().next().cloned()
    }

    pub fn to_scored(&self) -> ScoredMatch {
        ScoredMatch {
            user_id: self.profile.id.clone(),
            name: self.profile.name.clone(),
            location_code: self.profile.location_code.clone(),
            skill_level: self.profile.skill_level,
            sports: self.profile.sports.iter().cloned().collect(),
            shared_sports: self.shared_sports.iter().map(|s| s.to_string()).collect(),
            match_score: self.score,
            tier: self.tier(),
            suggested_sport: self.suggested_sport(),
        }
    }
}

/// Display band for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    Strong,
    Good,
    Fair,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => MatchTier::Strong,
            50..=69 => MatchTier::Good,
            _ => MatchTier::Fair,
        }
    }
}

/// Owned match returned across the HTTP boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(rename = "locationCode")]
    pub location_code: String,
    #[serde(rename = "skillLevel")]
    pub skill_level: SkillLevel,
    pub sports: Vec<String>,
    #[serde(rename = "sharedSports")]
    pub shared_sports: Vec<String>,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    pub tier: MatchTier,
    #[serde(rename = "suggestedSport")]
    pub suggested_sport: Option<String>,
}

/// Points awarded per similarity signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub per_shared_sport: u32,
    pub same_location: u32,
    pub same_skill: u32,
    pub max_score: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            per_shared_sport: 30,
            same_location: 25,
            same_skill: 15,
            max_score: 100,
        }
    }
}
