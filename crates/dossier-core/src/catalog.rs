//! The requirement catalog — the fixed mapping from an applicant's purpose
//! and category to the ordered list of documents they must provide.
//!
//! The catalog is immutable and built once at process start; callers hold it
//! behind an `Arc` and pass it into the validator and checklist builder.
//! Lookups never fail: an unrecognised pair degrades to an empty list, which
//! downstream code must treat as a valid, renderable state.

use serde::{Deserialize, Serialize};

// ─── Vocabulary ──────────────────────────────────────────────────────────────

/// Top-level applicant intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
  Study,
  Work,
}

impl Purpose {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Study => "study",
      Self::Work => "work",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "study" => Some(Self::Study),
      "work" => Some(Self::Work),
      _ => None,
    }
  }
}

impl std::fmt::Display for Purpose {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Sub-classification under a purpose (registration stamp class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Masters,
  Undergraduate,
  EnglishLanguage,
  EmploymentPermit,
  Graduate1g,
}

impl Category {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Masters => "masters",
      Self::Undergraduate => "undergraduate",
      Self::EnglishLanguage => "english_language",
      Self::EmploymentPermit => "employment_permit",
      Self::Graduate1g => "graduate_1g",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "masters" => Some(Self::Masters),
      "undergraduate" => Some(Self::Undergraduate),
      "english_language" => Some(Self::EnglishLanguage),
      "employment_permit" => Some(Self::EmploymentPermit),
      "graduate_1g" => Some(Self::Graduate1g),
      _ => None,
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A specific required document type. Fixed vocabulary, no dynamic extension.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
  Passport,
  CollegeLetter,
  FeesProof,
  ScholarshipProof,
  CourseStartProof,
  Insurance,
  EmploymentLetter,
  Payslip,
}

impl DocumentKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Passport => "passport",
      Self::CollegeLetter => "college_letter",
      Self::FeesProof => "fees_proof",
      Self::ScholarshipProof => "scholarship_proof",
      Self::CourseStartProof => "course_start_proof",
      Self::Insurance => "insurance",
      Self::EmploymentLetter => "employment_letter",
      Self::Payslip => "payslip",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "passport" => Some(Self::Passport),
      "college_letter" => Some(Self::CollegeLetter),
      "fees_proof" => Some(Self::FeesProof),
      "scholarship_proof" => Some(Self::ScholarshipProof),
      "course_start_proof" => Some(Self::CourseStartProof),
      "insurance" => Some(Self::Insurance),
      "employment_letter" => Some(Self::EmploymentLetter),
      "payslip" => Some(Self::Payslip),
      _ => None,
    }
  }
}

impl std::fmt::Display for DocumentKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

use DocumentKind::*;

/// One (purpose, category) rule and its ordered document list.
struct Rule {
  purpose:  Purpose,
  category: Category,
  required: &'static [DocumentKind],
}

/// Document kinds that the accept gate never hard-requires, regardless of
/// category. Applies to the validator only; the checklist's readiness
/// definition still counts them.
const OPTIONAL: &[DocumentKind] = &[ScholarshipProof];

const RULES: &[Rule] = &[
  Rule {
    purpose:  Purpose::Study,
    category: Category::Masters,
    required: &[
      Passport,
      CollegeLetter,
      FeesProof,
      ScholarshipProof,
      CourseStartProof,
      Insurance,
    ],
  },
  Rule {
    purpose:  Purpose::Study,
    category: Category::Undergraduate,
    required: &[Passport, CollegeLetter, FeesProof, ScholarshipProof, Insurance],
  },
  Rule {
    purpose:  Purpose::Study,
    category: Category::EnglishLanguage,
    required: &[Passport, CollegeLetter, FeesProof, Insurance],
  },
  Rule {
    purpose:  Purpose::Work,
    category: Category::EmploymentPermit,
    required: &[Passport, EmploymentLetter, Payslip, Insurance],
  },
  Rule {
    purpose:  Purpose::Work,
    category: Category::Graduate1g,
    required: &[Passport, CollegeLetter, Insurance],
  },
];

/// Immutable two-level mapping from (purpose, category) to the ordered list
/// of required document kinds.
pub struct RequirementCatalog {
  rules:    &'static [Rule],
  optional: &'static [DocumentKind],
}

impl RequirementCatalog {
  /// The standard registration catalog.
  pub fn standard() -> Self {
    Self {
      rules:    RULES,
      optional: OPTIONAL,
    }
  }

  /// The ordered required-document list for a pair. Unrecognised pairs
  /// yield the empty slice, never an error.
  pub fn lookup(&self, purpose: Purpose, category: Category) -> &[DocumentKind] {
    self
      .rules
      .iter()
      .find(|r| r.purpose == purpose && r.category == category)
      .map(|r| r.required)
      .unwrap_or(&[])
  }

  /// Whether the pair is a known catalog rule.
  pub fn contains(&self, purpose: Purpose, category: Category) -> bool {
    !self.lookup(purpose, category).is_empty()
  }

  /// Whether a kind is globally optional at the accept gate.
  pub fn is_optional(&self, kind: DocumentKind) -> bool {
    self.optional.contains(&kind)
  }
}
