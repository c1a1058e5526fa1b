//! Signal and error reports produced by the heuristics.
//!
//! Both reports are merged field-by-field. Signal merges are a boolean OR, so a
//! field never drops back to `false` once set. Error merges keep the incoming
//! error when present and leave the slot untouched otherwise. Both merges are
//! commutative up to which of two competing errors survives in a slot, and in
//! an evaluation every slot is written by exactly one heuristic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::HeuristicError;

/// Identifies one heuristic and its slot in the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    KnownOwner,
    PrLabel,
    BotConfig,
    ContributingReference,
    ReadmeReference,
    CiAction,
}

impl HeuristicKind {
    /// Every heuristic, in report order.
    pub const ALL: [Self; 6] = [
        Self::KnownOwner,
        Self::PrLabel,
        Self::BotConfig,
        Self::ContributingReference,
        Self::ReadmeReference,
        Self::CiAction,
    ];

    /// Human-readable description used when listing failures.
    pub const fn label(self) -> &'static str {
        match self {
            Self::KnownOwner => "checking for a known CLA requirer",
            Self::PrLabel => "checking for CLA tag",
            Self::BotConfig => "checking for .clabot file",
            Self::ContributingReference => "checking for CLA references in CONTRIBUTING.md",
            Self::ReadmeReference => "checking for CLA references in README.md",
            Self::CiAction => "checking for cla-assistant Action",
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::KnownOwner => "known_owner",
            Self::PrLabel => "pr_label",
            Self::BotConfig => "bot_config",
            Self::ContributingReference => "contributing_reference",
            Self::ReadmeReference => "readme_reference",
            Self::CiAction => "ci_action",
        };
        f.write_str(name)
    }
}

/// Decides which signals count towards [`SignalReport::required_under`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredPolicy {
    /// Whether owner membership in the known list is enough on its own
    #[serde(default = "default_true")]
    pub known_owner_implies_required: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for RequiredPolicy {
    fn default() -> Self {
        Self {
            known_owner_implies_required: true,
        }
    }
}

/// Boolean evidence of a CLA requirement, one field per heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReport {
    /// The owner is on the known CLA-requiring list
    pub known_owner: bool,
    /// Recent pull requests carry a `cla: yes` / `cla: no` style label
    pub pr_label: bool,
    /// A `.clabot` file exists at the tree root
    pub bot_config: bool,
    /// CONTRIBUTING.md references a CLA
    pub contributing_reference: bool,
    /// README.md references a CLA
    pub readme_reference: bool,
    /// A workflow uses the cla-assistant action
    pub ci_action: bool,
}

impl SignalReport {
    /// A report with only `kind` set to `value`.
    pub fn single(kind: HeuristicKind, value: bool) -> Self {
        let mut report = Self::default();
        report.set(kind, value);
        report
    }

    pub const fn get(&self, kind: HeuristicKind) -> bool {
        match kind {
            HeuristicKind::KnownOwner => self.known_owner,
            HeuristicKind::PrLabel => self.pr_label,
            HeuristicKind::BotConfig => self.bot_config,
            HeuristicKind::ContributingReference => self.contributing_reference,
            HeuristicKind::ReadmeReference => self.readme_reference,
            HeuristicKind::CiAction => self.ci_action,
        }
    }

    pub fn set(&mut self, kind: HeuristicKind, value: bool) {
        let field = match kind {
            HeuristicKind::KnownOwner => &mut self.known_owner,
            HeuristicKind::PrLabel => &mut self.pr_label,
            HeuristicKind::BotConfig => &mut self.bot_config,
            HeuristicKind::ContributingReference => &mut self.contributing_reference,
            HeuristicKind::ReadmeReference => &mut self.readme_reference,
            HeuristicKind::CiAction => &mut self.ci_action,
        };
        *field = value;
    }

    /// OR every field of `other` into `self`.
    pub fn merge(&mut self, other: Self) {
        for kind in HeuristicKind::ALL {
            let merged = self.get(kind) || other.get(kind);
            self.set(kind, merged);
        }
    }

    /// True iff at least one heuristic found evidence.
    pub fn required(&self) -> bool {
        HeuristicKind::ALL.iter().any(|kind| self.get(*kind))
    }

    /// Like [`required`](Self::required), but lets the policy discount the
    /// known-owner signal.
    pub fn required_under(&self, policy: RequiredPolicy) -> bool {
        HeuristicKind::ALL
            .iter()
            .filter(|kind| {
                policy.known_owner_implies_required || **kind != HeuristicKind::KnownOwner
            })
            .any(|kind| self.get(*kind))
    }
}

/// The most recent failure recorded per heuristic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    pub known_owner: Option<HeuristicError>,
    pub pr_label: Option<HeuristicError>,
    pub bot_config: Option<HeuristicError>,
    pub contributing_reference: Option<HeuristicError>,
    pub readme_reference: Option<HeuristicError>,
    pub ci_action: Option<HeuristicError>,
}

impl ErrorReport {
    /// A report with only the slot for `kind` filled.
    pub fn single(kind: HeuristicKind, error: HeuristicError) -> Self {
        let mut report = Self::default();
        *report.slot_mut(kind) = Some(error);
        report
    }

    pub const fn get(&self, kind: HeuristicKind) -> Option<&HeuristicError> {
        match kind {
            HeuristicKind::KnownOwner => self.known_owner.as_ref(),
            HeuristicKind::PrLabel => self.pr_label.as_ref(),
            HeuristicKind::BotConfig => self.bot_config.as_ref(),
            HeuristicKind::ContributingReference => self.contributing_reference.as_ref(),
            HeuristicKind::ReadmeReference => self.readme_reference.as_ref(),
            HeuristicKind::CiAction => self.ci_action.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: HeuristicKind) -> &mut Option<HeuristicError> {
        match kind {
            HeuristicKind::KnownOwner => &mut self.known_owner,
            HeuristicKind::PrLabel => &mut self.pr_label,
            HeuristicKind::BotConfig => &mut self.bot_config,
            HeuristicKind::ContributingReference => &mut self.contributing_reference,
            HeuristicKind::ReadmeReference => &mut self.readme_reference,
            HeuristicKind::CiAction => &mut self.ci_action,
        }
    }

    /// Take every non-empty slot of `other`; empty slots leave `self` untouched.
    pub fn merge(&mut self, other: Self) {
        let Self {
            known_owner,
            pr_label,
            bot_config,
            contributing_reference,
            readme_reference,
            ci_action,
        } = other;
        let incoming = [
            (HeuristicKind::KnownOwner, known_owner),
            (HeuristicKind::PrLabel, pr_label),
            (HeuristicKind::BotConfig, bot_config),
            (HeuristicKind::ContributingReference, contributing_reference),
            (HeuristicKind::ReadmeReference, readme_reference),
            (HeuristicKind::CiAction, ci_action),
        ];
        for (kind, error) in incoming {
            if error.is_some() {
                *self.slot_mut(kind) = error;
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        HeuristicKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }

    /// Non-empty slots in report order.
    pub fn failures(&self) -> impl Iterator<Item = (HeuristicKind, &HeuristicError)> {
        HeuristicKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|err| (kind, err)))
    }

    /// `None` when every slot is empty.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .failures()
            .map(|(kind, err)| format!("* {}: {err}", kind.label()))
            .collect();
        write!(
            f,
            "{} error(s) checking for CLA references:\n\t{}",
            lines.len(),
            lines.join("\n\t")
        )
    }
}

impl std::error::Error for ErrorReport {}

/// Output of a single heuristic invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeuristicResult {
    pub signals: SignalReport,
    pub errors: ErrorReport,
}

impl HeuristicResult {
    /// Place an outcome in the slot for `kind`. Failures leave the signal `false`.
    pub fn from_outcome(kind: HeuristicKind, outcome: Result<bool, HeuristicError>) -> Self {
        match outcome {
            Ok(found) => Self {
                signals: SignalReport::single(kind, found),
                errors: ErrorReport::default(),
            },
            Err(err) => Self {
                signals: SignalReport::default(),
                errors: ErrorReport::single(kind, err),
            },
        }
    }
}
