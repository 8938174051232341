//! The six fixed planning phases.

use serde::{Deserialize, Serialize};

/// A planning phase. Declaration order is the workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Ideation,
    Logistics,
    Marketing,
    Preparation,
    Execution,
    Review,
}

impl Phase {
    /// All phases in workflow order.
    pub const ALL: [Phase; 6] = [
        Phase::Ideation,
        Phase::Logistics,
        Phase::Marketing,
        Phase::Preparation,
        Phase::Execution,
        Phase::Review,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ideation" => Some(Self::Ideation),
            "logistics" => Some(Self::Logistics),
            "marketing" => Some(Self::Marketing),
            "preparation" => Some(Self::Preparation),
            "execution" => Some(Self::Execution),
            "review" => Some(Self::Review),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ideation => "ideation",
            Self::Logistics => "logistics",
            Self::Marketing => "marketing",
            Self::Preparation => "preparation",
            Self::Execution => "execution",
            Self::Review => "review",
        }
    }

    /// Human-readable phase name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ideation => "Ideation & Planning",
            Self::Logistics => "Logistics & Speakers",
            Self::Marketing => "Marketing & Promotion",
            Self::Preparation => "Final Preparation",
            Self::Execution => "Event Execution",
            Self::Review => "Post-Event Review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ideation => "Define event concept, goals, and initial planning",
            Self::Logistics => "Book venue, confirm speakers, arrange logistics",
            Self::Marketing => "Create brand, launch campaigns, drive registrations",
            Self::Preparation => "Finalize materials, rehearse, prepare for event",
            Self::Execution => "Run the event successfully",
            Self::Review => "Gather feedback, analyze metrics, document learnings",
        }
    }

    /// Accent color used by dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Ideation => "#8B5CF6",
            Self::Logistics => "#3B82F6",
            Self::Marketing => "#F59E0B",
            Self::Preparation => "#F97316",
            Self::Execution => "#22C55E",
            Self::Review => "#6B7280",
        }
    }

    pub fn typical_duration_days(&self) -> u32 {
        match self {
            Self::Ideation => 14,
            Self::Logistics => 30,
            Self::Marketing => 35,
            Self::Preparation => 14,
            Self::Execution => 1,
            Self::Review => 7,
        }
    }

    /// Zero-based position in the workflow.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_matches_declaration() {
        let indices: Vec<usize> = Phase::ALL.iter().map(Phase::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
        assert!(Phase::Ideation < Phase::Review);
    }

    #[test]
    fn test_parse() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_str(phase.as_str()), Some(phase));
        }
        assert_eq!(Phase::from_str(" Marketing "), Some(Phase::Marketing));
        assert_eq!(Phase::from_str("launch"), None);
    }
}
