use serde::{Deserialize, Serialize};

use crate::checks::CheckReport;

/// Everything one invocation checked, in submission order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    pub checks: Vec<CheckReport>,
    pub summary: Summary,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Passed without running anything; also counted in `passed`.
    pub skipped: usize,
}

impl RunReport {
    pub fn from_checks(checks: Vec<CheckReport>) -> Self {
        let mut summary = Summary {
            total: checks.len(),
            ..Summary::default()
        };
        for check in &checks {
            if check.passed {
                summary.passed += 1;
            } else {
                summary.failed += 1;
            }
            if check.skipped {
                summary.skipped += 1;
            }
        }
        Self { checks, summary }
    }

    pub fn success(&self) -> bool {
        self.summary.failed == 0
    }

    pub fn render(&self, color: bool) -> String {
        self.checks.iter().map(|c| c.render(color)).collect()
    }
}
