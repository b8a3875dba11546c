//! Audit records explaining how a result was reached.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number (the month for tax settlements).
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate inputs that were adjusted rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use tax_engine::models::AuditTrace;
///
/// let trace = AuditTrace::default();
/// assert!(trace.steps.is_empty());
/// assert!(trace.warnings.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 3,
            rule_id: "progressive_tax".to_string(),
            rule_name: "Progressive Tax".to_string(),
            input: serde_json::json!({ "taxable": "5000" }),
            output: serde_json::json!({ "tax": "290" }),
            reasoning: "5000 x 10% - 210 = 290".to_string(),
        };

        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["step_number"], 3);
        assert_eq!(json["rule_id"], "progressive_tax");
        assert_eq!(json["input"]["taxable"], "5000");
    }

    #[test]
    fn test_audit_trace_round_trip() {
        let trace = AuditTrace {
            steps: vec![],
            warnings: vec![AuditWarning {
                code: "BASE_CAPPED".to_string(),
                message: "medical base capped".to_string(),
                severity: "low".to_string(),
            }],
        };

        let json = serde_json::to_string(&trace).unwrap();
        let back: AuditTrace = serde_json::from_str(&json).unwrap();
        assert_eq!(trace, back);
    }
}
