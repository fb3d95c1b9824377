//! Human-readable quality report
//!
//! Renders an assessment the way an operator wants to read it at the end of
//! an extraction run.

use std::fmt;

use crate::types::QualityAssessment;

const RULE_WIDTH: usize = 50;

/// Display adapter for [`QualityAssessment`]
pub struct QualityReport<'a>(pub &'a QualityAssessment);

impl fmt::Display for QualityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "DATA QUALITY REPORT")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Method: {}", a.source_label)?;
        writeln!(f, "Quality score: {:.1}%", a.score * 100.0)?;
        writeln!(f, "Tier: {}", a.tier.as_str().to_uppercase())?;
        writeln!(f, "Valid fields: {}/{}", a.valid_field_count, a.total_field_count)?;

        if !a.missing_essential.is_empty() {
            let names: Vec<&str> = a.missing_essential.iter().map(|field| field.as_str()).collect();
            writeln!(f, "Missing essential fields: {}", names.join(", "))?;
        }

        if !a.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Issues:")?;
            for issue in &a.issues {
                writeln!(f, "  - {}", issue)?;
            }
        }

        writeln!(f)?;
        if a.should_fallback {
            writeln!(f, "Recommendation: use fallback method")?;
        } else {
            writeln!(f, "Recommendation: data is acceptable")?;
        }
        write!(f, "{}", rule)
    }
}
