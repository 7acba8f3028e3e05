//! The four narrative analysis sections and their instructions.

/// One narrative section, in the fixed order the orchestrator issues them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisSection {
    /// Clinical interpretation of the available metrics
    Metrics,
    /// Relationships between health indicators
    Relationships,
    /// Significant patterns in the data
    Patterns,
    /// Targeted recommendations
    Recommendations,
}

impl AnalysisSection {
    /// All sections in issue order
    pub const ALL: [Self; 4] = [
        Self::Metrics,
        Self::Relationships,
        Self::Patterns,
        Self::Recommendations,
    ];

    /// Name used in progress logging
    #[must_use]
    pub const fn task_name(self) -> &'static str {
        match self {
            Self::Metrics => "metrics_interpretation",
            Self::Relationships => "relationships_analysis",
            Self::Patterns => "pattern_identification",
            Self::Recommendations => "recommendations",
        }
    }

    /// Key the section's text is stored under in the final result
    #[must_use]
    pub const fn result_key(self) -> &'static str {
        match self {
            Self::Metrics => "metrics_analysis",
            Self::Relationships => "relationships_analysis",
            Self::Patterns => "patterns_analysis",
            Self::Recommendations => "recommendations",
        }
    }

    /// Section-specific instruction appended to the shared context
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Metrics => {
                "Based on the provided health data, provide a detailed interpretation of the available metrics in clinical context:\n\
                 1. Analyze the statistical distributions\n\
                 2. Identify any concerning values or trends\n\
                 3. Evaluate the data quality and reliability\n\
                 4. Interpret the risk scores in a clinical setting"
            }
            Self::Relationships => {
                "Analyze the relationships between health indicators in the provided data:\n\
                 1. Examine the correlation matrix\n\
                 2. Identify strong positive and negative correlations\n\
                 3. Explain the clinical significance of key relationships\n\
                 4. Highlight any unexpected or concerning associations"
            }
            Self::Patterns => {
                "Identify and analyze significant patterns in the health data:\n\
                 1. Detect any clustering or grouping of health indicators\n\
                 2. Identify common health profiles or risk patterns\n\
                 3. Analyze temporal or demographic patterns if available\n\
                 4. Highlight any unusual or concerning patterns"
            }
            Self::Recommendations => {
                "Provide specific recommendations based on the analyzed health data:\n\
                 1. Suggest targeted interventions\n\
                 2. Recommend preventive measures\n\
                 3. Identify areas requiring immediate attention\n\
                 4. Propose long-term health monitoring strategies"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_section_order() {
        let keys: Vec<&str> = AnalysisSection::ALL
            .iter()
            .map(|s| s.result_key())
            .collect();
        assert_eq!(
            keys,
            vec![
                "metrics_analysis",
                "relationships_analysis",
                "patterns_analysis",
                "recommendations"
            ]
        );
    }
}
