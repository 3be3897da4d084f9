use serde::{Deserialize, Serialize};

/// Производственное направление, к которому относится представление
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowDomain {
    /// In-Mould Labelling
    #[serde(rename = "iml")]
    Iml,
    /// Шелкография
    #[serde(rename = "screen_printing")]
    ScreenPrinting,
}

impl WorkflowDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowDomain::Iml => "iml",
            WorkflowDomain::ScreenPrinting => "screen_printing",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkflowDomain::Iml => "IML",
            WorkflowDomain::ScreenPrinting => "Screen Printing",
        }
    }
}

impl std::fmt::Display for WorkflowDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_serde() {
        for domain in [WorkflowDomain::Iml, WorkflowDomain::ScreenPrinting] {
            let json = serde_json::to_value(domain).unwrap();
            assert_eq!(json, domain.as_str());
            assert_eq!(domain.to_string(), domain.as_str());
        }
        assert_eq!(WorkflowDomain::ScreenPrinting.display_name(), "Screen Printing");
    }
}
