//! Prompt templates and image search terms for the two query modes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Plant,
    Disease,
}

impl QueryMode {
    pub fn from_flags(disease: bool) -> Self {
        if disease {
            return Self::Disease;
        }
        Self::Plant
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Plant => Self::Disease,
            Self::Disease => Self::Plant,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Plant => "Search by Plant",
            Self::Disease => "Search by Disease",
        }
    }
}

pub fn build_prompt(mode: QueryMode, query: &str) -> String {
    match mode {
        QueryMode::Plant => format!(
            "You are an expert herbalist. Provide HTML-formatted details for the plant \"{query}\" including titles (in bold texts) AYURVEDIC USES:, MEDICAL BENEFITS:, and REMEDY PREPERATION:."
        ),
        QueryMode::Disease => format!(
            "You are an expert herbalist. Provide HTML-formatted remedies and beneficial plants for the disease \"{query}\"."
        ),
    }
}

/// Search term handed to the image endpoint: the query plus a mode suffix.
pub fn image_search_term(mode: QueryMode, query: &str) -> String {
    match mode {
        QueryMode::Plant => format!("{query} plant"),
        QueryMode::Disease => format!("{query} disease"),
    }
}

pub fn placeholder(mode: QueryMode) -> &'static str {
    match mode {
        QueryMode::Plant => "Enter plant name (e.g. Tulsi)",
        QueryMode::Disease => "Enter disease name (e.g. Cold)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_prompt_contains_query_and_section_titles() {
        let prompt = build_prompt(QueryMode::Plant, "Tulsi");
        assert!(prompt.contains("Tulsi"));
        assert!(prompt.contains("AYURVEDIC USES"));
        assert!(prompt.contains("MEDICAL BENEFITS"));
        assert!(prompt.contains("REMEDY PREPERATION"));
    }

    #[test]
    fn disease_prompt_contains_query_verbatim() {
        let prompt = build_prompt(QueryMode::Disease, "Cold");
        assert!(prompt.contains("\"Cold\""));
        assert!(prompt.contains("remedies"));
    }

    #[test]
    fn image_term_appends_mode_suffix() {
        assert_eq!(image_search_term(QueryMode::Plant, "Tulsi"), "Tulsi plant");
        assert_eq!(image_search_term(QueryMode::Disease, "Cold"), "Cold disease");
    }

    #[test]
    fn mode_from_flags_defaults_to_plant() {
        assert_eq!(QueryMode::from_flags(false), QueryMode::Plant);
        assert_eq!(QueryMode::from_flags(true), QueryMode::Disease);
        assert_eq!(QueryMode::Plant.toggled(), QueryMode::Disease);
    }
}
