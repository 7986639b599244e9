/// Keyword-triggered detection tip.
///
/// Keywords are matched case-insensitively against the concatenated
/// `detailed_notes` of a site's labels.
#[derive(Debug, Clone)]
pub struct TipRule {
    keyword: String,
    tip: String,
}

impl TipRule {
    pub fn new(keyword: impl Into<String>, tip: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().to_lowercase(),
            tip: tip.into(),
        }
    }
}

/// Ordered rule table mapping observed conditions to detection tips.
///
/// First matching rule wins; the fallback applies when nothing matches.
/// Kept as a table rather than inline conditionals because the tip
/// vocabulary grows with observed conditions (fog, night glare, ...).
#[derive(Debug, Clone)]
pub struct TipRuleSet {
    rules: Vec<TipRule>,
    fallback: String,
}

impl TipRuleSet {
    pub fn new(rules: Vec<TipRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Append a rule; later rules only apply when earlier ones miss.
    pub fn with_rule(mut self, rule: TipRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Select the tip for a site's concatenated notes.
    pub fn select(&self, notes: &str) -> &str {
        let haystack = notes.to_lowercase();
        self.rules
            .iter()
            .find(|rule| haystack.contains(&rule.keyword))
            .map(|rule| rule.tip.as_str())
            .unwrap_or(&self.fallback)
    }
}

impl Default for TipRuleSet {
    fn default() -> Self {
        Self::new(
            vec![TipRule::new(
                "snow",
                "Winter conditions common. Look for truck shapes despite snow.",
            )],
            "Standard detection. Count trailer rectangles.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snow_selects_winter_tip_case_insensitively() {
        let rules = TipRuleSet::default();
        assert_eq!(
            rules.select("heavy Snow drifts along the fence"),
            "Winter conditions common. Look for truck shapes despite snow."
        );
    }

    #[test]
    fn no_match_falls_back_to_standard_tip() {
        let rules = TipRuleSet::default();
        assert_eq!(
            rules.select("clear day, dry pavement"),
            "Standard detection. Count trailer rectangles."
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = TipRuleSet::default()
            .with_rule(TipRule::new("fog", "Fog halves visibility; trust lot geometry."));
        assert_eq!(
            rules.select("snow banks, patchy fog"),
            "Winter conditions common. Look for truck shapes despite snow."
        );
        assert_eq!(
            rules.select("patchy fog at dawn"),
            "Fog halves visibility; trust lot geometry."
        );
    }
}
