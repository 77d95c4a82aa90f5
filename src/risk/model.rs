use crate::models::Vulnerability;
use serde::{Deserialize, Serialize};

/// Minimum probability (strict) for a vulnerability to seed a propagation path.
pub const DEFAULT_PROPAGATION_THRESHOLD: f64 = 0.3;

/// One candidate failure chain. Always non-empty. The current model only
/// produces single-element paths; longer chains are an extension point for
/// multi-hop propagation, so the combined-risk math below already handles
/// arbitrary lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropagationPath {
    vulnerabilities: Vec<Vulnerability>,
}

impl PropagationPath {
    pub fn new(vulnerabilities: Vec<Vulnerability>) -> Option<Self> {
        if vulnerabilities.is_empty() {
            return None;
        }
        Some(Self { vulnerabilities })
    }

    fn single(vulnerability: Vulnerability) -> Self {
        Self {
            vulnerabilities: vec![vulnerability],
        }
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        false // non-empty by construction
    }

    /// Combined likelihood of the whole chain aligning. Products of values in
    /// [0,1] may underflow toward 0 for long chains; that correctly signals a
    /// negligible combined likelihood.
    pub fn probability(&self) -> f64 {
        self.vulnerabilities.iter().map(|v| v.probability).product()
    }

    pub fn mean_severity(&self) -> f64 {
        let total: f64 = self.vulnerabilities.iter().map(|v| v.severity).sum();
        total / self.vulnerabilities.len() as f64
    }

    pub fn risk(&self) -> f64 {
        self.probability() * self.mean_severity()
    }
}

/// Derives failure-propagation paths from a vulnerability set and reduces
/// them to a single scalar risk score.
#[derive(Debug, Clone)]
pub struct RiskModel {
    propagation_threshold: f64,
}

impl RiskModel {
    pub fn new() -> Self {
        Self {
            propagation_threshold: DEFAULT_PROPAGATION_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.propagation_threshold = threshold;
        self
    }

    pub fn propagation_threshold(&self) -> f64 {
        self.propagation_threshold
    }

    /// A vulnerability seeds a length-1 path iff its probability strictly
    /// exceeds the threshold. Output order follows input order. Pure.
    pub fn analyze_propagation(&self, vulnerabilities: &[Vulnerability]) -> Vec<PropagationPath> {
        vulnerabilities
            .iter()
            .filter(|v| v.probability > self.propagation_threshold)
            .cloned()
            .map(PropagationPath::single)
            .collect()
    }

    /// Worst-case path dominates: the score is the maximum over all paths of
    /// `path probability x mean path severity`, not a sum. One fully aligned
    /// high-probability, high-severity chain is the risk driver.
    pub fn calculate_risk_score(&self, paths: &[PropagationPath]) -> f64 {
        paths.iter().map(PropagationPath::risk).fold(0.0, f64::max)
    }
}

impl Default for RiskModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FactorType;

    fn vuln(id: &str, probability: f64, severity: f64) -> Vulnerability {
        Vulnerability::new(id, FactorType::Machine, probability, severity, id).unwrap()
    }

    #[test]
    fn test_empty_input_yields_no_paths_and_zero_score() {
        let model = RiskModel::new();
        let paths = model.analyze_propagation(&[]);
        assert!(paths.is_empty());
        assert_eq!(model.calculate_risk_score(&paths), 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let model = RiskModel::new();
        let at_threshold = vuln("at", 0.3, 0.5);
        let above_threshold = vuln("above", 0.31, 0.5);

        let paths = model.analyze_propagation(&[at_threshold, above_threshold]);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].vulnerabilities()[0].id, "above");
    }

    #[test]
    fn test_paths_preserve_input_order() {
        let model = RiskModel::new();
        let input = [vuln("a", 0.5, 0.8), vuln("skip", 0.1, 0.9), vuln("b", 0.9, 0.6)];

        let paths = model.analyze_propagation(&input);

        let ids: Vec<&str> = paths
            .iter()
            .map(|p| p.vulnerabilities()[0].id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(paths.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_worst_case_path_dominates() {
        // A(0.5, 0.8) -> 0.40, B(0.9, 0.6) -> 0.54; max wins.
        let model = RiskModel::new();
        let paths = model.analyze_propagation(&[vuln("a", 0.5, 0.8), vuln("b", 0.9, 0.6)]);

        assert_eq!(paths.len(), 2);
        let score = model.calculate_risk_score(&paths);
        assert!((score - 0.54).abs() < 1e-12);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let model = RiskModel::new().with_threshold(0.0);
        let inputs = [
            vuln("a", 1.0, 1.0),
            vuln("b", 0.001, 0.001),
            vuln("c", 0.7, 0.3),
        ];

        let paths = model.analyze_propagation(&inputs);
        let score = model.calculate_risk_score(&paths);

        assert!((0.0..=1.0).contains(&score));
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_multi_element_path_combines_probability_and_mean_severity() {
        let path = PropagationPath::new(vec![vuln("a", 0.5, 0.8), vuln("b", 0.4, 0.2)]).unwrap();

        assert!((path.probability() - 0.2).abs() < 1e-12);
        assert!((path.mean_severity() - 0.5).abs() < 1e-12);
        assert!((path.risk() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(PropagationPath::new(Vec::new()).is_none());
    }

    #[test]
    fn test_custom_threshold() {
        let model = RiskModel::new().with_threshold(0.8);
        let paths = model.analyze_propagation(&[vuln("a", 0.5, 0.8), vuln("b", 0.9, 0.6)]);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].vulnerabilities()[0].id, "b");
    }
}
