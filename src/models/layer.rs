use crate::error::ProcGapError;
use crate::models::Vulnerability;
use serde::{Deserialize, Serialize};

/// One Swiss-cheese "slice": a named grouping of vulnerabilities with a
/// relative importance weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub vulnerabilities: Vec<Vulnerability>,
    pub weight: f64,
}

impl Layer {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weight: f64,
    ) -> Result<Self, ProcGapError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ProcGapError::InvalidLayerWeight(weight));
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            vulnerabilities: Vec::new(),
            weight,
        })
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    pub fn add_vulnerability(&mut self, vulnerability: Vulnerability) {
        self.vulnerabilities.push(vulnerability);
    }

    pub fn is_empty(&self) -> bool {
        self.vulnerabilities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.vulnerabilities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FactorType;

    #[test]
    fn test_layer_creation() {
        let layer = Layer::new("prescribing", "Prescribing stage", 1.5).unwrap();
        assert_eq!(layer.id, "prescribing");
        assert!(layer.is_empty());
        assert_eq!(layer.weight, 1.5);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let result = Layer::new("l1", "Layer 1", -0.5);
        assert!(matches!(result, Err(ProcGapError::InvalidLayerWeight(w)) if w == -0.5));
    }

    #[test]
    fn test_non_finite_weight_rejected() {
        assert!(Layer::new("l1", "Layer 1", f64::NAN).is_err());
        assert!(Layer::new("l1", "Layer 1", f64::INFINITY).is_err());
    }

    #[test]
    fn test_layer_collects_vulnerabilities() {
        let vuln = Vulnerability::new("v1", FactorType::Machine, 0.2, 0.9, "Pump fault").unwrap();
        let mut layer = Layer::new("dispensing", "Dispensing stage", 1.0)
            .unwrap()
            .with_vulnerability(vuln.clone());

        layer.add_vulnerability(vuln);

        assert_eq!(layer.len(), 2);
        assert!(!layer.is_empty());
    }
}
