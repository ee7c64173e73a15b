use crate::variable::VariableKey;

/// Result of one evaluation.
///
/// Besides the crisp value, the per-combination firing strengths, matched
/// consequent domains and crisp sub-results are kept for inspection. All
/// sequences share the combination enumeration order.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    output: VariableKey,
    value: f64,
    combinations: Vec<Vec<usize>>,
    alphas: Vec<f64>,
    consequents: Vec<usize>,
    crisp_values: Vec<f64>,
}

impl Outputs {
    pub(crate) fn new(
        output: VariableKey,
        value: f64,
        combinations: Vec<Vec<usize>>,
        alphas: Vec<f64>,
        consequents: Vec<usize>,
        crisp_values: Vec<f64>,
    ) -> Self {
        Self {
            output,
            value,
            combinations,
            alphas,
            consequents,
            crisp_values,
        }
    }

    /// The key of the variable this value was inferred for.
    pub fn output(&self) -> VariableKey {
        self.output
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Antecedent domain indices of each combination, in input order.
    pub fn combinations(&self) -> &[Vec<usize>] {
        &self.combinations
    }

    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    /// Output domain index matched by each combination.
    pub fn consequents(&self) -> &[usize] {
        &self.consequents
    }

    pub fn crisp_values(&self) -> &[f64] {
        &self.crisp_values
    }
}
