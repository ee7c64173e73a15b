use slotmap::SecondaryMap;
use tracing::{debug, trace};

use crate::combinator::Combinations;
use crate::error::{FisError, Result};
use crate::inputs::Inputs;
use crate::math::{monotonic_inverse, weighted_average};
use crate::outputs::Outputs;
use crate::rules::{describe_combination, RuleTable};
use crate::variable::{Variable, VariableKey, Variables};

/// Tsukamoto inference: min conjunction, monotonic consequents and a
/// weighted average of the per-rule crisp values.
///
/// The engine holds no state between calls. Variables and the rule table are
/// only read, so one configuration can serve concurrent evaluations.
#[derive(Clone, Copy, Debug, Default)]
pub struct TsukamotoInference;

impl TsukamotoInference {
    pub fn new() -> Self {
        TsukamotoInference
    }

    pub fn eval(&self, vars: &Variables, table: &RuleTable, inputs: &Inputs) -> Result<Outputs> {
        let (output_key, output) = vars.output_variable()?;

        if table.inputs() != vars.inputs.as_slice()
            || table.output() != output_key
            || table.output_domains() != output.domain_count()
        {
            return Err(FisError::MismatchedRuleTable);
        }

        Session::fuzzify(vars, table.inputs(), inputs)?
            .fire(table)?
            .defuzzify()
    }
}

/// Per-call scratch state, one stage per step of the evaluation.
struct Session<'a> {
    vars: &'a Variables,
    inputs: &'a [VariableKey],
    memberships: SecondaryMap<VariableKey, Vec<f64>>,
    combinations: Vec<Vec<usize>>,
    alphas: Vec<f64>,
    consequents: Vec<usize>,
}

impl<'a> Session<'a> {
    fn fuzzify(vars: &'a Variables, input_keys: &'a [VariableKey], inputs: &Inputs) -> Result<Self> {
        let mut memberships = SecondaryMap::with_capacity(input_keys.len());

        for &key in input_keys {
            let var = &vars.vars[key];
            let value = inputs.get(Variable::new(key)).ok_or_else(|| FisError::MissingObservation {
                variable: var.name().to_owned(),
            })?;

            if !value.is_finite() {
                return Err(FisError::NonFiniteObservation {
                    variable: var.name().to_owned(),
                    value,
                });
            }

            let degrees = var.membership(value);

            trace!("{} = {} -> {:?}", var.name(), value, degrees);
            memberships.insert(key, degrees);
        }

        Ok(Self {
            vars,
            inputs: input_keys,
            memberships,
            combinations: Vec::new(),
            alphas: Vec::new(),
            consequents: Vec::new(),
        })
    }

    /// Alpha and consequent of every combination, both taken from the same
    /// index tuple.
    fn fire(mut self, table: &RuleTable) -> Result<Self> {
        let shape = self.inputs.iter().map(|&key| self.memberships[key].len()).collect();
        let combinations = Combinations::new(shape);
        let n_combinations = combinations.len();

        self.combinations.reserve(n_combinations);
        self.alphas.reserve(n_combinations);
        self.consequents.reserve(n_combinations);

        for combination in combinations {
            let alpha = combination
                .iter()
                .zip(self.inputs)
                .map(|(&domain, &key)| self.memberships[key][domain])
                .fold(f64::INFINITY, f64::min);
            let consequent = table.lookup(&combination).ok_or_else(|| FisError::RuleLookup {
                combination: describe_combination(self.vars, self.inputs, &combination),
            })?;

            self.alphas.push(alpha);
            self.consequents.push(consequent);
            self.combinations.push(combination);
        }

        Ok(self)
    }

    fn defuzzify(self) -> Result<Outputs> {
        let (output_key, output) = self.vars.output_variable()?;
        let crisp_values: Vec<f64> = self
            .consequents
            .iter()
            .zip(&self.alphas)
            .map(|(&consequent, &alpha)| monotonic_inverse(output.anchors(), consequent, alpha))
            .collect();

        for (((combination, alpha), consequent), z) in self
            .combinations
            .iter()
            .zip(&self.alphas)
            .zip(&self.consequents)
            .zip(&crisp_values)
        {
            trace!(
                "[{}] alpha = {} => {}_{} z = {}",
                describe_combination(self.vars, self.inputs, combination),
                alpha,
                output.name(),
                output.domains()[*consequent],
                z
            );
        }

        let value = weighted_average(crisp_values.iter().copied().zip(self.alphas.iter().copied()))
            .ok_or(FisError::DegenerateInference)?;

        debug!(
            "Inferred {} = {} from {} combinations",
            output.name(),
            value,
            self.alphas.len()
        );

        Ok(Outputs::new(
            output_key,
            value,
            self.combinations,
            self.alphas,
            self.consequents,
            crisp_values,
        ))
    }
}
