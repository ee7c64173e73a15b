use std::collections::HashMap;

use tracing::debug;

use crate::combinator::Combinations;
use crate::dsl::{Consequence, Expr};
use crate::error::{FisError, Result};
use crate::variable::{VariableKey, Variables};

/// Rules as declared by the caller, before validation.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr, consequence: Consequence) {
        self.0.push(Rule { premise, consequence });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequence: Consequence,
}

/// Exact mapping from an antecedent combination to an output domain.
///
/// A combination is one domain index per input variable, in input
/// declaration order. The table covers every combination exactly once.
#[derive(Clone, Debug)]
pub struct RuleTable {
    inputs: Vec<VariableKey>,
    output: VariableKey,
    output_domains: usize,
    shape: Vec<usize>,
    entries: HashMap<Box<[usize]>, usize>,
}

impl RuleTable {
    pub fn build(vars: &Variables, rules: &Rules) -> Result<Self> {
        let (output, output_var) = vars.output_variable()?;
        let inputs = vars.inputs.clone();
        let shape: Vec<usize> = inputs.iter().map(|&key| vars.vars[key].domain_count()).collect();

        if Combinations::count(&shape).is_none() {
            return Err(FisError::TooManyCombinations {
                inputs: inputs.len(),
            });
        }

        let mut candidates: HashMap<Box<[usize]>, Vec<usize>> = HashMap::with_capacity(rules.len());

        for rule in &rules.0 {
            let describe = || describe_rule(vars, rule);
            let mut combination = vec![None; inputs.len()];

            for (var_key, domain) in rule.premise.propositions() {
                let Some(position) = inputs.iter().position(|&key| key == var_key) else {
                    return Err(FisError::InvalidRule {
                        rule: describe(),
                        reason: format!("'{}' is not an input variable", vars.name_of(var_key)),
                    });
                };
                let var = &vars.vars[var_key];
                let index = var.domain_index(domain).ok_or_else(|| FisError::UnknownDomain {
                    variable: var.name().to_owned(),
                    domain: domain.to_owned(),
                })?;

                if combination[position].replace(index).is_some() {
                    return Err(FisError::InvalidRule {
                        rule: describe(),
                        reason: format!("'{}' appears more than once", var.name()),
                    });
                }
            }

            let combination = combination
                .into_iter()
                .enumerate()
                .map(|(i, index)| {
                    index.ok_or_else(|| FisError::InvalidRule {
                        rule: describe(),
                        reason: format!("'{}' is not constrained", vars.name_of(inputs[i])),
                    })
                })
                .collect::<Result<Box<[usize]>>>()?;

            let Consequence(var_key, domain) = &rule.consequence;

            if *var_key != output {
                return Err(FisError::InvalidRule {
                    rule: describe(),
                    reason: format!("'{}' is not the output variable", vars.name_of(*var_key)),
                });
            }

            let consequent = output_var
                .domain_index(domain)
                .ok_or_else(|| FisError::UnknownDomain {
                    variable: output_var.name().to_owned(),
                    domain: domain.clone(),
                })?;

            candidates.entry(combination).or_default().push(consequent);
        }

        let mut entries = HashMap::with_capacity(candidates.len());

        for combination in Combinations::new(shape.clone()) {
            match candidates.remove(combination.as_slice()).as_deref() {
                Some(&[consequent]) => {
                    entries.insert(combination.into_boxed_slice(), consequent);
                }
                found => {
                    return Err(FisError::RuleTableIncomplete {
                        combination: describe_combination(vars, &inputs, &combination),
                        entries: found.map_or(0, <[usize]>::len),
                    });
                }
            }
        }

        debug!(
            "Built rule table with {} entries over {} input variables",
            entries.len(),
            inputs.len()
        );

        Ok(Self {
            inputs,
            output,
            output_domains: output_var.domain_count(),
            shape,
            entries,
        })
    }

    /// Output domain index for an antecedent combination.
    pub fn lookup(&self, combination: &[usize]) -> Option<usize> {
        self.entries.get(combination).copied()
    }

    /// Number of domains of each input variable, in input order.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn inputs(&self) -> &[VariableKey] {
        &self.inputs
    }

    pub(crate) fn output(&self) -> VariableKey {
        self.output
    }

    /// Number of domains the output variable had when the table was built.
    pub(crate) fn output_domains(&self) -> usize {
        self.output_domains
    }
}

/// `Kilometer_Dekat, Tahun_Baru`
pub(crate) fn describe_combination(vars: &Variables, inputs: &[VariableKey], combination: &[usize]) -> String {
    inputs
        .iter()
        .zip(combination)
        .map(|(&key, &index)| {
            let var = &vars.vars[key];
            let domain = var.domains().get(index).map_or("?", String::as_str);

            format!("{}_{}", var.name(), domain)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_rule(vars: &Variables, rule: &Rule) -> String {
    let premise = rule
        .premise
        .propositions()
        .into_iter()
        .map(|(key, domain)| format!("{}_{}", vars.name_of(key), domain))
        .collect::<Vec<_>>()
        .join(" and ");
    let Consequence(key, domain) = &rule.consequence;

    format!("{premise} => {}_{}", vars.name_of(*key), domain)
}
