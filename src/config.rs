//! Declarative description of a whole system.
//!
//! A [`FisConfig`] is validated once by [`FisConfig::build`], which yields a
//! [`System`] ready to evaluate observations given by variable name.

use serde::{Deserialize, Serialize};

use crate::dsl::Expr;
use crate::error::{FisError, Result};
use crate::inference::TsukamotoInference;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::{RuleTable, Rules};
use crate::variable::Variables;

/// Min-max linear partition, the only supported mode.
pub const MODE_LINEAR: u8 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FisConfig {
    pub inputs: Vec<VariableConfig>,
    pub output: VariableConfig,
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    #[serde(default = "default_mode")]
    pub mode: u8,
    pub domains: Vec<String>,
    pub min: f64,
    pub max: f64,
}

fn default_mode() -> u8 {
    MODE_LINEAR
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleConfig {
    /// `"Kilometer_Jauh {{And}} Tahun_Baru == Harga_Murah"`
    Text(String),
    /// `{ "when": [["Kilometer", "Jauh"], ["Tahun", "Baru"]], "then": "Murah" }`
    Structured { when: Vec<(String, String)>, then: String },
}

impl VariableConfig {
    fn check_mode(&self) -> Result<()> {
        match self.mode {
            MODE_LINEAR => Ok(()),
            0 => Err(FisError::InvalidVariable {
                name: self.name.clone(),
                reason: "fixed (mode 0) variables are not supported".to_owned(),
            }),
            mode => Err(FisError::InvalidVariable {
                name: self.name.clone(),
                reason: format!("unknown mode {mode}"),
            }),
        }
    }
}

impl FisConfig {
    pub fn build(&self) -> Result<System> {
        let mut variables = Variables::new();

        for input in &self.inputs {
            input.check_mode()?;
            variables.add_input(&input.name, input.min..=input.max, &input.domains)?;
        }

        self.output.check_mode()?;

        let output = variables.set_output(&self.output.name, self.output.min..=self.output.max, &self.output.domains)?;
        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            match rule {
                RuleConfig::Text(line) => rules.add_parsed(&variables, line)?,
                RuleConfig::Structured { when, then } => {
                    let mut premise: Option<Expr> = None;

                    for (name, domain) in when {
                        let var = variables
                            .input(name)
                            .ok_or_else(|| FisError::UnknownVariable { name: name.clone() })?;
                        let prop = var.is(domain.as_str());

                        premise = Some(match premise {
                            None => prop,
                            Some(lhs) => lhs.and(prop),
                        });
                    }

                    let premise = premise.ok_or_else(|| FisError::InvalidRule {
                        rule: format!("=> {}_{}", self.output.name, then),
                        reason: "premise is empty".to_owned(),
                    })?;

                    rules.add(premise, output.is(then.as_str()));
                }
            }
        }

        let table = RuleTable::build(&variables, &rules)?;

        Ok(System { variables, table })
    }
}

/// A validated variable set and rule table.
#[derive(Debug)]
pub struct System {
    variables: Variables,
    table: RuleTable,
}

impl System {
    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn eval(&self, inputs: &Inputs) -> Result<Outputs> {
        TsukamotoInference::new().eval(&self.variables, &self.table, inputs)
    }

    /// Evaluates observations given as `name -> value` pairs.
    pub fn eval_named<S: AsRef<str>>(&self, observations: impl IntoIterator<Item = (S, f64)>) -> Result<Outputs> {
        let inputs = Inputs::from_named(&self.variables, observations)?;

        self.eval(&inputs)
    }

    /// Evaluates each observation set independently.
    pub fn eval_many<I, S>(&self, batch: impl IntoIterator<Item = I>) -> Vec<Result<Outputs>>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        batch
            .into_iter()
            .map(|observations| self.eval_named(observations))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_relative_eq;

    use super::*;

    const PRICE_CONFIG: &str = r#"{
        "inputs": [
            { "name": "Kilometer", "mode": 1, "min": 6000, "max": 82000, "domains": ["Dekat", "Sedang", "Jauh"] },
            { "name": "Tahun", "min": 1, "max": 8, "domains": ["Baru", "Sedang", "Lama"] }
        ],
        "output": { "name": "Harga", "min": 6250000, "max": 14500000, "domains": ["Murah", "Sedang", "Mahal"] },
        "rules": [
            "Kilometer_Jauh {{And}} Tahun_Baru == Harga_Murah ",
            "Kilometer_Jauh {{And}} Tahun_Sedang == Harga_Murah",
            "Kilometer_Jauh {{And}} Tahun_Lama == Harga_Murah",
            "Kilometer_Sedang {{And}} Tahun_Baru == Harga_Sedang",
            "Kilometer_Sedang {{And}} Tahun_Sedang == Harga_Sedang",
            "Kilometer_Sedang {{And}} Tahun_Lama == Harga_Murah",
            { "when": [["Kilometer", "Dekat"], ["Tahun", "Baru"]], "then": "Mahal" },
            { "when": [["Tahun", "Sedang"], ["Kilometer", "Dekat"]], "then": "Sedang" },
            "Kilometer_Dekat {{And}} Tahun_Lama == Harga_Murah"
        ]
    }"#;

    fn price_config() -> FisConfig {
        serde_json::from_str(PRICE_CONFIG).unwrap()
    }

    #[test]
    fn test_deserialize() {
        let config = price_config();

        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[1].mode, MODE_LINEAR);
        assert_eq!(
            config.rules[6],
            RuleConfig::Structured {
                when: vec![
                    ("Kilometer".to_owned(), "Dekat".to_owned()),
                    ("Tahun".to_owned(), "Baru".to_owned())
                ],
                then: "Mahal".to_owned(),
            }
        );
    }

    #[test]
    fn test_price_system() {
        let system = price_config().build().unwrap();
        let outputs = system
            .eval_named([("Kilometer", 10000.), ("Tahun", 8.)])
            .unwrap();

        assert_eq!(system.table().len(), 9);
        assert_relative_eq!(outputs.value(), 7027008.310249308, max_relative = 1e-12);
    }

    #[test]
    fn test_eval_many() {
        let system = price_config().build().unwrap();
        let batch = vec![
            HashMap::from([("Kilometer", 10000.), ("Tahun", 8.)]),
            HashMap::from([("Kilometer", 60000.), ("Tahun", 1.)]),
            HashMap::from([("Kilometer", 60000.)]),
        ];
        let results = system.eval_many(batch);

        assert_eq!(results.len(), 3);
        assert_relative_eq!(results[0].as_ref().unwrap().value(), 7027008.310249308, max_relative = 1e-12);
        assert_relative_eq!(results[1].as_ref().unwrap().value(), 9643698.060941828, max_relative = 1e-12);
        assert_eq!(
            results[2],
            Err(FisError::MissingObservation {
                variable: "Tahun".to_owned()
            })
        );
    }

    #[test]
    fn test_concurrent_evaluations_agree() {
        let system = price_config().build().unwrap();
        let observations = [(10000., 8.), (15000., 7.), (27500., 3.25), (40000., 2.), (60000., 1.)];
        let sequential: Vec<u64> = observations
            .iter()
            .map(|&(km, tahun)| {
                system
                    .eval_named([("Kilometer", km), ("Tahun", tahun)])
                    .unwrap()
                    .value()
                    .to_bits()
            })
            .collect();

        let parallel: Vec<u64> = std::thread::scope(|scope| {
            let system = &system;
            let handles: Vec<_> = observations
                .iter()
                .map(|&(km, tahun)| {
                    scope.spawn(move || {
                        (0..50)
                            .map(|_| {
                                system
                                    .eval_named([("Kilometer", km), ("Tahun", tahun)])
                                    .unwrap()
                                    .value()
                                    .to_bits()
                            })
                            .reduce(|a, b| {
                                assert_eq!(a, b);
                                a
                            })
                            .unwrap()
                    })
                })
                .collect();

            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_system_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<System>();
        assert_send_sync::<Variables>();
        assert_send_sync::<RuleTable>();
    }

    #[test]
    fn test_structured_rule_unknown_variable() {
        let mut config = price_config();

        config.rules[6] = RuleConfig::Structured {
            when: vec![
                ("Umur".to_owned(), "Dekat".to_owned()),
                ("Tahun".to_owned(), "Baru".to_owned()),
            ],
            then: "Mahal".to_owned(),
        };

        assert_eq!(
            config.build().unwrap_err(),
            FisError::UnknownVariable {
                name: "Umur".to_owned()
            }
        );
    }

    #[test]
    fn test_structured_rule_empty_premise() {
        let mut config = price_config();

        config.rules[6] = RuleConfig::Structured {
            when: Vec::new(),
            then: "Mahal".to_owned(),
        };

        assert!(matches!(
            config.build(),
            Err(FisError::InvalidRule { ref rule, ref reason }) if rule == "=> Harga_Mahal" && reason == "premise is empty"
        ));
    }

    #[test]
    fn test_rejects_fixed_mode() {
        let mut config = price_config();

        config.inputs[0].mode = 0;

        assert!(matches!(
            config.build(),
            Err(FisError::InvalidVariable { ref reason, .. }) if reason.contains("mode 0")
        ));
    }

    #[test]
    fn test_rejects_incomplete_rules() {
        let mut config = price_config();

        config.rules.pop();

        assert!(matches!(
            config.build(),
            Err(FisError::RuleTableIncomplete { entries: 0, .. })
        ));
    }
}
