use std::collections::HashMap;

use crate::error::{FisError, Result};
use crate::variable::{Input, Variable, VariableKey, Variables};

/// Crisp observations for one evaluation.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: Variable<Input>, val: f64) {
        self.0.insert(var.0, val);
    }

    /// Builds observations from `name -> value` pairs.
    ///
    /// Every name must be a declared input variable.
    pub fn from_named<S: AsRef<str>>(vars: &Variables, observations: impl IntoIterator<Item = (S, f64)>) -> Result<Self> {
        let mut inputs = Inputs::new();

        for (name, val) in observations {
            let name = name.as_ref();
            let var = vars.input(name).ok_or_else(|| FisError::UnknownVariable { name: name.to_owned() })?;

            inputs.add(var, val);
        }

        Ok(inputs)
    }

    pub fn get(&self, var: Variable<Input>) -> Option<f64> {
        self.0.get(&var.0).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[test]
fn test_from_named() {
    let mut vars = Variables::new();
    let km = vars.add_input("Kilometer", 6000. ..=82000., ["Dekat", "Sedang", "Jauh"]).unwrap();

    vars.set_output("Harga", 0. ..=1., ["Murah", "Sedang", "Mahal"]).unwrap();

    let inputs = Inputs::from_named(&vars, [("Kilometer", 10000.)]).unwrap();

    assert_eq!(inputs.get(km), Some(10000.));
    assert_eq!(
        Inputs::from_named(&vars, [("Harga", 1.)]).unwrap_err(),
        FisError::UnknownVariable { name: "Harga".to_owned() }
    );
}
