use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FisError, Result};
use crate::linspace::Linspace;
use crate::membership::membership;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Marker for variables observed by the caller.
#[derive(Debug)]
pub enum Input {}

/// Marker for the variable the system infers.
#[derive(Debug)]
pub enum Output {}

/// A typed handle to a variable stored in [`Variables`].
pub struct Variable<R>(pub(crate) VariableKey, PhantomData<R>);

impl<R> Variable<R> {
    pub(crate) fn new(key: VariableKey) -> Self {
        Variable(key, PhantomData)
    }

    pub fn key(self) -> VariableKey {
        self.0
    }
}

impl<R> Clone for Variable<R> {
    fn clone(&self) -> Self {
        Variable(self.0, PhantomData)
    }
}

impl<R> Copy for Variable<R> {}

impl<R> PartialEq for Variable<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R> Eq for Variable<R> {}

impl<R> std::fmt::Debug for Variable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Variable").field(&self.0).finish()
    }
}

/// A linguistic variable: an ordered set of domains laid over `[min, max]`.
///
/// The domains are partitioned by evenly spaced anchor points, one per
/// domain, so the first domain sits on `min` and the last on `max`. The
/// variable itself never holds an observation; per-call values live in the
/// inference session.
#[derive(Clone, Debug, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    domains: Vec<String>,
    min: f64,
    max: f64,
    anchors: Vec<f64>,
}

impl LinguisticVariable {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        range: RangeInclusive<f64>,
        domains: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let name = name.into();
        let domains: Vec<String> = domains.into_iter().map(Into::into).collect();
        let (min, max) = range.into_inner();
        let invalid = |reason: &str| FisError::InvalidVariable {
            name: name.clone(),
            reason: reason.to_owned(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if domains.len() < 3 {
            return Err(invalid("at least 3 domains are required for a linear partition"));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid("range bounds must be finite"));
        }
        if min >= max {
            return Err(invalid("range minimum must be below its maximum"));
        }
        if domains.iter().any(|d| d.trim().is_empty()) {
            return Err(invalid("domain names must not be empty"));
        }
        for (i, domain) in domains.iter().enumerate() {
            if domains[..i].contains(domain) {
                return Err(invalid(&format!("domain '{domain}' is declared twice")));
            }
        }

        let anchors = Linspace::new(min, max, domains.len()).collect();

        Ok(Self {
            name,
            domains,
            min,
            max,
            anchors,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn domain_index(&self, domain: &str) -> Option<usize> {
        self.domains.iter().position(|d| d == domain)
    }

    pub fn range(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    /// The anchor point of each domain, in domain order.
    pub fn anchors(&self) -> &[f64] {
        &self.anchors
    }

    /// Degree of membership of `value` in each domain, in domain order.
    pub fn membership(&self, value: f64) -> Vec<f64> {
        membership(&self.anchors, value)
    }
}

/// Registry of the input variables and the single output variable of a system.
///
/// Inputs keep their declaration order, which is the order antecedent
/// combinations are enumerated in.
#[derive(Debug, Default)]
pub struct Variables {
    pub(crate) vars: SlotMap<VariableKey, LinguisticVariable>,
    pub(crate) inputs: Vec<VariableKey>,
    pub(crate) output: Option<VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        range: RangeInclusive<f64>,
        domains: impl IntoIterator<Item = S>,
    ) -> Result<Variable<Input>> {
        let var = LinguisticVariable::new(name, range, domains)?;
        let key = self.insert(var)?;

        self.inputs.push(key);

        Ok(Variable::new(key))
    }

    pub fn set_output<S: Into<String>>(
        &mut self,
        name: impl Into<String>,
        range: RangeInclusive<f64>,
        domains: impl IntoIterator<Item = S>,
    ) -> Result<Variable<Output>> {
        let var = LinguisticVariable::new(name, range, domains)?;

        if self.output.is_some() {
            return Err(FisError::InvalidVariable {
                name: var.name,
                reason: "an output variable is already declared".to_owned(),
            });
        }

        let key = self.insert(var)?;

        self.output = Some(key);

        Ok(Variable::new(key))
    }

    fn insert(&mut self, var: LinguisticVariable) -> Result<VariableKey> {
        if self.find(&var.name).is_some() {
            return Err(FisError::DuplicateVariable { name: var.name });
        }

        Ok(self.vars.insert(var))
    }

    pub(crate) fn find(&self, name: &str) -> Option<VariableKey> {
        self.vars.iter().find(|(_, v)| v.name == name).map(|(k, _)| k)
    }

    pub fn get<R>(&self, var: Variable<R>) -> Option<&LinguisticVariable> {
        self.vars.get(var.0)
    }

    pub fn input(&self, name: &str) -> Option<Variable<Input>> {
        self.find(name)
            .filter(|key| self.inputs.contains(key))
            .map(Variable::new)
    }

    pub fn output(&self) -> Option<Variable<Output>> {
        self.output.map(Variable::new)
    }

    /// Input variables in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = (Variable<Input>, &LinguisticVariable)> + '_ {
        self.inputs.iter().map(|&key| (Variable::new(key), &self.vars[key]))
    }

    pub(crate) fn output_variable(&self) -> Result<(VariableKey, &LinguisticVariable)> {
        let key = self.output.ok_or(FisError::MissingOutput)?;

        Ok((key, &self.vars[key]))
    }

    pub(crate) fn name_of(&self, key: VariableKey) -> &str {
        self.vars.get(key).map_or("<unknown>", |v| v.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors_are_evenly_spaced() {
        let var = LinguisticVariable::new("Kilometer", 6000. ..=82000., ["Dekat", "Sedang", "Jauh"]).unwrap();

        assert_eq!(var.anchors(), &[6000., 44000., 82000.]);
        assert_eq!(var.domain_index("Jauh"), Some(2));
        assert_eq!(var.domain_index("Jau"), None);
    }

    #[test]
    fn test_rejects_invalid_variables() {
        let two_domains = LinguisticVariable::new("Tahun", 1. ..=8., ["Baru", "Lama"]);
        let empty_range = LinguisticVariable::new("Tahun", 8. ..=8., ["Baru", "Sedang", "Lama"]);
        let reversed = LinguisticVariable::new("Tahun", 8. ..=1., ["Baru", "Sedang", "Lama"]);
        let infinite = LinguisticVariable::new("Tahun", 1. ..=f64::INFINITY, ["Baru", "Sedang", "Lama"]);
        let repeated = LinguisticVariable::new("Tahun", 1. ..=8., ["Baru", "Baru", "Lama"]);

        for result in [two_domains, empty_range, reversed, infinite, repeated] {
            assert!(matches!(result, Err(FisError::InvalidVariable { .. })));
        }
    }

    #[test]
    fn test_registry() {
        let mut vars = Variables::new();
        let km = vars
            .add_input("Kilometer", 6000. ..=82000., ["Dekat", "Sedang", "Jauh"])
            .unwrap();
        let tahun = vars.add_input("Tahun", 1. ..=8., ["Baru", "Sedang", "Lama"]).unwrap();
        let harga = vars
            .set_output("Harga", 6_250_000. ..=14_500_000., ["Murah", "Sedang", "Mahal"])
            .unwrap();

        assert_eq!(vars.input("Tahun"), Some(tahun));
        assert_eq!(vars.input("Harga"), None);
        assert_eq!(vars.output(), Some(harga));
        assert_eq!(
            vars.inputs().map(|(v, _)| v).collect::<Vec<_>>(),
            vec![km, tahun]
        );

        let duplicate = vars.add_input("Tahun", 0. ..=1., ["A", "B", "C"]);
        let second_output = vars.set_output("Laba", 0. ..=1., ["A", "B", "C"]);

        assert_eq!(
            duplicate,
            Err(FisError::DuplicateVariable {
                name: "Tahun".to_owned()
            })
        );
        assert!(matches!(second_output, Err(FisError::InvalidVariable { .. })));
    }
}
