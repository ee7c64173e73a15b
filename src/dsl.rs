use crate::variable::{Input, Output, Variable, VariableKey};

/// A rule premise: a conjunction of `variable is domain` propositions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(VariableKey, String),
    And(Vec<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            }
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(VariableKey, &'p str)>) {
            match expr {
                Expr::Is(var_key, domain) => out.push((*var_key, domain.as_str())),
                Expr::And(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                }
            }
        }

        parse(self, &mut props);

        props
    }
}

/// A rule consequence: `output is domain`.
#[derive(Clone, Debug, PartialEq)]
pub struct Consequence(pub(crate) VariableKey, pub(crate) String);

impl Consequence {
    pub fn domain(&self) -> &str {
        &self.1
    }
}

impl Variable<Input> {
    pub fn is(self, domain: impl Into<String>) -> Expr {
        Expr::Is(self.0, domain.into())
    }
}

impl Variable<Output> {
    pub fn is(self, domain: impl Into<String>) -> Consequence {
        Consequence(self.0, domain.into())
    }
}

#[test]
fn test_and_flattens() {
    use crate::variable::Variables;

    let mut vars = Variables::new();
    let a = vars.add_input("A", 0. ..=1., ["Lo", "Mid", "Hi"]).unwrap();
    let b = vars.add_input("B", 0. ..=1., ["Lo", "Mid", "Hi"]).unwrap();
    let c = vars.add_input("C", 0. ..=1., ["Lo", "Mid", "Hi"]).unwrap();
    let premise = a.is("Lo").and(b.is("Mid")).and(c.is("Hi"));

    assert_eq!(
        premise.propositions(),
        vec![(a.key(), "Lo"), (b.key(), "Mid"), (c.key(), "Hi")]
    );
    assert!(matches!(premise, Expr::And(ref exprs) if exprs.len() == 3));
}
