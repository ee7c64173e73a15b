//! Textual rule form.
//!
//! ```text
//! Kilometer_Jauh {{And}} Tahun_Baru == Harga_Murah
//! ```
//!
//! Each proposition is `<Variable>_<Domain>`. Variable names are matched
//! exactly against the declared variables; the longest declared name that
//! prefixes the token wins, so names containing `_` still resolve.

use crate::dsl::{Consequence, Expr};
use crate::error::{FisError, Result};
use crate::rules::Rules;
use crate::variable::Variables;

const AND: &str = "{{And}}";
const THEN: &str = "==";

pub fn parse_rule(vars: &Variables, line: &str) -> Result<(Expr, Consequence)> {
    let syntax = |reason: &str| FisError::RuleSyntax {
        line: line.trim().to_owned(),
        reason: reason.to_owned(),
    };
    let (premise, consequence) = line.split_once(THEN).ok_or_else(|| syntax("missing '=='"))?;

    if consequence.contains(THEN) {
        return Err(syntax("more than one '=='"));
    }

    let mut expr: Option<Expr> = None;

    for token in premise.split(AND) {
        let (name, domain) = split_token(vars, token.trim()).map_err(|reason| syntax(&reason))?;
        let var = vars
            .input(name)
            .ok_or_else(|| syntax(&format!("'{name}' is not an input variable")))?;

        expr = Some(match expr {
            None => var.is(domain),
            Some(lhs) => lhs.and(var.is(domain)),
        });
    }

    let (name, domain) = split_token(vars, consequence.trim()).map_err(|reason| syntax(&reason))?;
    let output = vars
        .output()
        .filter(|&output| vars.get(output).is_some_and(|v| v.name() == name))
        .ok_or_else(|| syntax(&format!("'{name}' is not the output variable")))?;

    // `split` always yields at least one token
    let premise = expr.ok_or_else(|| syntax("empty premise"))?;

    Ok((premise, output.is(domain)))
}

fn split_token<'t>(vars: &Variables, token: &'t str) -> std::result::Result<(&'t str, &'t str), String> {
    if token.is_empty() {
        return Err("empty proposition".to_owned());
    }

    vars.vars
        .values()
        .map(|v| v.name())
        .filter(|name| {
            token.len() > name.len() + 1 && token.starts_with(name) && token.as_bytes()[name.len()] == b'_'
        })
        .max_by_key(|name| name.len())
        .map(|name| (&token[..name.len()], &token[name.len() + 1..]))
        .ok_or_else(|| format!("'{token}' does not name a declared variable and domain"))
}

impl Rules {
    /// Parses and adds one rule in textual form.
    pub fn add_parsed(&mut self, vars: &Variables, line: &str) -> Result<()> {
        let (premise, consequence) = parse_rule(vars, line)?;

        self.add(premise, consequence);

        Ok(())
    }
}
