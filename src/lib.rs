//! Tsukamoto fuzzy inference.
//!
//! Every variable is split into at least three evenly spaced linear domains.
//! Rules map one domain per input variable to a domain of the output
//! variable, and the rule table must cover every combination exactly once.
//! Evaluation fires each combination with the minimum of its membership
//! degrees, turns it into a crisp value through the output domain and
//! averages those values weighted by their firing strength.
//!
//! ```
//! use tsukamoto_fis::{Inputs, RuleTable, Rules, TsukamotoInference, Variables};
//!
//! # fn main() -> tsukamoto_fis::Result<()> {
//! let mut vars = Variables::new();
//! let km = vars.add_input("Kilometer", 6000. ..=82000., ["Dekat", "Sedang", "Jauh"])?;
//! let tahun = vars.add_input("Tahun", 1. ..=8., ["Baru", "Sedang", "Lama"])?;
//! let harga = vars.set_output("Harga", 6_250_000. ..=14_500_000., ["Murah", "Sedang", "Mahal"])?;
//! let mut rules = Rules::new();
//!
//! for (k, t, h) in [
//!     ("Jauh", "Baru", "Murah"),
//!     ("Jauh", "Sedang", "Murah"),
//!     ("Jauh", "Lama", "Murah"),
//!     ("Sedang", "Baru", "Sedang"),
//!     ("Sedang", "Sedang", "Sedang"),
//!     ("Sedang", "Lama", "Murah"),
//!     ("Dekat", "Baru", "Mahal"),
//!     ("Dekat", "Sedang", "Sedang"),
//! ] {
//!     rules.add(km.is(k).and(tahun.is(t)), harga.is(h));
//! }
//! rules.add_parsed(&vars, "Kilometer_Dekat {{And}} Tahun_Lama == Harga_Murah")?;
//!
//! let table = RuleTable::build(&vars, &rules)?;
//! let mut inputs = Inputs::new();
//!
//! inputs.add(km, 10000.);
//! inputs.add(tahun, 8.);
//!
//! let outputs = TsukamotoInference::new().eval(&vars, &table, &inputs)?;
//!
//! assert!((outputs.value() - 7_027_008.31).abs() < 0.01);
//! # Ok(())
//! # }
//! ```

mod combinator;
mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod outputs;
mod parse;
mod rules;
mod variable;

pub use combinator::{cartesian_product, Combinations};
pub use config::{FisConfig, RuleConfig, System, VariableConfig, MODE_LINEAR};
pub use dsl::{Consequence, Expr};
pub use error::{FisError, Result};
pub use inference::TsukamotoInference;
pub use inputs::Inputs;
pub use membership::membership;
pub use outputs::Outputs;
pub use parse::parse_rule;
pub use rules::{RuleTable, Rules};
pub use variable::{Input, LinguisticVariable, Output, Variable, VariableKey, Variables};
