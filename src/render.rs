//! Text output for production chains
//!
//! One line per step: `target (rate unit): body`, where the body lists the
//! consumed items, names the facilities for raw resources, or reads
//! `<unknown>` for an unresolved step.

use std::fmt;

use crate::catalog::Catalog;
use crate::chain::ProductionChain;
use crate::models::ProductionStep;

/// How a step's rate is shown. Returning `None` falls back to items/s.
pub trait RateUnits {
    fn convert(&self, item: &str, rate: f64) -> Option<(f64, &'static str)>;
}

impl<F> RateUnits for F
where
    F: Fn(&str, f64) -> Option<(f64, &'static str)>,
{
    fn convert(&self, item: &str, rate: f64) -> Option<(f64, &'static str)> {
        self(item, rate)
    }
}

pub struct ItemsPerSecond;

impl RateUnits for ItemsPerSecond {
    fn convert(&self, _item: &str, rate: f64) -> Option<(f64, &'static str)> {
        Some((rate, "/s"))
    }
}

/// Shows rates as the number of facilities needed to sustain them.
pub struct Factories<'c> {
    catalog: &'c Catalog,
}

impl<'c> Factories<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }
}

impl RateUnits for Factories<'_> {
    fn convert(&self, item: &str, rate: f64) -> Option<(f64, &'static str)> {
        self.catalog
            .items_per_second_to_factories(item, rate)
            .ok()
            .map(|factories| (factories, " factories"))
    }
}

/// Three decimals with trailing zeros (and a bare dot) removed.
pub fn format_rate(rate: f64) -> String {
    let fixed = format!("{rate:.3}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn render_step(step: &ProductionStep<'_>, units: &dyn RateUnits) -> String {
    let mut line = step.target.clone();

    if step.rate > 0.0 {
        let (value, suffix) = units
            .convert(&step.target, step.rate)
            .unwrap_or((step.rate, "/s"));
        line.push_str(&format!(" ({}{})", format_rate(value), suffix));
    }
    line.push_str(": ");

    match step.process {
        None => line.push_str("<unknown>"),
        Some(process) if process.is_extraction() => {
            line.push_str(&format!("<produced by {}>", process.facility.join(" or ")));
        }
        Some(process) => {
            line.push_str(&process.inputs().collect::<Vec<_>>().join(", "));
        }
    }

    line
}

impl ProductionChain<'_> {
    pub fn render_with(&self, units: &dyn RateUnits) -> String {
        let mut output = String::new();
        for step in self.steps() {
            output.push_str(&render_step(step, units));
            output.push('\n');
        }
        output
    }
}

impl fmt::Display for ProductionStep<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_step(self, &ItemsPerSecond))
    }
}

impl fmt::Display for ProductionChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&ItemsPerSecond))
    }
}
