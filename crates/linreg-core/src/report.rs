//! Console rendering of fitted models.
//!
//! The summary table follows the familiar "OLS Regression Results" layout: a
//! model block, a coefficient table and a residual diagnostics block, 78
//! columns wide.

use crate::sample::NoiseParams;
use crate::stats::{BreuschPagan, LinReg, SummaryReport};

use serde::Serialize;
use std::fmt;

const WIDTH: usize = 78;

/// Everything a run reports, borrowed from the pipeline output.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub noise: &'a NoiseParams,
    pub model: &'a LinReg,
    pub summary: &'a SummaryReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heteroscedasticity: Option<&'a BreuschPagan>,
}

// Small magnitudes switch to scientific notation so p-values stay readable.
fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "nan".to_owned()
    } else if v.is_infinite() {
        let s = if v > 0.0 { "inf" } else { "-inf" };
        s.to_owned()
    } else if v != 0.0 && v.abs() < 1e-3 {
        format!("{v:.3e}")
    } else if v.abs() >= 1e5 {
        format!("{v:.4e}")
    } else {
        format!("{v:.3}")
    }
}

fn row(f: &mut fmt::Formatter, left: (&str, String), right: (&str, String)) -> fmt::Result {
    writeln!(f, "{:<20}{:>16}   {:<24}{:>15}", left.0, left.1, right.0, right.1)
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let heavy = "=".repeat(WIDTH);
        let light = "-".repeat(WIDTH);

        writeln!(f, "{:^WIDTH$}", "OLS Regression Results")?;
        writeln!(f, "{heavy}")?;
        row(f, ("Dep. Variable:", "y".into()), ("R-squared:", fmt_stat(self.r_squared)))?;
        row(f, ("Model:", "OLS".into()), ("Adj. R-squared:", fmt_stat(self.adj_r_squared)))?;
        row(
            f,
            ("Method:", "Least Squares".into()),
            ("F-statistic:", fmt_stat(self.f_statistic)),
        )?;
        row(
            f,
            ("No. Observations:", self.nobs.to_string()),
            ("Prob (F-statistic):", fmt_stat(self.f_p_value)),
        )?;
        row(
            f,
            ("Df Residuals:", format!("{}", self.df_resid)),
            ("Log-Likelihood:", fmt_stat(self.log_likelihood)),
        )?;
        row(f, ("Df Model:", format!("{}", self.df_model)), ("AIC:", fmt_stat(self.aic)))?;
        row(f, ("Covariance Type:", "nonrobust".into()), ("BIC:", fmt_stat(self.bic)))?;
        writeln!(f, "{heavy}")?;

        writeln!(
            f,
            "{:<10}{:>11}{:>11}{:>11}{:>11}{:>12}{:>12}",
            "", "coef", "std err", "t", "P>|t|", "[0.025", "0.975]"
        )?;
        writeln!(f, "{light}")?;
        for c in &self.coefficients {
            writeln!(
                f,
                "{:<10}{:>11.4}{:>11.3}{:>11.3}{:>11.3}{:>12.3}{:>12.3}",
                c.name, c.estimate, c.std_err, c.t_value, c.p_value, c.conf_low, c.conf_high
            )?;
        }
        writeln!(f, "{heavy}")?;

        let (omni, omni_p) = match &self.omnibus {
            Some(t) => (fmt_stat(t.statistic), fmt_stat(t.p_value)),
            None => ("nan".to_owned(), "nan".to_owned()),
        };
        row(f, ("Omnibus:", omni), ("Durbin-Watson:", fmt_stat(self.durbin_watson)))?;
        row(
            f,
            ("Prob(Omnibus):", omni_p),
            ("Jarque-Bera (JB):", fmt_stat(self.jarque_bera.statistic)),
        )?;
        row(f, ("Skew:", fmt_stat(self.skew)), ("Prob(JB):", fmt_stat(self.jarque_bera.p_value)))?;
        row(
            f,
            ("Kurtosis:", fmt_stat(self.kurtosis)),
            ("Cond. No.", fmt_stat(self.condition_number)),
        )?;
        write!(f, "{heavy}")
    }
}

impl fmt::Display for BreuschPagan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Breusch-Pagan test")?;
        writeln!(f, "{:<24}{:>12}", "LM statistic:", fmt_stat(self.lm.statistic))?;
        writeln!(f, "{:<24}{:>12}", "LM p-value:", fmt_stat(self.lm.p_value))?;
        writeln!(f, "{:<24}{:>12}", "F statistic:", fmt_stat(self.f.statistic))?;
        write!(f, "{:<24}{:>12}", "F p-value:", fmt_stat(self.f.p_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summarize;

    #[test]
    fn test_fmt_stat() {
        assert_eq!(fmt_stat(0.5), "0.500");
        assert_eq!(fmt_stat(0.0), "0.000");
        assert_eq!(fmt_stat(f64::NAN), "nan");
        assert_eq!(fmt_stat(f64::INFINITY), "inf");
        assert_eq!(fmt_stat(0.00012), "1.200e-4");
    }

    #[test]
    fn test_summary_table_layout() {
        let x = [1., 2., 3., 4., 5., 6., 7., 8., 9.];
        let y = [1.2, 1.9, 3.3, 3.8, 5.1, 6.2, 6.8, 8.1, 9.0];
        let text = summarize(&x, &y).unwrap().to_string();

        assert!(text.contains("OLS Regression Results"));
        assert!(text.contains("No. Observations:"));
        assert!(text.contains("const"));
        assert!(text.contains("x1"));
        assert!(text.contains("Durbin-Watson:"));
        for line in text.lines() {
            assert!(line.chars().count() <= WIDTH, "line too wide: {line:?}");
        }
        let const_row = text.lines().position(|l| l.starts_with("const")).unwrap();
        assert!(text.lines().nth(const_row + 1).unwrap().starts_with("x1"));
    }
}
