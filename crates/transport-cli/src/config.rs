use std::path::Path;

use anyhow::Context;
use clap::Args;
use transport_core::ProblemInstance;

/// The eight form fields. Unset flags fall back to the config file, then to
/// the reference instance.
#[derive(Args, Debug, Default, Clone)]
pub struct InstanceArgs {
    /// Unit cost Factory 1 -> City 2 [default: 4.0]
    #[arg(long = "cost-12", value_parser = parse_amount)]
    pub cost_12: Option<f64>,
    /// Unit cost Factory 1 -> City 3 [default: 6.0]
    #[arg(long = "cost-13", value_parser = parse_amount)]
    pub cost_13: Option<f64>,
    /// Unit cost Factory 2 -> City 2 [default: 8.0]
    #[arg(long = "cost-22", value_parser = parse_amount)]
    pub cost_22: Option<f64>,
    /// Unit cost Factory 2 -> City 3 [default: 3.0]
    #[arg(long = "cost-23", value_parser = parse_amount)]
    pub cost_23: Option<f64>,
    /// Units available at Factory 1 [default: 100]
    #[arg(long = "supply-1", value_parser = parse_amount)]
    pub supply_1: Option<f64>,
    /// Units available at Factory 2 [default: 150]
    #[arg(long = "supply-2", value_parser = parse_amount)]
    pub supply_2: Option<f64>,
    /// Units required by City 2 [default: 80]
    #[arg(long = "demand-2", value_parser = parse_amount)]
    pub demand_2: Option<f64>,
    /// Units required by City 3 [default: 120]
    #[arg(long = "demand-3", value_parser = parse_amount)]
    pub demand_3: Option<f64>,
}

/// Accept what the input form accepts: a finite number, zero or above
pub fn parse_amount(text: &str) -> Result<f64, String> {
    let value: f64 = text.trim().parse().map_err(|e| format!("{}", e))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("expected a finite number >= 0, got {}", text))
    }
}

impl InstanceArgs {
    /// Override `base` with every flag that was given
    pub fn apply(&self, base: ProblemInstance) -> ProblemInstance {
        let pick = |flag: Option<f64>, value: f64| flag.unwrap_or(value);
        let [c12, c13, c22, c23] = base.costs;
        ProblemInstance::new(
            [
                pick(self.cost_12, c12),
                pick(self.cost_13, c13),
                pick(self.cost_22, c22),
                pick(self.cost_23, c23),
            ],
            [pick(self.supply_1, base.supplies[0]), pick(self.supply_2, base.supplies[1])],
            [pick(self.demand_2, base.demands[0]), pick(self.demand_3, base.demands[1])],
        )
    }
}

/// Read an instance from TOML. Missing keys take the reference values.
pub fn load_instance(path: &Path) -> anyhow::Result<ProblemInstance> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Error reading {}", path.display()))?;
    let instance: ProblemInstance =
        toml::from_str(&text).with_context(|| format!("Invalid instance file {}", path.display()))?;
    if let Some((field, value)) = instance.first_invalid_field() {
        anyhow::bail!(
            "Invalid instance file {}: {} must be a finite number >= 0, got {}",
            path.display(),
            field,
            value
        );
    }
    tracing::debug!(path = %path.display(), ?instance, "loaded instance file");
    Ok(instance)
}

/// Resolve the instance to solve from an optional file plus flag overrides
pub fn resolve_instance(config: Option<&Path>, args: &InstanceArgs) -> anyhow::Result<ProblemInstance> {
    let base = match config {
        Some(path) => load_instance(path)?,
        None => ProblemInstance::default(),
    };
    Ok(args.apply(base))
}

pub fn default_instance_toml() -> anyhow::Result<String> {
    toml::to_string_pretty(&ProblemInstance::default()).context("Failed to serialize the reference instance")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_defaults() {
        let args = InstanceArgs {
            cost_23: Some(9.5),
            supply_1: Some(40.0),
            demand_3: Some(10.0),
            ..Default::default()
        };
        let instance = args.apply(ProblemInstance::default());

        assert_eq!(instance.costs, [4.0, 6.0, 8.0, 9.5]);
        assert_eq!(instance.supplies, [40.0, 150.0]);
        assert_eq!(instance.demands, [80.0, 10.0]);
    }

    #[test]
    fn test_partial_file_fills_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "supplies = [10.0, 20.0]").unwrap();

        let instance = load_instance(file.path()).unwrap();

        assert_eq!(instance.supplies, [10.0, 20.0]);
        assert_eq!(instance.costs, ProblemInstance::default().costs);
        assert_eq!(instance.demands, ProblemInstance::default().demands);
    }

    #[test]
    fn test_file_then_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "costs = [1.0, 2.0, 3.0, 4.0]").unwrap();
        writeln!(file, "demands = [5.0, 6.0]").unwrap();
        let args = InstanceArgs {
            demand_2: Some(7.0),
            ..Default::default()
        };

        let instance = resolve_instance(Some(file.path()), &args).unwrap();

        assert_eq!(instance.costs, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(instance.demands, [7.0, 6.0]);
    }

    #[test]
    fn test_bad_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "costs = \"cheap\"").unwrap();

        let err = load_instance(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid instance file"));

        let missing = load_instance(Path::new("/nonexistent/instance.toml")).unwrap_err();
        assert!(missing.to_string().contains("Error reading"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("4.5"), Ok(4.5));
        assert_eq!(parse_amount("0"), Ok(0.0));
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("-5").is_err());
        assert!(parse_amount("cheap").is_err());
    }

    #[test]
    fn test_negative_demand_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "demands = [80.0, -1.0]").unwrap();

        let err = load_instance(file.path()).unwrap_err();
        assert!(err.to_string().contains("demand_3"), "{}", err);
    }

    #[test]
    fn test_nan_cost_in_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "costs = [nan, 6.0, 8.0, 3.0]").unwrap();

        let err = load_instance(file.path()).unwrap_err();
        assert!(err.to_string().contains("cost_12"), "{}", err);
    }

    #[test]
    fn test_default_toml_round_trips() {
        let text = default_instance_toml().unwrap();
        let parsed: ProblemInstance = toml::from_str(&text).unwrap();
        assert_eq!(parsed, ProblemInstance::default());
    }
}
