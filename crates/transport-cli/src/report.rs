use std::fmt::Write;

use serde::Serialize;
use transport_core::{SolutionPlan, TransportError};

const BAR_WIDTH: usize = 30;

/// Total cost, then one row per route with its quantity and a bar scaled to the largest shipment
pub fn render_plan(plan: &SolutionPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: OPTIMAL");
    let _ = writeln!(out, "Total cost: {:.2}", plan.total_cost);
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<24} {:>10} {:>10}", "Route", "Unit cost", "Quantity");

    let largest = plan.shipments.iter().map(|s| s.quantity).fold(0.0_f64, f64::max);
    for s in &plan.shipments {
        let label = format!("{} -> {}", s.source, s.destination);
        let bar = if largest > 0.0 {
            "#".repeat(((s.quantity / largest) * BAR_WIDTH as f64).round() as usize)
        } else {
            String::new()
        };
        let _ = writeln!(out, "  {:<24} {:>10.2} {:>10.1}  {}", label, s.unit_cost, s.quantity, bar);
    }
    out
}

pub fn render_failure(err: &TransportError) -> String {
    match err {
        TransportError::Infeasible { status } => format!(
            "Status: {}\nNo feasible plan found. Check that supply covers demand.\n",
            status.to_string().to_uppercase()
        ),
        other => format!("Error: {}\n", other),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: String,
    status_code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a SolutionPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

pub fn render_json(result: &Result<SolutionPlan, TransportError>) -> anyhow::Result<String> {
    let report = match result {
        Ok(plan) => JsonReport {
            status: "optimal".to_string(),
            status_code: 1,
            plan: Some(plan),
            message: None,
        },
        Err(err) => JsonReport {
            status: match err {
                TransportError::Infeasible { status } => status.to_string(),
                TransportError::Shape(_) => "error".to_string(),
            },
            status_code: err.status_code().unwrap_or(-3),
            plan: None,
            message: Some(err.to_string()),
        },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use transport_core::{ProblemInstance, SolutionStatus, TransportSolver};

    #[test]
    fn test_render_reference_plan() {
        let plan = TransportSolver::new().solve_instance(&ProblemInstance::default()).unwrap();
        let text = render_plan(&plan);

        assert!(text.contains("Total cost: 680.00"), "{}", text);
        assert!(text.contains("Factory 1 -> City 2"));
        assert!(text.contains("120.0"));
        assert!(text.contains(&"#".repeat(BAR_WIDTH)));
        assert_eq!(text.lines().count(), 8);
    }

    #[test]
    fn test_render_infeasible() {
        let err = TransportError::Infeasible {
            status: SolutionStatus::Infeasible,
        };
        assert!(render_failure(&err).starts_with("Status: INFEASIBLE"));
    }

    #[test]
    fn test_json_report() {
        let plan = TransportSolver::new().solve_instance(&ProblemInstance::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&Ok(plan)).unwrap()).unwrap();
        assert_eq!(value["status_code"], 1);
        assert_eq!(value["plan"]["shipments"][3]["route"], "X23");

        let err = TransportError::Infeasible {
            status: SolutionStatus::Infeasible,
        };
        let value: serde_json::Value = serde_json::from_str(&render_json(&Err(err)).unwrap()).unwrap();
        assert_eq!(value["status"], "infeasible");
        assert_eq!(value["status_code"], -1);
        assert!(value.get("plan").is_none());
    }
}
