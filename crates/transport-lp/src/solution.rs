/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Optimal values for each variable (empty unless optimal)
    pub values: Vec<f64>,
    /// Optimal objective value
    pub objective_value: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The iteration limit was reached before optimality was proven
    NotSolved,
}

impl SolutionStatus {
    /// Integer status code: 1 optimal, 0 not solved, -1 infeasible, -2 unbounded
    pub fn code(self) -> i32 {
        match self {
            SolutionStatus::Optimal => 1,
            SolutionStatus::NotSolved => 0,
            SolutionStatus::Infeasible => -1,
            SolutionStatus::Unbounded => -2,
        }
    }

    pub fn is_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
            SolutionStatus::NotSolved => "not solved",
        };
        f.write_str(label)
    }
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolutionStatus::Infeasible,
            values: Vec::new(),
            objective_value: f64::INFINITY,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            status: SolutionStatus::Unbounded,
            values: Vec::new(),
            objective_value: f64::NEG_INFINITY,
        }
    }

    pub fn not_solved() -> Self {
        Self {
            status: SolutionStatus::NotSolved,
            values: Vec::new(),
            objective_value: f64::NAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(SolutionStatus::Optimal.code(), 1);
        assert_eq!(SolutionStatus::NotSolved.code(), 0);
        assert_eq!(SolutionStatus::Infeasible.code(), -1);
        assert_eq!(SolutionStatus::Unbounded.code(), -2);
    }

    #[test]
    fn test_constructors() {
        assert!(Solution::optimal(vec![1.0], 2.0).status.is_optimal());
        assert_eq!(Solution::infeasible().status, SolutionStatus::Infeasible);
        assert!(Solution::unbounded().values.is_empty());
        assert_eq!(Solution::not_solved().status.to_string(), "not solved");
    }
}
