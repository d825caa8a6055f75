use crate::solver::TransportError;

/// A factory or city taking part in a transportation problem.
///
/// For a source `amount` is the supply capacity, for a destination it is the
/// demand requirement.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Display name, e.g. "Factory 1"
    pub name: String,
    /// Short code used in variable names, e.g. "1"
    pub code: String,
    pub amount: f64,
}

impl Node {
    pub fn new(name: impl Into<String>, code: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            amount,
        }
    }
}

/// A directed path from one source to one destination, by index.
///
/// Only [`TransportProblem::routes`] and [`TransportProblem::route`] hand these
/// out, so the indices are always in range for the problem that made them.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    source: usize,
    destination: usize,
}

impl Route {
    pub fn source(&self) -> usize {
        self.source
    }

    pub fn destination(&self) -> usize {
        self.destination
    }
}

/// The two-factory, two-city instance collected by the input form.
///
/// Costs are ordered Factory1→City2, Factory1→City3, Factory2→City2,
/// Factory2→City3; supplies are Factory1, Factory2; demands are City2, City3.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemInstance {
    pub costs: [f64; 4],
    pub supplies: [f64; 2],
    pub demands: [f64; 2],
}

const FIELD_NAMES: [&str; 8] = [
    "cost_12", "cost_13", "cost_22", "cost_23", "supply_1", "supply_2", "demand_2", "demand_3",
];

impl ProblemInstance {
    pub fn new(costs: [f64; 4], supplies: [f64; 2], demands: [f64; 2]) -> Self {
        Self { costs, supplies, demands }
    }

    /// First field the input form would refuse (negative, NaN or infinite), with its value
    pub fn first_invalid_field(&self) -> Option<(&'static str, f64)> {
        self.costs
            .iter()
            .chain(&self.supplies)
            .chain(&self.demands)
            .zip(FIELD_NAMES)
            .find(|(value, _)| !(value.is_finite() && **value >= 0.0))
            .map(|(value, name)| (name, *value))
    }
}

impl Default for ProblemInstance {
    /// The reference instance pre-filled in the input form
    fn default() -> Self {
        Self {
            costs: [4.0, 6.0, 8.0, 3.0],
            supplies: [100.0, 150.0],
            demands: [80.0, 120.0],
        }
    }
}

/// A bipartite transportation problem of any size.
///
/// `costs[i][j]` is the unit cost from `sources[i]` to `destinations[j]`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TransportProblem {
    sources: Vec<Node>,
    destinations: Vec<Node>,
    costs: Vec<Vec<f64>>,
}

impl TransportProblem {
    pub fn new(sources: Vec<Node>, destinations: Vec<Node>, costs: Vec<Vec<f64>>) -> Result<Self, TransportError> {
        if sources.is_empty() || destinations.is_empty() {
            return Err(TransportError::Shape(
                "at least one source and one destination are required".to_string(),
            ));
        }
        if costs.len() != sources.len() {
            return Err(TransportError::Shape(format!(
                "cost matrix has {} rows but there are {} sources",
                costs.len(),
                sources.len()
            )));
        }
        if let Some((i, row)) = costs.iter().enumerate().find(|(_, row)| row.len() != destinations.len()) {
            return Err(TransportError::Shape(format!(
                "cost row for {} has {} entries but there are {} destinations",
                sources[i].name,
                row.len(),
                destinations.len()
            )));
        }
        Ok(Self {
            sources,
            destinations,
            costs,
        })
    }

    pub fn sources(&self) -> &[Node] {
        &self.sources
    }

    pub fn destinations(&self) -> &[Node] {
        &self.destinations
    }

    /// The route from source `source` to destination `destination`, if both exist
    pub fn route(&self, source: usize, destination: usize) -> Option<Route> {
        (source < self.sources.len() && destination < self.destinations.len())
            .then_some(Route { source, destination })
    }

    pub fn cost(&self, route: Route) -> f64 {
        self.costs[route.source][route.destination]
    }

    pub fn num_routes(&self) -> usize {
        self.sources.len() * self.destinations.len()
    }

    /// All routes, source-major
    pub fn routes(&self) -> impl Iterator<Item = Route> + '_ {
        (0..self.sources.len()).flat_map(move |source| {
            (0..self.destinations.len()).map(move |destination| Route { source, destination })
        })
    }

    /// Position of a route's decision variable in the LP
    pub fn route_index(&self, route: Route) -> usize {
        route.source * self.destinations.len() + route.destination
    }

    /// Decision variable name, e.g. `X12` for Factory 1 → City 2
    pub fn route_name(&self, route: Route) -> String {
        format!(
            "X{}{}",
            self.sources[route.source].code, self.destinations[route.destination].code
        )
    }

    pub fn total_supply(&self) -> f64 {
        self.sources.iter().map(|n| n.amount).sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.destinations.iter().map(|n| n.amount).sum()
    }
}

impl From<&ProblemInstance> for TransportProblem {
    fn from(instance: &ProblemInstance) -> Self {
        let [c12, c13, c22, c23] = instance.costs;
        Self {
            sources: vec![
                Node::new("Factory 1", "1", instance.supplies[0]),
                Node::new("Factory 2", "2", instance.supplies[1]),
            ],
            destinations: vec![
                Node::new("City 2", "2", instance.demands[0]),
                Node::new("City 3", "3", instance.demands[1]),
            ],
            costs: vec![vec![c12, c13], vec![c22, c23]],
        }
    }
}
