/// Quantity shipped along one route
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RouteShipment {
    /// Decision variable name, e.g. `X12`
    pub route: String,
    pub source: String,
    pub destination: String,
    pub unit_cost: f64,
    pub quantity: f64,
}

impl RouteShipment {
    pub fn cost(&self) -> f64 {
        self.unit_cost * self.quantity
    }
}

/// Minimum-cost shipping plan, one entry per route in source-major order
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolutionPlan {
    pub shipments: Vec<RouteShipment>,
    pub total_cost: f64,
}

impl SolutionPlan {
    /// Quantity on the route with the given variable name
    pub fn quantity(&self, route: &str) -> Option<f64> {
        self.shipments.iter().find(|s| s.route == route).map(|s| s.quantity)
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.shipments.iter().map(|s| s.quantity).collect()
    }

    /// Total leaving the named source
    pub fn shipped_from(&self, source: &str) -> f64 {
        self.shipments.iter().filter(|s| s.source == source).map(|s| s.quantity).sum()
    }

    /// Total arriving at the named destination
    pub fn received_by(&self, destination: &str) -> f64 {
        self.shipments
            .iter()
            .filter(|s| s.destination == destination)
            .map(|s| s.quantity)
            .sum()
    }

    /// Weighted sum of quantities and unit costs
    pub fn recomputed_cost(&self) -> f64 {
        self.shipments.iter().map(RouteShipment::cost).sum()
    }
}
