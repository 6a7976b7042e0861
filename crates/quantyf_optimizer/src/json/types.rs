use fxhash::FxHashMap;
use jiff::SignedDuration;
use quantyf_matrix::{
    travel_matrices::{LegMetrics, TravelMatrices},
    travel_matrix_provider::TravelMatrixProvider,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{instrument, warn};

use crate::{
    error::{InvalidInputError, ProblemError},
    problem::{
        demand::{DemandBuilder, Priority},
        hub::HubBuilder,
        node::{Node, NodeIdx},
        transport_problem::{RecordKind, RejectedRecord, TransportProblem, TransportProblemBuilder},
        vehicle::{VehicleCatalog, VehicleSpec, VehicleType},
    },
    report::kpi::NetworkKpi,
    routing::route::Route,
    solver::{
        optimizer_params::OptimizerParams,
        solution::{
            BudgetStatus, ServedDemand, Solution, SolutionWarning, UnservedDemand, UnservedReason,
        },
        termination::Termination,
    },
};

pub trait FromProblem<T> {
    fn from_problem(value: T, problem: &TransportProblem) -> Self;
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename = "TransportProblem")]
pub struct JsonTransportProblem {
    pub nodes: Vec<JsonNode>,
    #[serde(default)]
    #[schemars(with = "Vec<JsonHub>")]
    pub hubs: Vec<JsonRecord<JsonHub>>,
    #[schemars(with = "Vec<JsonDemand>")]
    pub demands: Vec<JsonRecord<JsonDemand>>,
    #[schemars(with = "Vec<JsonVehicle>")]
    pub vehicles: Vec<JsonRecord<JsonVehicle>>,
    #[serde(default)]
    #[schemars(with = "Vec<JsonLeg>")]
    pub legs: Vec<JsonRecord<JsonLeg>>,
    /// Fills the legs between located nodes. Explicit legs take precedence.
    pub matrix_provider: Option<TravelMatrixProvider>,
    pub params: Option<JsonOptimizerParams>,
}

/// One input record. A record that does not match its schema is kept as raw JSON so that it
/// is rejected on its own instead of failing the whole document.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum JsonRecord<T> {
    Valid(T),
    Malformed(serde_json::Value),
}

impl<T: DeserializeOwned> JsonRecord<T> {
    fn parse(&self) -> Result<&T, InvalidInputError> {
        match self {
            JsonRecord::Valid(record) => Ok(record),
            JsonRecord::Malformed(value) => Err(InvalidInputError::MalformedRecord(
                serde_json::from_value::<T>(value.clone())
                    .err()
                    .map_or_else(|| String::from("unexpected record"), |error| error.to_string()),
            )),
        }
    }

    /// `field` of a malformed record when it is a string, for reporting.
    fn raw_field(&self, field: &str) -> Option<&str> {
        match self {
            JsonRecord::Valid(_) => None,
            JsonRecord::Malformed(value) => value.get(field).and_then(serde_json::Value::as_str),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Node")]
pub struct JsonNode {
    pub id: String,
    /// `[longitude, latitude]`
    pub coordinates: Option<[f64; 2]>,
}

#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Hub")]
pub struct JsonHub {
    /// Id of the node the hub is located at. Required.
    pub id: Option<String>,
    /// Required.
    pub throughput_capacity: Option<i64>,
    pub per_pallet_handling: Option<f64>,
    pub per_touch_fixed_cost: Option<f64>,
    pub dwell_hours: Option<f64>,
}

/// Every field but `priority` and `time_window_hours` is required, a demand missing one is
/// rejected.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Demand")]
pub struct JsonDemand {
    pub id: Option<String>,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub pallets: Option<i64>,
    pub priority: Option<Priority>,
    pub time_window_hours: Option<f64>,
}

/// All fields are required.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct JsonVehicle {
    #[serde(rename = "type")]
    pub vehicle_type: Option<VehicleType>,
    pub capacity: Option<i64>,
    pub cost_per_km: Option<f64>,
    pub fixed_cost: Option<f64>,
}

/// All fields but `symmetric` are required.
#[derive(Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Leg")]
pub struct JsonLeg {
    pub from: Option<String>,
    pub to: Option<String>,
    pub distance_km: Option<f64>,
    pub time_hours: Option<f64>,
    /// Also sets the reverse leg.
    pub symmetric: Option<bool>,
}

#[derive(Serialize, Deserialize, JsonSchema, Default, Clone)]
#[serde(deny_unknown_fields, rename = "OptimizerParams")]
pub struct JsonOptimizerParams {
    pub max_hops: Option<usize>,
    pub max_vehicles_per_leg: Option<u32>,
    pub max_travel_time_hours: Option<f64>,
    pub max_distance_km: Option<f64>,
    pub max_detour_ratio: Option<f64>,
    pub budget_ceiling: Option<f64>,
    pub timeout: Option<SignedDuration>,
}

impl JsonOptimizerParams {
    /// Overrides the values of `params` that are set here.
    pub fn apply(&self, params: &mut OptimizerParams) {
        if let Some(max_hops) = self.max_hops {
            params.max_hops = max_hops;
        }

        if self.max_vehicles_per_leg.is_some() {
            params.max_vehicles_per_leg = self.max_vehicles_per_leg;
        }

        if self.max_travel_time_hours.is_some() {
            params.max_travel_time_hours = self.max_travel_time_hours;
        }

        if self.max_distance_km.is_some() {
            params.max_distance_km = self.max_distance_km;
        }

        if self.max_detour_ratio.is_some() {
            params.max_detour_ratio = self.max_detour_ratio;
        }

        if self.budget_ceiling.is_some() {
            params.budget_ceiling = self.budget_ceiling;
        }

        if let Some(timeout) = self.timeout {
            params.terminations.push(Termination::Duration(timeout));
        }
    }
}

fn reject(
    builder: &mut TransportProblemBuilder,
    kind: RecordKind,
    id: &str,
    error: InvalidInputError,
) {
    warn!("Skipping {:?} '{}': {}", kind, id, error);
    builder.add_rejected_record(RejectedRecord::new(kind, id, error));
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, InvalidInputError> {
    value.ok_or(InvalidInputError::MissingField(field))
}

/// `section[index]`, for records without a usable id.
fn positional_id(section: &str, index: usize) -> String {
    format!("{section}[{index}]")
}

impl JsonTransportProblem {
    pub fn optimizer_params(&self) -> OptimizerParams {
        let mut params = OptimizerParams::default();
        if let Some(json_params) = &self.params {
            json_params.apply(&mut params);
        }
        params
    }

    /// Builds the problem. Malformed records are skipped and reported in
    /// [`TransportProblem::rejected_records`].
    #[instrument(skip_all, level = "debug")]
    pub fn build_problem(self) -> Result<TransportProblem, ProblemError> {
        let mut builder = TransportProblemBuilder::default();

        let nodes: Vec<Node> = self
            .nodes
            .iter()
            .map(|node| match node.coordinates {
                Some([lon, lat]) => Node::from_lat_lon(node.id.clone(), lat, lon),
                None => Node::new(node.id.clone()),
            })
            .collect();

        let mut node_ids: FxHashMap<&str, NodeIdx> = FxHashMap::default();
        for (index, node) in self.nodes.iter().enumerate() {
            node_ids.entry(node.id.as_str()).or_insert(NodeIdx::new(index));
        }
        let resolve = |id: &str| {
            node_ids
                .get(id)
                .copied()
                .ok_or_else(|| InvalidInputError::UnknownNode(id.to_owned()))
        };

        for (index, record) in self.hubs.iter().enumerate() {
            let id = match record {
                JsonRecord::Valid(hub) => hub.id.clone(),
                malformed => malformed.raw_field("id").map(str::to_owned),
            }
            .unwrap_or_else(|| positional_id("hubs", index));

            let result = record.parse().and_then(|hub| {
                let mut hub_builder = HubBuilder::default();
                if let Some(node) = &hub.id {
                    hub_builder.set_node_id(resolve(node)?);
                }
                if let Some(capacity) = hub.throughput_capacity {
                    hub_builder.set_throughput_capacity(InvalidInputError::check_positive_count(
                        "throughput_capacity",
                        capacity,
                    )?);
                }
                if let Some(cost) = hub.per_pallet_handling {
                    hub_builder.set_per_pallet_handling(cost);
                }
                if let Some(cost) = hub.per_touch_fixed_cost {
                    hub_builder.set_per_touch_fixed_cost(cost);
                }
                if let Some(hours) = hub.dwell_hours {
                    hub_builder.set_dwell_hours(hours);
                }
                hub_builder.build()
            });

            match result {
                Ok(built) => {
                    builder.add_hub(built);
                }
                Err(error) => reject(&mut builder, RecordKind::Hub, &id, error),
            }
        }

        for (index, record) in self.demands.iter().enumerate() {
            let id = match record {
                JsonRecord::Valid(demand) => demand.id.clone(),
                malformed => malformed.raw_field("id").map(str::to_owned),
            }
            .unwrap_or_else(|| positional_id("demands", index));

            let result = record.parse().and_then(|demand| {
                let mut demand_builder = DemandBuilder::default();
                if let Some(external_id) = &demand.id {
                    demand_builder.set_external_id(external_id.clone());
                }
                if let Some(origin) = &demand.origin {
                    demand_builder.set_origin(resolve(origin)?);
                }
                if let Some(destination) = &demand.destination {
                    demand_builder.set_destination(resolve(destination)?);
                }
                if let Some(pallets) = demand.pallets {
                    demand_builder.set_pallets(InvalidInputError::check_positive_count(
                        "pallets", pallets,
                    )?);
                }
                if let Some(priority) = demand.priority {
                    demand_builder.set_priority(priority);
                }
                if let Some(hours) = demand.time_window_hours {
                    demand_builder.set_time_window_hours(hours);
                }
                demand_builder.build()
            });

            match result {
                Ok(built) => {
                    builder.add_demand(built);
                }
                Err(error) => reject(&mut builder, RecordKind::Demand, &id, error),
            }
        }

        let mut vehicles = VehicleCatalog::new();
        for (index, record) in self.vehicles.iter().enumerate() {
            let id = match record {
                JsonRecord::Valid(vehicle) => vehicle.vehicle_type.map(|kind| kind.to_string()),
                malformed => malformed.raw_field("type").map(str::to_owned),
            }
            .unwrap_or_else(|| positional_id("vehicles", index));

            let result = record.parse().and_then(|vehicle| {
                let vehicle_type = required(vehicle.vehicle_type, "type")?;
                if vehicles.get(vehicle_type).is_some() {
                    return Err(InvalidInputError::DuplicateId(id.clone()));
                }

                let capacity = InvalidInputError::check_positive_count(
                    "capacity",
                    required(vehicle.capacity, "capacity")?,
                )?;
                let spec = VehicleSpec::new(
                    capacity,
                    required(vehicle.cost_per_km, "cost_per_km")?,
                    required(vehicle.fixed_cost, "fixed_cost")?,
                )?;
                Ok((vehicle_type, spec))
            });

            match result {
                Ok((vehicle_type, spec)) => {
                    vehicles.insert(vehicle_type, spec);
                }
                Err(error) => reject(&mut builder, RecordKind::Vehicle, &id, error),
            }
        }
        builder.set_vehicles(vehicles);

        let mut matrices = match &self.matrix_provider {
            Some(provider) => {
                let points: Vec<Option<geo::Point>> =
                    nodes.iter().map(|node| node.location().copied()).collect();
                provider.compute_matrices(&points)?
            }
            None => TravelMatrices::new(nodes.len()),
        };

        let mut explicit = TravelMatrices::new(nodes.len());
        for (index, record) in self.legs.iter().enumerate() {
            let endpoints = match record {
                JsonRecord::Valid(leg) => (leg.from.as_deref(), leg.to.as_deref()),
                malformed => (malformed.raw_field("from"), malformed.raw_field("to")),
            };
            let id = match endpoints {
                (Some(from), Some(to)) => format!("{from}->{to}"),
                _ => positional_id("legs", index),
            };

            let result = record.parse().and_then(|leg| {
                let from = resolve(required(leg.from.as_deref(), "from")?)?;
                let to = resolve(required(leg.to.as_deref(), "to")?)?;
                let metrics = LegMetrics::new(
                    InvalidInputError::check_non_negative(
                        "distance_km",
                        required(leg.distance_km, "distance_km")?,
                    )?,
                    InvalidInputError::check_non_negative(
                        "time_hours",
                        required(leg.time_hours, "time_hours")?,
                    )?,
                );
                Ok((from, to, metrics, leg.symmetric.unwrap_or(false)))
            });

            match result {
                Ok((from, to, metrics, symmetric)) => {
                    let set = if symmetric {
                        explicit.set_symmetric_leg(from.get(), to.get(), metrics)
                    } else {
                        explicit.set_leg(from.get(), to.get(), metrics)
                    };
                    set.map_err(|source| ProblemError::InvalidLeg {
                        from: self.nodes[from.get()].id.clone(),
                        to: self.nodes[to.get()].id.clone(),
                        source,
                    })?;
                }
                Err(error) => reject(&mut builder, RecordKind::Leg, &id, error),
            }
        }
        matrices.overlay(&explicit)?;

        builder.set_nodes(nodes).set_matrices(matrices);
        builder.build()
    }
}

#[derive(Serialize)]
#[serde(rename = "RouteLeg")]
pub struct JsonRouteLeg {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub time_hours: f64,
    pub vehicle_type: VehicleType,
    pub vehicle_count: u32,
    pub fixed_cost: f64,
    pub variable_cost: f64,
}

#[derive(Serialize)]
#[serde(rename = "ServedDemand")]
pub struct JsonServedDemand {
    pub demand_id: String,
    pub priority: Priority,
    pub pallets: u32,
    pub route: Vec<String>,
    pub legs: Vec<JsonRouteLeg>,
    pub fixed_cost: f64,
    pub variable_cost: f64,
    pub handling_cost: f64,
    pub vehicle_count: u64,
    pub total_cost: f64,
    pub total_time_hours: f64,
}

impl FromProblem<&ServedDemand> for JsonServedDemand {
    fn from_problem(value: &ServedDemand, problem: &TransportProblem) -> Self {
        let demand = problem.demand(value.demand_id());
        let route: &Route = value.route();
        let cost = value.cost();

        JsonServedDemand {
            demand_id: demand.external_id().to_owned(),
            priority: demand.priority(),
            pallets: demand.pallets(),
            route: route
                .nodes()
                .iter()
                .map(|&node_id| problem.node_external_id(node_id).to_owned())
                .collect(),
            legs: route
                .legs()
                .iter()
                .zip(cost.legs())
                .map(|(leg, leg_cost)| JsonRouteLeg {
                    from: problem.node_external_id(leg.from()).to_owned(),
                    to: problem.node_external_id(leg.to()).to_owned(),
                    distance_km: leg.distance_km(),
                    time_hours: leg.time_hours(),
                    vehicle_type: leg_cost.vehicle_type,
                    vehicle_count: leg_cost.vehicle_count,
                    fixed_cost: leg_cost.fixed,
                    variable_cost: leg_cost.variable,
                })
                .collect(),
            fixed_cost: cost.fixed(),
            variable_cost: cost.variable(),
            handling_cost: cost.handling(),
            vehicle_count: cost.vehicle_count(),
            total_cost: cost.total(),
            total_time_hours: route.total_time(problem),
        }
    }
}

#[derive(Serialize)]
#[serde(rename = "UnservedDemand")]
pub struct JsonUnservedDemand {
    pub demand_id: String,
    pub reason: UnservedReason,
}

impl FromProblem<&UnservedDemand> for JsonUnservedDemand {
    fn from_problem(value: &UnservedDemand, problem: &TransportProblem) -> Self {
        JsonUnservedDemand {
            demand_id: problem.demand(value.demand_id).external_id().to_owned(),
            reason: value.reason.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename = "Solution")]
pub struct JsonSolution {
    pub served: Vec<JsonServedDemand>,
    pub unserved: Vec<JsonUnservedDemand>,
    pub warnings: Vec<SolutionWarning>,
    pub budget: BudgetStatus,
    pub rejected_records: Vec<RejectedRecord>,
    pub timed_out: bool,
    pub duration: SignedDuration,
    pub kpi: NetworkKpi,
}

impl FromProblem<&Solution> for JsonSolution {
    fn from_problem(value: &Solution, problem: &TransportProblem) -> Self {
        JsonSolution {
            served: value
                .served()
                .iter()
                .map(|served| JsonServedDemand::from_problem(served, problem))
                .collect(),
            unserved: value
                .unserved()
                .iter()
                .map(|unserved| JsonUnservedDemand::from_problem(unserved, problem))
                .collect(),
            warnings: value.warnings().to_vec(),
            budget: *value.budget(),
            rejected_records: problem.rejected_records().to_vec(),
            timed_out: value.timed_out(),
            duration: value.duration(),
            kpi: NetworkKpi::compute(problem, value),
        }
    }
}
