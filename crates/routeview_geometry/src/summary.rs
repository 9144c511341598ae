use serde::Serialize;
use serde_json::Value;

use crate::optimizer_result::OptimizerResponse;

#[derive(Debug, Serialize, PartialEq)]
pub struct Summary {
    pub code: Option<Value>,
    pub summary: Option<Value>,
    pub routes_count: usize,
    pub vehicles: Vec<Option<Value>>,
}

pub fn summarize(response: &OptimizerResponse) -> Summary {
    let result = response.result.as_ref();

    Summary {
        code: result.and_then(|result| result.code.clone()),
        summary: result.and_then(|result| result.summary.clone()),
        routes_count: response.routes().len(),
        vehicles: response
            .routes()
            .iter()
            .map(|route| route.vehicle.clone())
            .collect(),
    }
}
