pub mod list_datasets;
pub mod list_sets;
pub mod raw;
pub mod routes;
pub mod set_points;
pub mod summary;

use axum::extract::{Query, rejection::QueryRejection};
use routeview_datasets::registry::DatasetQuery;

use crate::error::ApiError;

pub(crate) fn dataset_query(
    query: Result<Query<DatasetQuery>, QueryRejection>,
) -> Result<DatasetQuery, ApiError> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}
