mod coordinates;
pub mod feature_collection;
mod lenient;
pub mod optimizer_request;
pub mod optimizer_result;
pub mod polyline;
pub mod request_points;
pub mod route_geometry;
pub mod summary;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;
