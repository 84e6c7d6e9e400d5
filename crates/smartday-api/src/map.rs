//! Point-of-interest endpoint.

use async_trait::async_trait;
use smartday_core::backend::MapApi;
use smartday_core::error::Result;
use smartday_core::map::{MapDataset, PointOfInterest};
use tracing::debug;

use crate::client::BackendClient;
use crate::error::BackendError;

#[async_trait]
impl MapApi for BackendClient {
    async fn fetch_points(&self, dataset: MapDataset) -> Result<Vec<PointOfInterest>> {
        debug!(%dataset, "fetching map points");
        let response = self
            .client
            .get(self.url(&format!("/map/{}", dataset.path_segment())))
            .send()
            .await
            .map_err(BackendError::from)?;
        let response = Self::check(response).await?;
        let points: Vec<PointOfInterest> = response.json().await.map_err(BackendError::from)?;
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use smartday_core::map::PointOfInterest;

    #[test]
    fn points_parse_from_the_wire_array() {
        let points: Vec<PointOfInterest> = serde_json::from_str(
            r#"[{"name":"Seoul Forest","lat":37.5444,"lng":127.0374,"tel":"02-460-2905"},
                {"name":"Namsan Park","lat":37.5509,"lng":126.9905}]"#,
        )
        .unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].phone_display(), "not available");
    }
}
