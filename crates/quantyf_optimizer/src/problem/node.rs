use crate::define_index_newtype;

define_index_newtype!(NodeIdx, Node);

/// A location of the network: an origin, a destination or a sort-center hub.
#[derive(Debug, Clone)]
pub struct Node {
    external_id: String,
    location: Option<geo::Point>,
}

impl Node {
    pub fn new(external_id: impl Into<String>) -> Self {
        Node {
            external_id: external_id.into(),
            location: None,
        }
    }

    pub fn from_lat_lon(external_id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Node {
            external_id: external_id.into(),
            location: Some(geo::Point::new(lon, lat)),
        }
    }

    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn location(&self) -> Option<&geo::Point> {
        self.location.as_ref()
    }
}
