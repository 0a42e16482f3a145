use crate::geo::Coordinate;
use std::path::PathBuf;

pub const SINGLE_CLUSTER_PREFIX: &str = "all_images_";

/// A group of images. `location` is the coordinate of the first image that
/// was assigned to it and never moves.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub location: Coordinate,
    pub images: Vec<PathBuf>,
}

impl Cluster {
    fn new(location: Coordinate, image: PathBuf) -> Self {
        Cluster {
            location,
            images: vec![image],
        }
    }

    /// Name of the output subfolder. `only` is set when this is the sole
    /// cluster of its directory.
    pub fn folder_name(&self, only: bool) -> String {
        if only {
            format!("{}{}", SINGLE_CLUSTER_PREFIX, self.location)
        } else {
            self.location.to_string()
        }
    }
}

/// First-fit greedy clustering. With no radius every coordinate lands in a
/// single cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clusterer {
    radius: Option<f64>,
}

impl Clusterer {
    pub fn new(radius: Option<f64>) -> Self {
        Clusterer { radius }
    }

    fn accepts(&self, cluster: &Cluster, location: &Coordinate) -> bool {
        match self.radius {
            Some(radius) => cluster.location.distance(location) <= radius,
            None => true,
        }
    }

    /// Each entry joins the first existing cluster (in creation order) whose
    /// representative is within the radius, or starts a new one. Earlier
    /// assignments are never revisited.
    pub fn cluster<I>(&self, entries: I) -> Vec<Cluster>
    where
        I: IntoIterator<Item = (Coordinate, PathBuf)>,
    {
        let mut clusters: Vec<Cluster> = Vec::new();

        for (location, path) in entries {
            match clusters.iter_mut().find(|c| self.accepts(c, &location)) {
                Some(cluster) => cluster.images.push(path),
                None => clusters.push(Cluster::new(location, path)),
            }
        }
        clusters
    }
}

/// Subfolder name of every cluster, in cluster order.
pub fn folder_names(clusters: &[Cluster]) -> Vec<String> {
    let only = clusters.len() == 1;
    clusters.iter().map(|c| c.folder_name(only)).collect()
}
