use slotmap::SecondaryMap;

use crate::topology::{EdgeId, FaceId, Shape};

/// Edge-to-faces and face-to-faces maps for one shape.
///
/// Face lists are in shape order and free of duplicates. A face is never
/// its own neighbor, even when it uses an edge twice (a cylinder seam).
#[derive(Debug)]
pub struct AdjacencyGraph {
    edge_faces: SecondaryMap<EdgeId, Vec<FaceId>>,
    neighbors: SecondaryMap<FaceId, Vec<FaceId>>,
}

impl AdjacencyGraph {
    /// Builds both maps in a single pass over face edge lists.
    #[must_use]
    pub fn build(shape: &Shape) -> Self {
        let mut edge_faces: SecondaryMap<EdgeId, Vec<FaceId>> = SecondaryMap::new();
        for (edge, _) in shape.edges() {
            edge_faces.insert(edge, Vec::new());
        }
        let mut neighbors: SecondaryMap<FaceId, Vec<FaceId>> = SecondaryMap::new();
        let mut position: SecondaryMap<FaceId, usize> = SecondaryMap::new();

        for (index, (face, data)) in shape.faces().enumerate() {
            position.insert(face, index);
            neighbors.insert(face, Vec::new());
            for &edge in &data.edges {
                if let Some(faces) = edge_faces.get_mut(edge) {
                    // Faces arrive in shape order, so only the last entry can repeat.
                    if faces.last() != Some(&face) {
                        faces.push(face);
                    }
                }
            }
        }

        for faces in edge_faces.values() {
            for &a in faces {
                for &b in faces {
                    if a != b {
                        if let Some(list) = neighbors.get_mut(a) {
                            list.push(b);
                        }
                    }
                }
            }
        }
        for list in neighbors.values_mut() {
            list.sort_by_key(|f| position.get(*f).copied().unwrap_or(usize::MAX));
            list.dedup();
        }

        Self {
            edge_faces,
            neighbors,
        }
    }

    /// Faces incident to `edge`.
    #[must_use]
    pub fn faces_of_edge(&self, edge: EdgeId) -> &[FaceId] {
        self.edge_faces.get(edge).map_or(&[], Vec::as_slice)
    }

    /// The two faces of an edge, or `None` unless exactly two faces use it.
    #[must_use]
    pub fn edge_pair(&self, edge: EdgeId) -> Option<(FaceId, FaceId)> {
        match self.faces_of_edge(edge) {
            &[a, b] => Some((a, b)),
            _ => None,
        }
    }

    /// Faces sharing at least one edge with `face`, in shape order.
    #[must_use]
    pub fn neighbors(&self, face: FaceId) -> &[FaceId] {
        self.neighbors.get(face).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if the faces share an edge.
    #[must_use]
    pub fn are_adjacent(&self, a: FaceId, b: FaceId) -> bool {
        self.neighbors(a).contains(&b)
    }
}
