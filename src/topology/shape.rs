use slotmap::SecondaryMap;
use tracing::debug;

use crate::error::{Result, TopologyError};
use crate::operations::query::{Aabb, BoundingBox};

use super::{EdgeData, EdgeId, FaceData, FaceId, TopologyStore};

/// An immutable solid boundary: ordered faces, their edges, and bounds.
///
/// A face's position in the face order is the index reported in issues.
#[derive(Debug)]
pub struct Shape {
    store: TopologyStore,
    face_order: Vec<FaceId>,
    edge_order: Vec<EdgeId>,
    face_index: SecondaryMap<FaceId, usize>,
    face_bounds: SecondaryMap<FaceId, Aabb>,
    bounds: Aabb,
}

impl Shape {
    /// Returns the underlying topology store.
    #[must_use]
    pub fn store(&self) -> &TopologyStore {
        &self.store
    }

    /// Axis-aligned bounding box of the whole shape.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Extent of the shape along the layering axis.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.bounds.z_length()
    }

    /// Number of faces.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.face_order.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    /// Faces in shape order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> + '_ {
        self.face_order.iter().map(|&id| (id, &self.store.faces[id]))
    }

    /// Edges in shape order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> + '_ {
        self.edge_order.iter().map(|&id| (id, &self.store.edges[id]))
    }

    /// Returns the face data for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of this shape.
    pub fn face(&self, id: FaceId) -> Result<&FaceData> {
        Ok(self.store.face(id)?)
    }

    /// Returns the edge data for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge is not part of this shape.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData> {
        Ok(self.store.edge(id)?)
    }

    /// Position of the face in shape order.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of this shape.
    pub fn face_index(&self, id: FaceId) -> Result<usize> {
        self.face_index
            .get(id)
            .copied()
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()).into())
    }

    /// Face at position `index` in shape order.
    #[must_use]
    pub fn face_id(&self, index: usize) -> Option<FaceId> {
        self.face_order.get(index).copied()
    }

    /// Bounding box of a single face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not part of this shape.
    pub fn face_bounds(&self, id: FaceId) -> Result<&Aabb> {
        self.face_bounds
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()).into())
    }
}

/// Collects faces and edges, then freezes them into a [`Shape`].
#[derive(Debug, Default)]
pub struct ShapeBuilder {
    store: TopologyStore,
    face_order: Vec<FaceId>,
    edge_order: Vec<EdgeId>,
}

impl ShapeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        let id = self.store.add_edge(data);
        self.edge_order.push(id);
        id
    }

    /// Adds a face and returns its ID. Faces keep the order they are added in.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        let id = self.store.add_face(data);
        self.face_order.push(id);
        id
    }

    /// Validates edge references and computes bounding boxes.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no faces, a face's parameter range is
    /// inverted or NaN, a face references an edge that was never added, or a
    /// face cannot be evaluated for its bounds.
    pub fn build(self) -> Result<Shape> {
        let Self {
            store,
            face_order,
            edge_order,
        } = self;

        if face_order.is_empty() {
            return Err(TopologyError::InvalidTopology("shape has no faces".into()).into());
        }

        let mut face_index = SecondaryMap::new();
        let mut face_bounds = SecondaryMap::new();
        let mut bounds = Aabb::empty();
        for (index, &id) in face_order.iter().enumerate() {
            let face = store.face(id)?;
            if !face.domain.is_ordered() {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {index} has an inverted or undefined parameter range"
                ))
                .into());
            }
            if let Some(missing) = face.edges.iter().find(|&&e| !store.contains_edge(e)) {
                return Err(TopologyError::InvalidTopology(format!(
                    "face {index} references unknown edge {missing:?}"
                ))
                .into());
            }
            let aabb = BoundingBox::new(id).execute(&store)?;
            bounds = bounds.union(&aabb);
            face_index.insert(id, index);
            face_bounds.insert(id, aabb);
        }

        debug!(
            faces = face_order.len(),
            edges = edge_order.len(),
            thickness = bounds.z_length(),
            "Built shape"
        );

        Ok(Shape {
            store,
            face_order,
            edge_order,
            face_index,
            face_bounds,
            bounds,
        })
    }
}
