//! Area-weighted vertex normal accumulation.
//!
//! Each triangle adds its *unnormalized* face normal to all three of its
//! vertices, so larger incident triangles pull the averaged normal further
//! toward themselves. Accumulators are normalized once every triangle has
//! been visited.

use glam::Vec3;

use crate::error::MeshError;

/// Which side of the fixed sphere winding the face normals point to.
///
/// Both variants share the same winding and index order; only the cross
/// product operand order differs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalFacing {
    /// Normals point away from the sphere centre.
    #[default]
    Outward,
    /// Normals point toward the centre, for skies shaded from inside.
    /// Uses `cross(v0 - v2, v0 - v1)`.
    Inward,
}

/// Unnormalized face normal of the triangle `(p0, p1, p2)`.
///
/// The length is twice the triangle area.
#[inline]
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3, facing: NormalFacing) -> Vec3 {
    match facing {
        NormalFacing::Outward => (p0 - p1).cross(p0 - p2),
        NormalFacing::Inward => (p0 - p2).cross(p0 - p1),
    }
}

/// Compute one normalized normal per position from a triangle-list index buffer.
///
/// Fails with [`MeshError::InvalidArgument`] if the index buffer is not a
/// whole number of triangles or references a missing vertex, and with
/// [`MeshError::DegenerateGeometry`] if any vertex accumulates a zero (or
/// non-finite) normal, which includes vertices no triangle references.
pub fn accumulate_vertex_normals(
    positions: &[Vec3],
    indices: &[u32],
    facing: NormalFacing,
) -> Result<Vec<Vec3>, MeshError> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::InvalidArgument(format!(
            "index count {} is not a multiple of 3",
            indices.len()
        )));
    }
    if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
        return Err(MeshError::InvalidArgument(format!(
            "index {bad} out of range for {} vertices",
            positions.len()
        )));
    }

    let mut accumulators = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = face_normal(positions[a], positions[b], positions[c], facing);
        accumulators[a] += n;
        accumulators[b] += n;
        accumulators[c] += n;
    }

    accumulators
        .into_iter()
        .enumerate()
        .map(|(vertex, n)| {
            n.try_normalize()
                .ok_or(MeshError::DegenerateGeometry { vertex })
        })
        .collect()
}
