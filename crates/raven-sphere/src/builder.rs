//! Unit sphere sampling and fixed-winding triangulation.
//!
//! ## Layout
//!
//! Interior latitude rings `j = 1 .. height-2` are sampled `width` times each,
//! azimuth running from `0` to `2π` inclusive at both ends, so the first and
//! last column of every ring coincide without being welded. The north pole
//! follows the rings at index `ring_count`, the south pole at `ring_count + 1`.
//!
//! | Part       | Vertices             | Triangles                |
//! |------------|----------------------|--------------------------|
//! | rings      | `(height-2) * width` | `2 * (width-1) * (height-3)` |
//! | pole caps  | `2`                  | `2 * (width-1)`          |

use std::f64::consts::PI;

use glam::Vec3;
use tracing::debug;

use crate::error::MeshError;
use crate::mesh::{Mesh, Vertex};
use crate::normals::{NormalFacing, accumulate_vertex_normals};

/// Smallest azimuth sample count that yields at least one triangle per cap.
pub const MIN_WIDTH: u32 = 2;
/// Smallest pole-to-pole sample count that yields one interior ring.
pub const MIN_HEIGHT: u32 = 3;

/// Closed-form element counts for a given sampling resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshCounts {
    pub vertices: usize,
    pub indices: usize,
    pub triangles: usize,
}

fn validate(width: u32, height: u32) -> Result<(), MeshError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(MeshError::InvalidArgument(format!(
            "sphere resolution {width}x{height} is degenerate \
             (need width >= {MIN_WIDTH} and height >= {MIN_HEIGHT})"
        )));
    }
    // Every vertex must be addressable by a u32 index.
    let vertices = u64::from(height - 2) * u64::from(width) + 2;
    let indices = u64::from(width - 1) * 6 * u64::from(height - 2);
    if vertices > u64::from(u32::MAX) || usize::try_from(indices).is_err() {
        return Err(MeshError::InvalidArgument(format!(
            "sphere resolution {width}x{height} needs {vertices} vertices, \
             more than a u32 index buffer can address"
        )));
    }
    Ok(())
}

/// Counts for a resolution that already passed [`validate`].
fn closed_form_counts(width: u32, height: u32) -> MeshCounts {
    let (w, h) = (width as usize, height as usize);
    let indices = (w - 1) * 6 * (h - 2);
    MeshCounts {
        vertices: (h - 2) * w + 2,
        indices,
        triangles: indices / 3,
    }
}

/// Element counts a build with this resolution will produce.
pub fn expected_counts(width: u32, height: u32) -> Result<MeshCounts, MeshError> {
    validate(width, height)?;
    Ok(closed_form_counts(width, height))
}

/// Sample ring and pole positions on the unit sphere.
///
/// Angles are evaluated in `f64` and narrowed once, so identical inputs give
/// bit-identical output on every platform with IEEE-754 `sin`/`cos`.
pub fn sample_positions(width: u32, height: u32) -> Result<Vec<Vec3>, MeshError> {
    let counts = expected_counts(width, height)?;
    let mut positions = Vec::with_capacity(counts.vertices);

    for j in 1..height - 1 {
        let theta = f64::from(j) / f64::from(height - 1) * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for i in 0..width {
            let phi = f64::from(i) / f64::from(width - 1) * PI * 2.0;
            let (sin_phi, cos_phi) = phi.sin_cos();
            positions.push(Vec3::new(
                (sin_theta * cos_phi) as f32,
                cos_theta as f32,
                (-sin_theta * sin_phi) as f32,
            ));
        }
    }

    positions.push(Vec3::Y);
    positions.push(Vec3::NEG_Y);
    Ok(positions)
}

/// Emit the triangle-list indices: belt quads first, then the pole caps
/// interleaved north/south per column.
pub fn triangulate(width: u32, height: u32) -> Result<Vec<u32>, MeshError> {
    let counts = expected_counts(width, height)?;
    let mut indices = Vec::with_capacity(counts.indices);

    let ring = |j: u32, i: u32| j * width + i;
    let north = (height - 2) * width;
    let south = north + 1;
    let last_ring = height - 3;

    for j in 0..height - 3 {
        for i in 0..width - 1 {
            indices.extend_from_slice(&[
                ring(j, i),
                ring(j + 1, i + 1),
                ring(j, i + 1),
                ring(j, i),
                ring(j + 1, i),
                ring(j + 1, i + 1),
            ]);
        }
    }

    for i in 0..width - 1 {
        indices.extend_from_slice(&[
            north,
            ring(0, i),
            ring(0, i + 1),
            south,
            ring(last_ring, i + 1),
            ring(last_ring, i),
        ]);
    }

    debug_assert_eq!(indices.len(), counts.indices);
    Ok(indices)
}

/// Configurable sphere builder.
///
/// ```
/// use raven_sphere::SphereMeshBuilder;
///
/// let mesh = SphereMeshBuilder::new(32, 16).unwrap().build().unwrap();
/// assert_eq!(mesh.vertex_count(), 450);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereMeshBuilder {
    width: u32,
    height: u32,
    facing: NormalFacing,
    radius: f32,
}

impl SphereMeshBuilder {
    /// Reference sky resolution.
    pub const SKY_WIDTH: u32 = 32;
    pub const SKY_HEIGHT: u32 = 16;

    /// Create a builder for a unit sphere with outward normals.
    pub fn new(width: u32, height: u32) -> Result<Self, MeshError> {
        validate(width, height)?;
        Ok(Self {
            width,
            height,
            facing: NormalFacing::Outward,
            radius: 1.0,
        })
    }

    /// Builder for the reference 32x16 sky.
    pub fn sky() -> Self {
        Self {
            width: Self::SKY_WIDTH,
            height: Self::SKY_HEIGHT,
            facing: NormalFacing::Outward,
            radius: 1.0,
        }
    }

    /// Choose which way the vertex normals face.
    #[must_use]
    pub fn with_facing(mut self, facing: NormalFacing) -> Self {
        self.facing = facing;
        self
    }

    /// Scale positions by `radius` after normals are computed.
    #[must_use]
    pub fn scaled(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn facing(&self) -> NormalFacing {
        self.facing
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Element counts the build will produce.
    pub fn counts(&self) -> MeshCounts {
        closed_form_counts(self.width, self.height)
    }

    /// Generate the mesh.
    pub fn build(&self) -> Result<Mesh, MeshError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MeshError::InvalidArgument(format!(
                "sphere radius must be positive and finite, got {}",
                self.radius
            )));
        }

        let positions = sample_positions(self.width, self.height)?;
        let indices = triangulate(self.width, self.height)?;
        let normals = accumulate_vertex_normals(&positions, &indices, self.facing)?;

        let vertices = positions
            .into_iter()
            .zip(normals)
            .map(|(position, normal)| Vertex {
                position: position * self.radius,
                normal,
            })
            .collect::<Vec<_>>();

        debug!(
            width = self.width,
            height = self.height,
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "built sphere mesh"
        );

        Ok(Mesh::new(vertices, indices))
    }
}

/// Build a unit sphere with outward normals.
pub fn build_sphere(width: u32, height: u32) -> Result<Mesh, MeshError> {
    SphereMeshBuilder::new(width, height)?.build()
}
