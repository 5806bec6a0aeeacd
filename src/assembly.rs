//! Global stiffness matrix and load vector assembly.

use std::collections::HashMap;

use log::trace;
use nalgebra::{DMatrix, DVector, Matrix2};
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::errors::AnalysisError;
use crate::geometry::MemberGeometry;
use crate::mass;
use crate::settings::AnalysisSettings;
use crate::truss::Truss;

/// Mapping from joint identifiers to their first global degree of freedom.
///
/// Joints are numbered in ascending identifier order, so the layout depends only
/// on which joints exist and not on the order edits were made in.
#[derive(Clone, Debug)]
pub(crate) struct DofMap {
    /// First DOF of each joint.
    offsets: HashMap<NodeIndex, usize>,
    /// Joints in DOF order.
    order: Vec<NodeIndex>,
    /// DOFs carried by each joint.
    per_joint: usize,
}

impl DofMap {
    /// Number the DOFs of every joint in `truss`.
    pub(crate) fn new(truss: &Truss) -> Self {
        let per_joint = truss.dimension().dofs_per_joint();
        let order: Vec<NodeIndex> = truss.joint_ids();
        let offsets = order
            .iter()
            .enumerate()
            .map(|(idx, joint)| (*joint, idx * per_joint))
            .collect();
        Self {
            offsets,
            order,
            per_joint,
        }
    }

    /// Total number of DOFs in the model.
    pub(crate) fn dof_count(&self) -> usize {
        self.order.len() * self.per_joint
    }

    /// DOFs carried by each joint.
    pub(crate) fn per_joint(&self) -> usize {
        self.per_joint
    }

    /// Joints in DOF order.
    pub(crate) fn joints(&self) -> &[NodeIndex] {
        &self.order
    }

    /// First DOF of `joint`.
    pub(crate) fn offset(&self, joint: NodeIndex) -> usize {
        self.offsets[&joint]
    }

    /// Global DOFs of a member's start joint followed by its end joint.
    fn member_dofs(&self, start: NodeIndex, end: NodeIndex) -> Vec<usize> {
        let start = self.offset(start);
        let end = self.offset(end);
        (start..start + self.per_joint)
            .chain(end..end + self.per_joint)
            .collect()
    }
}

/// Everything the solver needs to know about one member.
#[derive(Clone, Debug)]
pub(crate) struct ElementModel {
    /// Identifier of the member.
    pub(crate) member: EdgeIndex,
    /// Length and orientation.
    pub(crate) geometry: MemberGeometry,
    /// Axial stiffness `E * A / L` in newtons per metre.
    pub(crate) axial_stiffness: f64,
    /// Global DOFs of both ends, start joint first.
    pub(crate) dofs: Vec<usize>,
}

impl ElementModel {
    /// Axial stiffness matrix in the member's own frame.
    pub(crate) fn local_stiffness(&self) -> Matrix2<f64> {
        self.axial_stiffness * Matrix2::new(1.0, -1.0, -1.0, 1.0)
    }

    /// Member stiffness rotated into global coordinates, `T^T k T`.
    pub(crate) fn global_stiffness(&self) -> DMatrix<f64> {
        let transform = self.geometry.transform();
        let local = DMatrix::from_column_slice(2, 2, self.local_stiffness().as_slice());
        transform.transpose() * local * transform
    }
}

/// Measure every member and compute its axial stiffness.
///
/// # Errors
///
/// Returns [`AnalysisError::DegenerateGeometry`] for the first member whose length
/// does not exceed the configured tolerance.
pub(crate) fn element_models(
    truss: &Truss,
    dofs: &DofMap,
    settings: &AnalysisSettings,
) -> Result<Vec<ElementModel>, AnalysisError> {
    truss
        .members()
        .map(|view| {
            let geometry = truss.geometry(&view, settings)?;
            let axial_stiffness = view.member.material.elastic_modulus
                * view.member.section.area()
                / geometry.length;
            trace!(
                "member {:?}: L = {:.6} m, EA/L = {:.6e} N/m",
                view.id,
                geometry.length,
                axial_stiffness
            );
            Ok(ElementModel {
                member: view.id,
                geometry,
                axial_stiffness,
                dofs: dofs.member_dofs(view.start, view.end),
            })
        })
        .collect()
}

/// Scatter-add every element stiffness into a `dof_count` square matrix.
pub(crate) fn assemble_stiffness(elements: &[ElementModel], dof_count: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(dof_count, dof_count);
    for element in elements {
        let global = element.global_stiffness();
        for (row_local, global_row) in element.dofs.iter().enumerate() {
            for (col_local, global_col) in element.dofs.iter().enumerate() {
                matrix[(*global_row, *global_col)] += global[(row_local, col_local)];
            }
        }
    }
    matrix
}

/// Assemble the global nodal load vector.
///
/// Joint loads go straight into their DOF slots. With self weight enabled each
/// member contributes half its weight to each end along -Y.
pub(crate) fn assemble_loads(
    truss: &Truss,
    dofs: &DofMap,
    elements: &[ElementModel],
    settings: &AnalysisSettings,
) -> DVector<f64> {
    let per_joint = dofs.per_joint();
    let mut load = DVector::zeros(dofs.dof_count());
    for (id, joint) in truss.joints() {
        let base = dofs.offset(id);
        let components = [joint.load.x, joint.load.y, joint.load.z];
        for (axis, value) in components.iter().take(per_joint).enumerate() {
            load[base + axis] = *value;
        }
    }

    if settings.include_self_weight {
        for (view, element) in truss.members().zip(elements) {
            let weight = mass::member_mass(
                &view.member.section,
                &view.member.material,
                element.geometry.length,
            ) * settings.gravity;
            for joint in [view.start, view.end] {
                load[dofs.offset(joint) + 1] -= weight / 2.0;
            }
        }
    }
    load
}
