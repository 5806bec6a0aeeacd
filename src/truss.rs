//! The truss model: joints, members and the edits that build them.

use nalgebra::DMatrix;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use serde::{Deserialize, Serialize};

use crate::analysis;
use crate::assembly::{self, DofMap};
use crate::errors::{AnalysisError, ModelError, TrussEditError};
use crate::geometry::{Dimension, Force, MemberGeometry, Point};
use crate::material::Material;
use crate::mass;
use crate::results::AnalysisResult;
use crate::section::{CrossSection, Shape};
use crate::settings::AnalysisSettings;

/// Global coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The X axis.
    X,
    /// The Y axis.
    Y,
    /// The Z axis.
    Z,
}

impl Axis {
    /// Position of the axis within a joint's DOF block.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Translational restraint of a joint, one flag per axis. `true` means fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Support {
    /// Restraint along X.
    pub x: bool,
    /// Restraint along Y.
    pub y: bool,
    /// Restraint along Z.
    pub z: bool,
}

impl Support {
    /// No restraint at all.
    #[must_use]
    pub const fn free() -> Self {
        Self {
            x: false,
            y: false,
            z: false,
        }
    }

    /// Restrain every axis.
    #[must_use]
    pub const fn pinned() -> Self {
        Self {
            x: true,
            y: true,
            z: true,
        }
    }

    /// Restrain only `axis`, leaving the joint free to roll along the others.
    #[must_use]
    pub const fn roller(axis: Axis) -> Self {
        let mut support = Self::free();
        match axis {
            Axis::X => support.x = true,
            Axis::Y => support.y = true,
            Axis::Z => support.z = true,
        }
        support
    }

    /// Restrain every axis except `axis`, leaving the joint free to slide along it.
    #[must_use]
    pub const fn slot(axis: Axis) -> Self {
        let mut support = Self::pinned();
        match axis {
            Axis::X => support.x = false,
            Axis::Y => support.y = false,
            Axis::Z => support.z = false,
        }
        support
    }

    /// Whether the axis with the given DOF index is fixed.
    #[must_use]
    pub const fn is_fixed(&self, axis: usize) -> bool {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }
}

impl From<[bool; 3]> for Support {
    fn from([x, y, z]: [bool; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Internal representation of a truss joint.
#[derive(Clone, Debug)]
pub(crate) struct Joint {
    /// Position of the joint in metres.
    pub(crate) position: Point,
    /// Which translational degrees of freedom are restrained.
    pub(crate) support: Support,
    /// External load applied to the joint in newtons.
    pub(crate) load: Force,
}

impl Joint {
    /// Create a free, unloaded joint at `position`.
    fn new(position: Point) -> Self {
        Self {
            position,
            support: Support::free(),
            load: Force::default(),
        }
    }
}

/// Internal representation of a truss member.
#[derive(Clone, Debug, Default)]
pub(crate) struct Member {
    /// Material the member is made of.
    pub(crate) material: Material,
    /// Cross-section of the member.
    pub(crate) section: CrossSection,
}

/// A member as seen by the assembly: its identifier, end joints and properties.
pub(crate) struct MemberView<'a> {
    /// Identifier of the member.
    pub(crate) id: EdgeIndex,
    /// Joint the member starts at.
    pub(crate) start: NodeIndex,
    /// Joint the member ends at.
    pub(crate) end: NodeIndex,
    /// Material and section.
    pub(crate) member: &'a Member,
}

/// Container for a pin-jointed truss model.
///
/// Joint and member identifiers stay valid across removals of other joints and
/// members, so edits may happen in any order.
#[derive(Clone, Debug, Default)]
pub struct Truss {
    /// Underlying graph storage for joints and members.
    graph: StableGraph<Joint, Member>,
    /// Whether joints carry two or three degrees of freedom.
    dimension: Dimension,
}

impl Truss {
    /// Create an empty three dimensional truss.
    ///
    /// # Examples
    /// ```
    /// use trussfos::Truss;
    ///
    /// let truss = Truss::new();
    /// assert_eq!(truss.joint_count(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_dimension(Dimension::Spatial)
    }

    /// Create an empty truss in the X-Y plane with two DOFs per joint.
    #[must_use]
    pub fn planar() -> Self {
        Self::with_dimension(Dimension::Planar)
    }

    /// Create an empty truss with the given dimension.
    #[must_use]
    pub fn with_dimension(dimension: Dimension) -> Self {
        Self {
            graph: StableGraph::new(),
            dimension,
        }
    }

    /// Dimension the truss is analysed in.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Return the number of joints in the truss.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of members in the truss.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Identifiers of every joint in ascending order.
    #[must_use]
    pub fn joint_ids(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    /// Identifiers of every member in ascending order.
    #[must_use]
    pub fn member_ids(&self) -> Vec<EdgeIndex> {
        self.graph.edge_indices().collect()
    }

    /// Add a new free, unloaded joint to the truss.
    ///
    /// # Examples
    /// ```
    /// use trussfos::{point, Truss};
    ///
    /// let mut truss = Truss::new();
    /// let joint = truss.add_joint(point(0.0, 0.0, 0.0));
    /// assert_eq!(truss.joint_count(), 1);
    /// assert_eq!(joint.index(), 0);
    /// ```
    pub fn add_joint(&mut self, position: Point) -> NodeIndex {
        self.graph.add_node(Joint::new(position))
    }

    /// Add a joint with a support already applied.
    pub fn add_supported_joint(&mut self, position: Point, support: Support) -> NodeIndex {
        let joint = self.graph.add_node(Joint::new(position));
        self.graph[joint].support = support;
        joint
    }

    /// Update the position of an existing joint.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn move_joint(&mut self, joint: NodeIndex, position: Point) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.position = position;
        Ok(())
    }

    /// Remove a joint and every member attached to it.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn remove_joint(&mut self, joint: NodeIndex) -> Result<(), TrussEditError> {
        self.graph
            .remove_node(joint)
            .map(|_| ())
            .ok_or(TrussEditError::UnknownJoint(joint))
    }

    /// Connect two distinct joints with a new member made of A36 steel pipe.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when either joint is missing and
    /// [`TrussEditError::SelfLoop`] when `start` and `end` are the same joint.
    pub fn add_member(
        &mut self,
        start: NodeIndex,
        end: NodeIndex,
    ) -> Result<EdgeIndex, TrussEditError> {
        for joint in [start, end] {
            if !self.graph.contains_node(joint) {
                return Err(TrussEditError::UnknownJoint(joint));
            }
        }
        if start == end {
            return Err(TrussEditError::SelfLoop(start));
        }
        Ok(self.graph.add_edge(start, end, Member::default()))
    }

    /// Remove a member from the truss.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss.
    pub fn remove_member(&mut self, member: EdgeIndex) -> Result<(), TrussEditError> {
        self.graph
            .remove_edge(member)
            .map(|_| ())
            .ok_or(TrussEditError::UnknownMember(member))
    }

    /// Set the restraint state for a joint.
    ///
    /// Accepts a [`Support`] or an `[x, y, z]` array where `true` means fixed. In a
    /// planar truss the Z flag is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss.
    pub fn set_support(
        &mut self,
        joint: NodeIndex,
        support: impl Into<Support>,
    ) -> Result<(), TrussEditError> {
        self.joint_mut(joint)?.support = support.into();
        Ok(())
    }

    /// Apply a point load to a joint, replacing any previous load.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownJoint`] when `joint` is not part of this truss
    /// and [`TrussEditError::NonFinite`] when a component is NaN or infinite.
    pub fn set_load(
        &mut self,
        joint: NodeIndex,
        load: impl Into<Force>,
    ) -> Result<(), TrussEditError> {
        let load = load.into();
        let node = self.joint_mut(joint)?;
        if !load.is_finite() {
            return Err(TrussEditError::NonFinite);
        }
        node.load = load;
        Ok(())
    }

    /// Assign a material to a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss
    /// and [`TrussEditError::InvalidMemberProperties`] when a property is not positive.
    pub fn set_member_material(
        &mut self,
        member: EdgeIndex,
        material: Material,
    ) -> Result<(), TrussEditError> {
        let edge = self
            .graph
            .edge_weight_mut(member)
            .ok_or(TrussEditError::UnknownMember(member))?;
        material.validate()?;
        edge.material = material;
        Ok(())
    }

    /// Assign a cross-section to a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss.
    pub fn set_member_section(
        &mut self,
        member: EdgeIndex,
        section: CrossSection,
    ) -> Result<(), TrussEditError> {
        self.graph
            .edge_weight_mut(member)
            .ok_or(TrussEditError::UnknownMember(member))?
            .section = section;
        Ok(())
    }

    /// Derive a cross-section from `shape` and assign it to a member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::UnknownMember`] when `member` is not part of this truss
    /// and [`TrussEditError::InvalidMemberProperties`] when the shape is invalid.
    ///
    /// # Examples
    /// ```
    /// use trussfos::{point, Shape, Truss, TrussEditError};
    ///
    /// let mut truss = Truss::new();
    /// let a = truss.add_joint(point(0.0, 0.0, 0.0));
    /// let b = truss.add_joint(point(1.0, 0.0, 0.0));
    /// let member = truss.add_member(a, b).unwrap();
    ///
    /// let error = truss
    ///     .set_member_shape(member, Shape::Bar { radius: 0.0 })
    ///     .expect_err("invalid radius rejected");
    /// assert!(matches!(error, TrussEditError::InvalidMemberProperties(_)));
    /// ```
    pub fn set_member_shape(
        &mut self,
        member: EdgeIndex,
        shape: Shape,
    ) -> Result<(), TrussEditError> {
        if self.graph.edge_weight(member).is_none() {
            return Err(TrussEditError::UnknownMember(member));
        }
        let section = CrossSection::new(shape)?;
        self.set_member_section(member, section)
    }

    /// Assign the same material to every member.
    ///
    /// # Errors
    ///
    /// Returns [`TrussEditError::InvalidMemberProperties`] when a property is not positive.
    pub fn set_material_for_all(&mut self, material: &Material) -> Result<(), TrussEditError> {
        material.validate()?;
        for member in self.member_ids() {
            self.graph[member].material = material.clone();
        }
        Ok(())
    }

    /// Assign the same cross-section to every member.
    pub fn set_section_for_all(&mut self, section: CrossSection) {
        for member in self.member_ids() {
            self.graph[member].section = section;
        }
    }

    /// Position of a joint.
    #[must_use]
    pub fn joint_position(&self, joint: NodeIndex) -> Option<Point> {
        self.graph.node_weight(joint).map(|joint| joint.position)
    }

    /// Support applied to a joint.
    #[must_use]
    pub fn joint_support(&self, joint: NodeIndex) -> Option<Support> {
        self.graph.node_weight(joint).map(|joint| joint.support)
    }

    /// Load applied to a joint.
    #[must_use]
    pub fn joint_load(&self, joint: NodeIndex) -> Option<Force> {
        self.graph.node_weight(joint).map(|joint| joint.load)
    }

    /// The two joints a member connects, in the order it was created with.
    #[must_use]
    pub fn member_joints(&self, member: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(member)
    }

    /// Material of a member.
    #[must_use]
    pub fn member_material(&self, member: EdgeIndex) -> Option<&Material> {
        self.graph.edge_weight(member).map(|member| &member.material)
    }

    /// Cross-section of a member.
    #[must_use]
    pub fn member_section(&self, member: EdgeIndex) -> Option<CrossSection> {
        self.graph.edge_weight(member).map(|member| member.section)
    }

    /// Current length of a member in metres.
    #[must_use]
    pub fn member_length(&self, member: EdgeIndex) -> Option<f64> {
        let (start, end) = self.graph.edge_endpoints(member)?;
        let delta = self.graph[end].position.to_vector() - self.graph[start].position.to_vector();
        let dim = self.dimension.dofs_per_joint();
        Some(delta.rows(0, dim).norm())
    }

    /// Total mass of the truss in kilograms, independent of any analysis.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidModel`] or [`AnalysisError::DegenerateGeometry`]
    /// when the member data cannot produce a meaningful mass.
    pub fn mass(&self) -> Result<f64, AnalysisError> {
        self.mass_with(&AnalysisSettings::default())
    }

    /// Total mass of the truss using the tolerances in `settings`.
    ///
    /// # Errors
    ///
    /// See [`Truss::mass`].
    pub fn mass_with(&self, settings: &AnalysisSettings) -> Result<f64, AnalysisError> {
        self.validate()?;
        mass::total_mass(self, settings)
    }

    /// Assemble the unreduced global stiffness matrix, `dim` rows per joint in
    /// ascending joint order.
    ///
    /// # Errors
    ///
    /// Returns the same validation and geometry errors as [`Truss::analyze`].
    pub fn global_stiffness(
        &self,
        settings: &AnalysisSettings,
    ) -> Result<DMatrix<f64>, AnalysisError> {
        self.validate()?;
        let dofs = DofMap::new(self);
        let elements = assembly::element_models(self, &dofs, settings)?;
        Ok(assembly::assemble_stiffness(&elements, dofs.dof_count()))
    }

    /// Analyse the truss under its loads with default settings.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalysisError`] when the model is malformed, a member is
    /// degenerate, or the structure is under-constrained or unstable.
    pub fn analyze(&self) -> Result<AnalysisResult, AnalysisError> {
        analysis::analyze(self)
    }

    /// Analyse the truss with explicit settings.
    ///
    /// # Errors
    ///
    /// See [`Truss::analyze`].
    pub fn analyze_with(
        &self,
        settings: &AnalysisSettings,
    ) -> Result<AnalysisResult, AnalysisError> {
        analysis::analyze_with(self, settings)
    }

    /// Check the structural invariants the solver relies on.
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.graph.node_count() == 0 {
            return Err(ModelError::Empty);
        }
        for (id, joint) in self.joints() {
            if !joint.position.is_finite() || !joint.load.is_finite() {
                return Err(ModelError::NonFiniteJoint(id));
            }
            if self.dimension == Dimension::Planar
                && (joint.position.z != 0.0 || joint.load.z != 0.0)
            {
                return Err(ModelError::OutOfPlane(id));
            }
        }
        for view in self.members() {
            if view.start == view.end {
                return Err(ModelError::SelfLoop {
                    member: view.id,
                    joint: view.start,
                });
            }
            view.member
                .material
                .validate()
                .and_then(|()| CrossSection::new(view.member.section.shape()).map(|_| ()))
                .map_err(|source| ModelError::InvalidMemberProperties {
                    member: view.id,
                    source,
                })?;
        }
        Ok(())
    }

    /// Iterate over joints in ascending identifier order.
    pub(crate) fn joints(&self) -> impl Iterator<Item = (NodeIndex, &Joint)> + '_ {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Iterate over members in ascending identifier order.
    pub(crate) fn members(&self) -> impl Iterator<Item = MemberView<'_>> + '_ {
        self.graph.edge_references().map(|edge| MemberView {
            id: edge.id(),
            start: edge.source(),
            end: edge.target(),
            member: edge.weight(),
        })
    }

    /// Geometry of a member view under the truss dimension.
    pub(crate) fn geometry(
        &self,
        view: &MemberView<'_>,
        settings: &AnalysisSettings,
    ) -> Result<MemberGeometry, AnalysisError> {
        MemberGeometry::between(
            view.id,
            self.graph[view.start].position,
            self.graph[view.end].position,
            self.dimension,
            settings.length_tolerance,
        )
    }

    /// Mutable access to a joint, or an edit error when it is missing.
    fn joint_mut(&mut self, joint: NodeIndex) -> Result<&mut Joint, TrussEditError> {
        self.graph
            .node_weight_mut(joint)
            .ok_or(TrussEditError::UnknownJoint(joint))
    }
}
