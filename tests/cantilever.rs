#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use trussfos::{force, point, CrossSection, LimitState, Material, Support, Truss};

#[derive(Debug, Clone, Copy)]
struct CantileverGeometry {
    fixed_joint: NodeIndex,
    loaded_joint: NodeIndex,
    member: EdgeIndex,
}

#[derive(Debug, Clone, Copy)]
struct CantileverProperties {
    area: f64,
    moment_of_inertia: f64,
    axial_load: f64,
}

impl Default for CantileverProperties {
    fn default() -> Self {
        Self {
            area: 0.01,
            moment_of_inertia: 1.0e-5,
            axial_load: -1_000.0,
        }
    }
}

fn build_cantilever_truss() -> (Truss, CantileverGeometry) {
    let mut truss = Truss::new();
    let fixed_joint = truss.add_joint(point(0.0, 0.0, 0.0));
    let loaded_joint = truss.add_joint(point(1.0, 0.0, 0.0));
    let member = truss
        .add_member(fixed_joint, loaded_joint)
        .expect("both joints exist");

    (
        truss,
        CantileverGeometry {
            fixed_joint,
            loaded_joint,
            member,
        },
    )
}

fn apply_cantilever_conditions(
    truss: &mut Truss,
    geometry: &CantileverGeometry,
) -> CantileverProperties {
    let properties = CantileverProperties::default();

    truss
        .set_support(geometry.fixed_joint, Support::pinned())
        .expect("fixed joint support assignment succeeds");
    truss
        .set_support(geometry.loaded_joint, [false, true, true])
        .expect("loaded joint support assignment succeeds");
    truss
        .set_load(
            geometry.loaded_joint,
            force(properties.axial_load, 0.0, 0.0),
        )
        .expect("axial load assignment succeeds");
    truss
        .set_member_section(
            geometry.member,
            CrossSection::custom(properties.area, properties.moment_of_inertia)
                .expect("valid section"),
        )
        .expect("member section assignment succeeds");
    truss
        .set_member_material(geometry.member, Material::A36_STEEL)
        .expect("member material assignment succeeds");

    properties
}

#[test]
fn builds_expected_topology() {
    let (truss, geometry) = build_cantilever_truss();

    assert_eq!(truss.joint_count(), 2);
    assert_eq!(truss.member_count(), 1);
    assert_eq!(geometry.fixed_joint.index(), 0);
    assert_eq!(geometry.loaded_joint.index(), 1);
    assert_eq!(geometry.member.index(), 0);
    assert_eq!(
        truss.member_joints(geometry.member),
        Some((geometry.fixed_joint, geometry.loaded_joint))
    );
}

#[test]
fn applies_conditions_and_analyzes() {
    let (mut truss, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut truss, &geometry);

    assert_relative_eq!(
        truss.member_section(geometry.member).expect("member exists").area(),
        properties.area
    );
    truss.analyze().expect("cantilever analysis succeeds");
}

#[test]
fn cantilever_response_matches_closed_form_solution() {
    let (mut truss, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut truss, &geometry);
    let steel = Material::A36_STEEL;

    let result = truss
        .analyze()
        .expect("cantilever analysis produces results");

    let displacement = result
        .joint_displacement(geometry.loaded_joint)
        .expect("cantilever displacement available");
    let axial_force = result
        .member_axial_force(geometry.member)
        .expect("cantilever axial force available");
    let axial_stress = result
        .member_stress(geometry.member)
        .expect("cantilever axial stress available");
    let fos_yielding = result
        .member_fos_yielding(geometry.member)
        .expect("cantilever yield factor of safety available");

    let expected_displacement =
        properties.axial_load * 1.0 / (properties.area * steel.elastic_modulus);

    assert_relative_eq!(displacement.x, expected_displacement, epsilon = 1.0e-12);
    assert_relative_eq!(displacement.y, 0.0);
    assert_relative_eq!(displacement.z, 0.0);

    assert_relative_eq!(axial_force, properties.axial_load, epsilon = 1.0e-9);
    assert_relative_eq!(
        axial_stress,
        properties.axial_load / properties.area,
        epsilon = 1.0e-6
    );
    assert_relative_eq!(
        fos_yielding,
        steel.yield_strength / axial_stress.abs(),
        epsilon = 1.0e-6
    );
}

#[test]
fn compressed_cantilever_reports_buckling() {
    let (mut truss, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut truss, &geometry);
    let steel = Material::A36_STEEL;

    let result = truss.analyze().expect("analysis succeeds");

    let critical =
        std::f64::consts::PI.powi(2) * steel.elastic_modulus * properties.moment_of_inertia;
    let fos_buckling = result
        .member_fos_buckling(geometry.member)
        .expect("member is in compression");
    assert_relative_eq!(
        fos_buckling,
        critical / properties.axial_load.abs(),
        max_relative = 1.0e-9
    );

    let governing = result.governing.expect("one member");
    assert_eq!(governing.member, geometry.member);
    let expected_state = if fos_buckling < result.fos_yielding() {
        LimitState::Buckling
    } else {
        LimitState::Yielding
    };
    assert_eq!(governing.limit_state, expected_state);
}

#[test]
fn reactions_balance_the_applied_load() {
    let (mut truss, geometry) = build_cantilever_truss();
    let properties = apply_cantilever_conditions(&mut truss, &geometry);

    let result = truss.analyze().expect("analysis succeeds");
    let reaction = result
        .joint_reaction(geometry.fixed_joint)
        .expect("reaction available");

    assert_relative_eq!(reaction.x, -properties.axial_load, epsilon = 1.0e-6);
    assert_relative_eq!(reaction.y, 0.0, epsilon = 1.0e-9);
    assert_relative_eq!(reaction.z, 0.0, epsilon = 1.0e-9);
}
