#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};
use trussfos::{
    euler_critical_load, force, point, AnalysisResult, Axis, CrossSection, LimitState, Material,
    Support, Truss,
};

const LOAD: f64 = 10_000.0;

/// 3-4-5 triangle: pinned at A, rolling on Y at B, loaded downwards at the apex C.
struct Triangle {
    truss: Truss,
    a: NodeIndex,
    b: NodeIndex,
    c: NodeIndex,
    ab: EdgeIndex,
    bc: EdgeIndex,
    ac: EdgeIndex,
}

fn triangle() -> Triangle {
    let mut truss = Truss::planar();
    let a = truss.add_supported_joint(point(0.0, 0.0, 0.0), Support::pinned());
    let b = truss.add_supported_joint(point(5.0, 0.0, 0.0), Support::roller(Axis::Y));
    let c = truss.add_joint(point(3.2, 2.4, 0.0));
    truss
        .set_load(c, force(0.0, -LOAD, 0.0))
        .expect("apex exists");
    let ab = truss.add_member(a, b).expect("joints exist");
    let bc = truss.add_member(b, c).expect("joints exist");
    let ac = truss.add_member(a, c).expect("joints exist");
    Triangle {
        truss,
        a,
        b,
        c,
        ab,
        bc,
        ac,
    }
}

fn analyzed() -> (Triangle, AnalysisResult) {
    let model = triangle();
    let result = model.truss.analyze().expect("triangle is stable");
    (model, result)
}

#[test]
fn member_lengths_follow_joint_positions() {
    let model = triangle();
    assert_relative_eq!(model.truss.member_length(model.ab).expect("exists"), 5.0);
    assert_relative_eq!(
        model.truss.member_length(model.bc).expect("exists"),
        3.0,
        epsilon = 1.0e-12
    );
    assert_relative_eq!(
        model.truss.member_length(model.ac).expect("exists"),
        4.0,
        epsilon = 1.0e-12
    );
}

#[test]
fn member_forces_match_method_of_joints() {
    let (model, result) = analyzed();

    let ab = result.member_axial_force(model.ab).expect("force available");
    let bc = result.member_axial_force(model.bc).expect("force available");
    let ac = result.member_axial_force(model.ac).expect("force available");

    assert_relative_eq!(ab, 0.48 * LOAD, max_relative = 1.0e-9);
    assert_relative_eq!(bc, -0.8 * LOAD, max_relative = 1.0e-9);
    assert_relative_eq!(ac, -0.6 * LOAD, max_relative = 1.0e-9);

    assert!(result.member(model.ab).expect("exists").is_tension());
    assert!(!result.member(model.ac).expect("exists").is_tension());
}

#[test]
fn reactions_match_statics() {
    let (model, result) = analyzed();

    let at_a = result.joint_reaction(model.a).expect("reaction available");
    let at_b = result.joint_reaction(model.b).expect("reaction available");
    let at_c = result.joint_reaction(model.c).expect("reaction available");

    assert_relative_eq!(at_a.x, 0.0, epsilon = 1.0e-6);
    assert_relative_eq!(at_a.y, 0.36 * LOAD, max_relative = 1.0e-9);
    assert_relative_eq!(at_b.x, 0.0);
    assert_relative_eq!(at_b.y, 0.64 * LOAD, max_relative = 1.0e-9);
    assert_eq!(at_c.x, 0.0);
    assert_eq!(at_c.y, 0.0);
}

#[test]
fn reactions_and_loads_are_in_equilibrium() {
    let (model, result) = analyzed();

    let (mut sum_x, mut sum_y) = (0.0, 0.0);
    for joint in model.truss.joint_ids() {
        let load = model.truss.joint_load(joint).expect("joint exists");
        let reaction = result.joint_reaction(joint).expect("reaction available");
        sum_x += load.x + reaction.x;
        sum_y += load.y + reaction.y;
    }
    assert_relative_eq!(sum_x, 0.0, epsilon = 1.0e-6);
    assert_relative_eq!(sum_y, 0.0, epsilon = 1.0e-6);
}

#[test]
fn restrained_axes_do_not_move() {
    let (model, result) = analyzed();

    let at_a = result.joint_displacement(model.a).expect("displacement available");
    let at_b = result.joint_displacement(model.b).expect("displacement available");
    let at_c = result.joint_displacement(model.c).expect("displacement available");

    assert_eq!((at_a.x, at_a.y, at_a.z), (0.0, 0.0, 0.0));
    assert_eq!(at_b.y, 0.0);
    assert!(at_b.x > 0.0, "tension in AB stretches the base");
    assert!(at_c.y < 0.0, "apex deflects under the load");
    assert_eq!(at_c.z, 0.0);
}

#[test]
fn factors_of_safety_follow_closed_form() {
    let (model, result) = analyzed();
    let section = CrossSection::default();
    let steel = Material::A36_STEEL;

    let capacity = steel.yield_strength * section.area();
    assert_relative_eq!(
        result.member_fos_yielding(model.ab).expect("exists"),
        capacity / (0.48 * LOAD),
        max_relative = 1.0e-9
    );
    assert_relative_eq!(
        result.member_fos_yielding(model.ac).expect("exists"),
        capacity / (0.6 * LOAD),
        max_relative = 1.0e-9
    );

    assert_eq!(result.member_fos_buckling(model.ab), None);
    let critical_ac = euler_critical_load(steel.elastic_modulus, section.moment_of_inertia(), 4.0);
    assert_relative_eq!(
        result.member_fos_buckling(model.ac).expect("AC is in compression"),
        critical_ac / (0.6 * LOAD),
        max_relative = 1.0e-9
    );
}

#[test]
fn governing_fos_is_the_smallest_member_value() {
    let (_, result) = analyzed();

    let smallest = result
        .members
        .iter()
        .map(|member| member.limiting_fos().0)
        .fold(f64::INFINITY, f64::min);
    let governing = result.governing.expect("triangle has members");

    assert_relative_eq!(governing.fos, smallest);
    assert_relative_eq!(result.fos(), smallest);
    let member = result.member(governing.member).expect("governing member exists");
    assert_eq!(member.limiting_fos(), (governing.fos, governing.limit_state));
    assert_eq!(result.limit_state(), Some(governing.limit_state));
}

#[test]
fn longest_compression_member_buckles_first() {
    let (model, result) = analyzed();
    let governing = result.governing.expect("triangle has members");

    let ac = result.member_fos_buckling(model.ac).expect("compression");
    let bc = result.member_fos_buckling(model.bc).expect("compression");
    let expected = if ac <= bc { model.ac } else { model.bc };
    assert_eq!(governing.limit_state, LimitState::Buckling);
    assert_eq!(governing.member, expected);
}

#[test]
fn mass_sums_member_masses() {
    let (model, result) = analyzed();
    let expected = CrossSection::default().area() * 12.0 * Material::A36_STEEL.density;

    assert_relative_eq!(result.mass, expected, max_relative = 1.0e-12);
    assert_relative_eq!(
        model.truss.mass().expect("valid truss"),
        result.mass,
        max_relative = 1.0e-12
    );
}

#[test]
fn results_serialize_to_json() {
    let (_, result) = analyzed();
    let json = serde_json::to_string(&result).expect("results serialize");
    let parsed: AnalysisResult = serde_json::from_str(&json).expect("results deserialize");
    assert_eq!(parsed.members.len(), 3);

    let governing = result.governing.expect("triangle has members");
    let reparsed = parsed.governing.expect("governing survives");
    assert_eq!(reparsed.member, governing.member);
    assert_eq!(reparsed.limit_state, governing.limit_state);
    assert_relative_eq!(reparsed.fos, governing.fos, max_relative = 1.0e-12);
}

#[test]
fn unloaded_members_serialize_with_infinite_fos() {
    let mut model = triangle();
    model
        .truss
        .set_load(model.c, force(0.0, 0.0, 0.0))
        .expect("apex exists");
    model
        .truss
        .set_load(model.b, force(LOAD, 0.0, 0.0))
        .expect("roller exists");
    let result = model.truss.analyze().expect("triangle is stable");

    assert_relative_eq!(
        result.member_axial_force(model.ab).expect("exists"),
        LOAD,
        max_relative = 1.0e-9
    );
    assert_eq!(result.member_fos_yielding(model.bc), Some(f64::INFINITY));
    assert_eq!(result.member_fos_yielding(model.ac), Some(f64::INFINITY));

    let json = serde_json::to_string(&result).expect("results serialize");
    assert!(json.contains(r#""fos_yielding":"inf""#));
    let parsed: AnalysisResult = serde_json::from_str(&json).expect("results deserialize");

    assert_eq!(parsed.member_fos_yielding(model.bc), Some(f64::INFINITY));
    assert_eq!(parsed.member_fos_yielding(model.ac), Some(f64::INFINITY));
    assert_eq!(parsed.member_fos_buckling(model.bc), None);
    assert_relative_eq!(
        parsed.member_fos_yielding(model.ab).expect("exists"),
        result.member_fos_yielding(model.ab).expect("exists"),
        max_relative = 1.0e-12
    );
}
