use trussfos::{force, point, Axis, Support, Truss};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // A planar triangle spanning four metres
    let mut truss = Truss::planar();

    // Define joints and supports
    let joint_a = truss.add_supported_joint(point(0.0, 0.0, 0.0), Support::pinned());
    let joint_b = truss.add_supported_joint(point(4.0, 0.0, 0.0), Support::roller(Axis::Y));
    let joint_c = truss.add_joint(point(2.0, 1.5, 0.0));

    // Load the apex
    truss.set_load(joint_c, force(0.0, -5_000.0, 0.0))?;

    // Connect the joints; members default to A36 steel pipe
    let member_ab = truss.add_member(joint_a, joint_b)?;
    let member_bc = truss.add_member(joint_b, joint_c)?;
    let member_ac = truss.add_member(joint_a, joint_c)?;

    let result = truss.analyze()?;

    for (name, member) in [("AB", member_ab), ("BC", member_bc), ("AC", member_ac)] {
        if let Some(axial_force) = result.member_axial_force(member) {
            println!("Member {name} axial force: {axial_force:.1} N");
        }
    }
    if let Some(displacement) = result.joint_displacement(joint_c) {
        println!(
            "Apex displacement: ({:.3e}, {:.3e}) m",
            displacement.x, displacement.y
        );
    }
    println!("Total mass: {:.2} kg", result.mass);

    Ok(())
}
