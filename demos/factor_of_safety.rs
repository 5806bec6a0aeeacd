use trussfos::{force, point, CrossSection, Material, Support, Truss};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Create a simple truss with two joints and one member
    let mut truss = Truss::new();

    // Define joints
    let joint_a = truss.add_joint(point(0.0, 0.0, 0.0));
    let joint_b = truss.add_joint(point(1.0, 0.0, 0.0));

    // Define supports and loads
    truss.set_support(joint_a, Support::pinned())?;
    truss.set_support(joint_b, [false, true, true])?;
    truss.set_load(joint_b, force(-5_000.0, 0.0, 0.0))?;

    // Define member properties
    let member_ab = truss.add_member(joint_a, joint_b)?;
    truss.set_member_section(member_ab, CrossSection::custom(0.005, 2.0e-6)?)?;
    truss.set_member_material(member_ab, Material::A992_STEEL)?;

    let result = truss.analyze()?;

    if let Some(fos) = result.member_fos_yielding(member_ab) {
        println!("Member AB yield factor of safety: {fos:.2}");
    }
    match result.member_fos_buckling(member_ab) {
        Some(fos) => println!("Member AB buckling factor of safety: {fos:.2}"),
        None => println!("Member AB is not in compression."),
    }
    if let Some(governing) = result.governing {
        println!(
            "Governing factor of safety: {:.2} ({:?})",
            governing.fos, governing.limit_state
        );
    }

    Ok(())
}
