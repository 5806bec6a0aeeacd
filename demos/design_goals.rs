use trussfos::{
    force, point, AnalysisSettings, Axis, DesignGoals, Material, Shape, Support, Truss,
};

const GOALS: &str = r#"{
    "minimum_fos_total": 1.5,
    "minimum_fos_buckling": 2.0,
    "maximum_mass": 250.0,
    "maximum_deflection": 0.01
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Six metre Pratt truss with three bays
    let mut truss = Truss::planar();
    let bottom: Vec<_> = (0..4)
        .map(|bay| truss.add_joint(point(2.0 * f64::from(bay), 0.0, 0.0)))
        .collect();
    let top: Vec<_> = (1..3)
        .map(|bay| truss.add_joint(point(2.0 * f64::from(bay), 2.0, 0.0)))
        .collect();
    truss.set_support(bottom[0], Support::pinned())?;
    truss.set_support(bottom[3], Support::roller(Axis::Y))?;
    for &joint in &bottom[1..3] {
        truss.set_load(joint, force(0.0, -40_000.0, 0.0))?;
    }

    for pair in bottom.windows(2) {
        truss.add_member(pair[0], pair[1])?;
    }
    truss.add_member(top[0], top[1])?;
    truss.add_member(bottom[0], top[0])?;
    truss.add_member(top[1], bottom[3])?;
    truss.add_member(bottom[1], top[0])?;
    truss.add_member(bottom[2], top[1])?;
    truss.add_member(top[0], bottom[2])?;

    truss.set_material_for_all(&Material::A992_STEEL)?;
    for member in truss.member_ids() {
        truss.set_member_shape(
            member,
            Shape::Box {
                width: 0.08,
                height: 0.08,
                thickness: 0.005,
            },
        )?;
    }

    let settings = AnalysisSettings::default().with_self_weight(true);
    let result = truss.analyze_with(&settings)?;
    let goals = DesignGoals::from_json_str(GOALS)?;
    let assessment = goals.assess(&result);

    println!("{}", serde_json::to_string_pretty(&assessment)?);
    if assessment.all_satisfied() {
        println!("Design meets every goal.");
    } else {
        for recommendation in &assessment.recommendations {
            println!(
                "Strengthen member {} against {:?}: FOS {:.2} < {:.2}",
                recommendation.member.index(),
                recommendation.limit_state,
                recommendation.fos,
                recommendation.required
            );
        }
    }

    Ok(())
}
