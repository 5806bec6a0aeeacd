//! Member and structure mass.

use crate::errors::AnalysisError;
use crate::material::Material;
use crate::section::CrossSection;
use crate::settings::AnalysisSettings;
use crate::truss::Truss;

/// Mass of a member in kilograms: area times length times density.
#[must_use]
pub fn member_mass(section: &CrossSection, material: &Material, length: f64) -> f64 {
    section.area() * length * material.density
}

/// Sum of every member's mass.
pub(crate) fn total_mass(truss: &Truss, settings: &AnalysisSettings) -> Result<f64, AnalysisError> {
    truss.members().try_fold(0.0, |total, view| {
        let geometry = truss.geometry(&view, settings)?;
        Ok(total + member_mass(&view.member.section, &view.member.material, geometry.length))
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::point;

    #[test]
    fn member_mass_is_linear_density_times_length() {
        let section = CrossSection::custom(2.0e-4, 1.0e-9).expect("valid");
        assert_relative_eq!(member_mass(&section, &Material::A36_STEEL, 3.0), 4.68);
    }

    #[test]
    fn adding_a_member_adds_its_mass() {
        let mut truss = Truss::new();
        let a = truss.add_joint(point(0.0, 0.0, 0.0));
        let b = truss.add_joint(point(2.0, 0.0, 0.0));
        let c = truss.add_joint(point(2.0, 1.5, 0.0));
        truss.add_member(a, b).expect("joints exist");
        truss.add_member(b, c).expect("joints exist");
        let before = truss.mass().expect("valid truss");

        let ac = truss.add_member(a, c).expect("joints exist");
        truss
            .set_member_material(ac, Material::ALUMINUM_6061_T6)
            .expect("member exists");
        let after = truss.mass().expect("valid truss");

        let expected = member_mass(&CrossSection::default(), &Material::ALUMINUM_6061_T6, 2.5);
        assert!(after > before);
        assert_relative_eq!(after - before, expected, max_relative = 1.0e-12);
    }

    #[test]
    fn truss_without_members_is_massless() {
        let mut truss = Truss::new();
        truss.add_joint(point(0.0, 0.0, 0.0));
        assert_eq!(truss.mass(), Ok(0.0));
    }
}
