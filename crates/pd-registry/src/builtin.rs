//! Stock registries populated with the formulas in [`crate::geometry`] and
//! [`crate::loss`].

use crate::formula::Formula;
use crate::registry::{GeomRegistry, LossRegistry};
use crate::{geometry, loss};

/// Geometry registry with every built-in cross-section formula.
pub fn geometry_registry() -> GeomRegistry {
    let mut reg = GeomRegistry::new();
    reg.insert("area_circle", Formula::new(&["D"], |a: &[f64]| geometry::area_circle(a[0])));
    reg.insert(
        "area_rectangle",
        Formula::new(&["L", "w"], |a: &[f64]| geometry::area_rectangle(a[0], a[1])),
    );
    reg.insert(
        "area_annulus",
        Formula::new(&["D_outer", "D_inner"], |a: &[f64]| {
            geometry::area_annulus(a[0], a[1])
        }),
    );
    reg.insert(
        "area_capsule_slot",
        Formula::new(&["b", "L"], |a: &[f64]| geometry::area_capsule_slot(a[0], a[1])),
    );
    reg.insert(
        "wetted_perimeter_circle",
        Formula::new(&["D"], |a: &[f64]| geometry::wetted_perimeter_circle(a[0])),
    );
    reg.insert(
        "hydraulic_diameter_circle",
        Formula::new(&["D"], |a: &[f64]| geometry::hydraulic_diameter_circle(a[0])),
    );
    reg.insert(
        "hydraulic_diameter_annulus",
        Formula::new(&["D_outer", "D_inner"], |a: &[f64]| {
            geometry::hydraulic_diameter_annulus(a[0], a[1])
        }),
    );
    reg.insert(
        "hydraulic_diameter_generic",
        Formula::new(&["A", "P_w"], |a: &[f64]| {
            geometry::hydraulic_diameter_generic(a[0], a[1])
        }),
    );
    reg.insert(
        "hydraulic_diameter_rect_slot",
        Formula::new(&["a", "b"], |a: &[f64]| {
            geometry::hydraulic_diameter_rect_slot(a[0], a[1])
        }),
    );
    reg.insert(
        "hydraulic_diameter_capsule_slot",
        Formula::new(&["b", "L"], |a: &[f64]| {
            geometry::hydraulic_diameter_capsule_slot(a[0], a[1])
        }),
    );
    reg
}

/// Loss registry with every built-in form-loss and friction correlation.
pub fn loss_registry() -> LossRegistry {
    let mut reg = LossRegistry::new();
    reg.insert("free_discharge", Formula::new(&[], |_: &[f64]| loss::free_discharge()));
    reg.insert(
        "sudden_expansion",
        Formula::new(&["inlet_area", "outlet_area"], |a: &[f64]| {
            loss::sudden_expansion(a[0], a[1])
        }),
    );
    reg.insert(
        "sudden_contraction",
        Formula::new(&["inlet_area", "outlet_area"], |a: &[f64]| {
            loss::sudden_contraction(a[0], a[1])
        }),
    );
    reg.insert(
        "f_annulus_turbulent",
        Formula::new(&["lambda_circ", "D_outer", "D_inner"], |a: &[f64]| {
            loss::f_annulus_turbulent(a[0], a[1], a[2])
        }),
    );
    reg.insert(
        "sharp_thick_inlet_facing_baffle",
        Formula::new(&["baffle_gap", "hydraulic_diameter"], |a: &[f64]| {
            loss::sharp_thick_inlet_facing_baffle(a[0], a[1])
        }),
    );
    reg.insert(
        "discharge_from_straight_tube_to_baffle",
        Formula::new(&["baffle_gap", "hydraulic_diameter"], |a: &[f64]| {
            loss::discharge_from_straight_tube_to_baffle(a[0], a[1])
        }),
    );
    reg.insert(
        "smooth_cone_diffuser_nar1",
        Formula::new(&["diverging_angle"], |a: &[f64]| {
            loss::smooth_cone_diffuser_nar1(a[0])
        }),
    );
    reg.insert(
        "beveled_contraction_alpha60",
        Formula::new(
            &["bevel_length", "hydraulic_diameter", "inlet_area", "outlet_area"],
            |a: &[f64]| loss::beveled_contraction_alpha60(a[0], a[1], a[2], a[3]),
        ),
    );
    reg.insert(
        "beveled_contraction_alpha140",
        Formula::new(
            &["bevel_length", "hydraulic_diameter", "inlet_area", "outlet_area"],
            |a: &[f64]| loss::beveled_contraction_alpha140(a[0], a[1], a[2], a[3]),
        ),
    );
    reg
}
