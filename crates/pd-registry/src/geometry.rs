//! Cross-section formulas for the built-in geometry registry.

use crate::formula::FormulaError;
use std::f64::consts::PI;

type FormulaResult = Result<f64, FormulaError>;

fn non_negative(value: f64, param: &'static str) -> Result<f64, FormulaError> {
    if value < 0.0 {
        Err(FormulaError::domain(param, "must be non-negative"))
    } else {
        Ok(value)
    }
}

fn positive(value: f64, param: &'static str) -> Result<f64, FormulaError> {
    if value <= 0.0 {
        Err(FormulaError::domain(param, "must be positive"))
    } else {
        Ok(value)
    }
}

/// Area of a circle with diameter `d`.
pub fn area_circle(d: f64) -> FormulaResult {
    let d = non_negative(d, "D")?;
    Ok(PI * d * d / 4.0)
}

/// Area of an `l` x `w` rectangle.
pub fn area_rectangle(l: f64, w: f64) -> FormulaResult {
    Ok(non_negative(l, "L")? * non_negative(w, "w")?)
}

/// Slot of width `b` with semicircular ends and straight length `l`:
/// `A = b L + π b² / 4`.
pub fn area_capsule_slot(b: f64, l: f64) -> FormulaResult {
    Ok(area_rectangle(l, b)? + area_circle(b)?)
}

/// Concentric annulus: `A = π (D_outer² - D_inner²) / 4`.
pub fn area_annulus(d_outer: f64, d_inner: f64) -> FormulaResult {
    let d_outer = non_negative(d_outer, "D_outer")?;
    let d_inner = non_negative(d_inner, "D_inner")?;
    if d_inner > d_outer {
        return Err(FormulaError::domain("D_inner", "must not exceed D_outer"));
    }
    Ok(PI * (d_outer * d_outer - d_inner * d_inner) / 4.0)
}

pub fn wetted_perimeter_circle(d: f64) -> FormulaResult {
    Ok(PI * non_negative(d, "D")?)
}

/// Equals the diameter for a full circular pipe.
pub fn hydraulic_diameter_circle(d: f64) -> FormulaResult {
    non_negative(d, "D")
}

/// Concentric annulus (Idel'chik): `D_h = D_outer - D_inner`.
pub fn hydraulic_diameter_annulus(d_outer: f64, d_inner: f64) -> FormulaResult {
    let d_outer = non_negative(d_outer, "D_outer")?;
    let d_inner = non_negative(d_inner, "D_inner")?;
    if d_inner > d_outer {
        return Err(FormulaError::domain("D_inner", "must not exceed D_outer"));
    }
    Ok(d_outer - d_inner)
}

/// `D_h = 4 A / P_w`.
pub fn hydraulic_diameter_generic(a: f64, p_w: f64) -> FormulaResult {
    let a = non_negative(a, "A")?;
    Ok(4.0 * a / positive(p_w, "P_w")?)
}

/// Rectangular `a` x `b` slot: `D_h = 2ab / (a + b)`.
pub fn hydraulic_diameter_rect_slot(a: f64, b: f64) -> FormulaResult {
    let a = non_negative(a, "a")?;
    let b = non_negative(b, "b")?;
    if a + b <= 0.0 {
        return Err(FormulaError::domain("a", "a + b must be positive"));
    }
    Ok(2.0 * a * b / (a + b))
}

/// Capsule slot: `4A / P_w` with `A = bL + πb²/4`, `P_w = 2L + πb`.
pub fn hydraulic_diameter_capsule_slot(b: f64, l: f64) -> FormulaResult {
    let area = area_capsule_slot(b, l)?;
    let perimeter = 2.0 * l + PI * b;
    Ok(4.0 * area / positive(perimeter, "b")?)
}
