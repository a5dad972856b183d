//! Loss-coefficient correlations for the built-in loss registry.
//!
//! Tabulated correlations follow Idel'chik's diagrams and are linearly
//! interpolated, clamped to the table ends.

use crate::formula::FormulaError;
use pd_core::numeric::interp_clamped;

type FormulaResult = Result<f64, FormulaError>;

fn table(x: f64, xs: &[f64], ys: &[f64], param: &'static str) -> FormulaResult {
    interp_clamped(x, xs, ys).ok_or_else(|| FormulaError::domain(param, "empty lookup table"))
}

fn area_ratio(inlet_area: f64, outlet_area: f64) -> Result<f64, FormulaError> {
    if inlet_area <= 0.0 {
        return Err(FormulaError::domain("inlet_area", "must be positive"));
    }
    if outlet_area <= 0.0 {
        return Err(FormulaError::domain("outlet_area", "must be positive"));
    }
    Ok(outlet_area / inlet_area)
}

/// Discharge into a large plenum loses the full dynamic head.
pub fn free_discharge() -> FormulaResult {
    Ok(1.0)
}

/// Borda-Carnot: `(1 - A_in / A_out)²`.
pub fn sudden_expansion(inlet_area: f64, outlet_area: f64) -> FormulaResult {
    let r = area_ratio(inlet_area, outlet_area)?;
    Ok((1.0 - 1.0 / r).powi(2))
}

/// Sharp-edged sudden contraction, Diagram 4.9 (Re > 3.5e4).
pub fn sudden_contraction(inlet_area: f64, outlet_area: f64) -> FormulaResult {
    const RATIO: [f64; 7] = [0.0, 0.2, 0.4, 0.6, 0.8, 0.9, 1.0];
    const ZETA: [f64; 7] = [1.00, 0.85, 0.68, 0.503, 0.300, 0.178, 0.00];

    let r = area_ratio(inlet_area, outlet_area)?.clamp(0.0, 1.0);
    table(r, &RATIO, &ZETA, "outlet_area")
}

/// Turbulent Darcy friction factor of a concentric annulus, Diagram 2.7:
///
/// `1/λ_ann = (0.02 r + 0.98) (1/λ_circ - 0.27 r + 0.1)`, `r = D_inner / D_outer`.
///
/// `lambda_circ` is the round-pipe factor at the same Reynolds number and
/// roughness.
pub fn f_annulus_turbulent(lambda_circ: f64, d_outer: f64, d_inner: f64) -> FormulaResult {
    if d_outer <= 0.0 {
        return Err(FormulaError::domain("D_outer", "must be positive"));
    }
    if d_inner <= 0.0 {
        return Err(FormulaError::domain("D_inner", "must be positive"));
    }
    if d_inner >= d_outer {
        return Err(FormulaError::domain("D_inner", "must be smaller than D_outer"));
    }
    if lambda_circ <= 0.0 {
        return Err(FormulaError::domain("lambda_circ", "must be positive"));
    }

    let r = d_inner / d_outer;
    let inv_lambda = (0.02 * r + 0.98) * (1.0 / lambda_circ - 0.27 * r + 0.1);
    if inv_lambda <= 0.0 {
        return Err(FormulaError::domain(
            "lambda_circ",
            "yields a non-positive reciprocal friction factor",
        ));
    }
    Ok(1.0 / inv_lambda)
}

/// Sharp, thick-edged inlet facing a baffle, Diagram 3.8:
/// `ζ = 0.5 + σ1(h / D_h)`, with `σ1 = 0` once `h / D_h >= 1`.
pub fn sharp_thick_inlet_facing_baffle(baffle_gap: f64, hydraulic_diameter: f64) -> FormulaResult {
    const GAP_RATIO: [f64; 8] = [0.20, 0.30, 0.40, 0.50, 0.60, 0.70, 0.80, 1.00];
    const SIGMA1: [f64; 8] = [1.60, 0.65, 0.37, 0.25, 0.15, 0.07, 0.04, 0.00];
    const K_PRIME: f64 = 0.5;

    if hydraulic_diameter <= 0.0 {
        return Err(FormulaError::domain("hydraulic_diameter", "must be positive"));
    }
    let r = baffle_gap / hydraulic_diameter;
    let sigma1 = if r >= 1.0 {
        0.0
    } else {
        table(r, &GAP_RATIO, &SIGMA1, "baffle_gap")?
    };
    Ok(K_PRIME + sigma1)
}

/// Straight tube discharging onto a baffle, Diagram 11.7 (α = 0°).
/// Tabulated only for `h / D` in `[0.5, 1.0]`.
pub fn discharge_from_straight_tube_to_baffle(
    baffle_gap: f64,
    hydraulic_diameter: f64,
) -> FormulaResult {
    const GAP_RATIO: [f64; 4] = [0.50, 0.60, 0.70, 1.00];
    const ZETA: [f64; 4] = [1.37, 1.20, 1.11, 1.00];

    if hydraulic_diameter <= 0.0 {
        return Err(FormulaError::domain("hydraulic_diameter", "must be positive"));
    }
    table(baffle_gap / hydraulic_diameter, &GAP_RATIO, &ZETA, "baffle_gap")
}

/// Smooth conical diffuser, area ratio 2, Re ≈ 1e5. `diverging_angle` in degrees.
pub fn smooth_cone_diffuser_nar1(diverging_angle: f64) -> FormulaResult {
    const ALPHA: [f64; 14] = [
        3.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 20.0, 30.0, 45.0, 60.0, 90.0, 120.0,
    ];
    const ZETA: [f64; 14] = [
        0.120, 0.106, 0.090, 0.083, 0.080, 0.088, 0.102, 0.122, 0.196, 0.298, 0.297, 0.286, 0.283,
        0.279,
    ];

    table(diverging_angle, &ALPHA, &ZETA, "diverging_angle")
}

fn beveled_contraction(
    zeta_pp: &[f64],
    bevel_length: f64,
    hydraulic_diameter: f64,
    inlet_area: f64,
    outlet_area: f64,
) -> FormulaResult {
    const LENGTH_RATIO: [f64; 6] = [0.025, 0.050, 0.075, 0.10, 0.15, 0.60];

    let r = area_ratio(inlet_area, outlet_area)?;
    if r > 1.0 {
        return Err(FormulaError::domain(
            "outlet_area",
            "outlet_area / inlet_area must be in (0, 1]",
        ));
    }
    if hydraulic_diameter <= 0.0 {
        return Err(FormulaError::domain("hydraulic_diameter", "must be positive"));
    }
    let zeta = table(
        bevel_length / hydraulic_diameter,
        &LENGTH_RATIO,
        zeta_pp,
        "bevel_length",
    )?;
    Ok(zeta * (1.0 - r).powf(0.75))
}

/// Beveled contraction, α = 60°: `ζ = ζ''(l / D_h) (1 - A_out / A_in)^(3/4)`,
/// referenced to the downstream velocity.
pub fn beveled_contraction_alpha60(
    bevel_length: f64,
    hydraulic_diameter: f64,
    inlet_area: f64,
    outlet_area: f64,
) -> FormulaResult {
    const ZETA_PP: [f64; 6] = [0.40, 0.30, 0.23, 0.18, 0.15, 0.12];
    beveled_contraction(&ZETA_PP, bevel_length, hydraulic_diameter, inlet_area, outlet_area)
}

/// Beveled contraction, α = 140°.
pub fn beveled_contraction_alpha140(
    bevel_length: f64,
    hydraulic_diameter: f64,
    inlet_area: f64,
    outlet_area: f64,
) -> FormulaResult {
    const ZETA_PP: [f64; 6] = [0.45, 0.42, 0.40, 0.38, 0.37, 0.36];
    beveled_contraction(&ZETA_PP, bevel_length, hydraulic_diameter, inlet_area, outlet_area)
}
