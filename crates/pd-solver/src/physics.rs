//! Pressure-drop relations in SI base units.

/// Mean velocity of `mdot` through `splits` parallel passages of `area`.
pub fn velocity(mdot: f64, density: f64, area: f64, splits: u32) -> f64 {
    mdot / (density * area * f64::from(splits))
}

/// `½ ρ v²`
pub fn dynamic_pressure(density: f64, velocity: f64) -> f64 {
    0.5 * density * velocity * velocity
}

/// Local form loss, `K · ½ ρ v²`.
pub fn junction_loss(k: f64, density: f64, velocity: f64) -> f64 {
    k * dynamic_pressure(density, velocity)
}

/// Darcy–Weisbach friction, `f · L/D_h · ½ ρ v²`.
pub fn pipe_friction(
    f: f64,
    length: f64,
    hydraulic_diameter: f64,
    density: f64,
    velocity: f64,
) -> f64 {
    f * (length / hydraulic_diameter) * dynamic_pressure(density, velocity)
}

/// Hydrostatic head `ρ g L · sign`; sign is +1 climbing, -1 descending.
pub fn hydrostatic(density: f64, gravity: f64, length: f64, sign: f64) -> f64 {
    density * gravity * length * sign
}

/// Kinetic energy change `½ ρ (v_out² − v_in²)`.
pub fn acceleration(density: f64, v_in: f64, v_out: f64) -> f64 {
    dynamic_pressure(density, v_out) - dynamic_pressure(density, v_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junction_matches_hand_calculation() {
        let v = velocity(4000.0, 8000.0, std::f64::consts::FRAC_PI_4, 1);
        assert!((v - 0.636_619_77).abs() < 1e-8);
        let dp = junction_loss(14.7, 8000.0, v);
        assert!((dp - 23_830.6).abs() < 1.0);
    }

    #[test]
    fn splits_reduce_velocity() {
        let one = velocity(10.0, 1000.0, 0.01, 1);
        let four = velocity(10.0, 1000.0, 0.01, 4);
        assert!((one / four - 4.0).abs() < 1e-12);
    }

    #[test]
    fn friction_scales_with_length_over_diameter() {
        let a = pipe_friction(0.02, 1.0, 0.1, 1000.0, 2.0);
        let b = pipe_friction(0.02, 2.0, 0.1, 1000.0, 2.0);
        assert!((a - 400.0).abs() < 1e-9);
        assert!((b - 2.0 * a).abs() < 1e-9);
    }

    #[test]
    fn optional_terms() {
        assert_eq!(hydrostatic(1000.0, 10.0, 2.0, 0.0), 0.0);
        assert_eq!(hydrostatic(1000.0, 10.0, 2.0, -1.0), -20_000.0);
        assert_eq!(acceleration(1000.0, 1.0, 2.0), 1500.0);
        assert_eq!(acceleration(1000.0, 2.0, 2.0), 0.0);
    }
}
