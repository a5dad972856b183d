//! CSV summary of a solved network.
//!
//! One row per component, inlet and outlet included. Pressures are written in
//! kPa, every number with three significant digits.

use pd_project::NetworkSpec;
use pd_solver::{ComponentResult, Solution, StepKind};

const COLUMNS: [(&str, &str); 20] = [
    ("name", ""),
    ("type", ""),
    ("mass_flow_rate", "kg/s"),
    ("inlet_velocity", "m/s"),
    ("outlet_velocity", "m/s"),
    ("ref_velocity", "m/s"),
    ("inlet_area", "m^2"),
    ("outlet_area", "m^2"),
    ("ref_area", "m^2"),
    ("length", "m"),
    ("hydraulic_diameter", "m"),
    ("friction_factor", "-"),
    ("form_loss", "-"),
    ("dp_gravity", "kPa"),
    ("dp_accel", "kPa"),
    ("dp_loss", "kPa"),
    ("inlet_pressure", "kPa"),
    ("outlet_pressure", "kPa"),
    ("pressure_drop", "kPa"),
    ("cumulative_dp", "kPa"),
];

pub fn header() -> String {
    COLUMNS
        .iter()
        .map(|(name, unit)| {
            if unit.is_empty() {
                name.to_string()
            } else {
                format!("{name} [{unit}]")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

pub fn summary_csv(network: &NetworkSpec, solution: &Solution) -> String {
    let mut csv = header();
    csv.push('\n');

    let mut results = solution.component_results.iter().peekable();
    let mut cumulative = 0.0;

    for (index, component) in network.components.iter().enumerate() {
        let mut row: Vec<String> = vec![String::new(); COLUMNS.len()];
        row[0] = csv_field(&component.name);
        row[1] = component.kind.type_name().to_string();

        match results.next_if(|r| r.index == index) {
            Some(r) => {
                fill_element(&mut row, r);
                cumulative = r.cumulative_dp;
            }
            None => row[19] = sig3(cumulative / 1000.0),
        }

        csv.push_str(&row.join(","));
        csv.push('\n');
    }
    csv
}

fn fill_element(row: &mut [String], r: &ComponentResult) {
    let kpa = |v: f64| sig3(v / 1000.0);
    let opt = |v: Option<f64>| v.map(sig3).unwrap_or_default();

    row[2] = sig3(r.mass_flow_rate);
    row[5] = sig3(r.velocity);
    row[8] = sig3(r.ref_area);
    row[15] = kpa(r.dp_loss);
    row[16] = kpa(r.inlet_pressure);
    row[17] = kpa(r.pressure);
    row[18] = kpa(r.pressure_drop);
    row[19] = kpa(r.cumulative_dp);

    match r.kind {
        StepKind::Junction => row[12] = sig3(r.coefficient),
        StepKind::Pipe => {
            row[3] = opt(r.inlet_velocity);
            row[4] = opt(r.outlet_velocity);
            row[6] = opt(r.geom.get("inlet_area"));
            row[7] = opt(r.geom.get("outlet_area"));
            row[9] = opt(r.geom.get("length"));
            row[10] = opt(r.geom.get("hydraulic_diameter"));
            row[11] = sig3(r.coefficient);
            row[13] = kpa(r.dp_gravity);
            row[14] = kpa(r.dp_accel);
        }
    }
}

/// Three significant digits, switching to `d.ddE±xx` outside `[1e-4, 1e3)`.
pub fn sig3(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{v:.2e}");
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return sci,
    };

    if !(-4..3).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}E{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }

    let decimals = usize::try_from(2 - exp).unwrap_or(0);
    trim_zeros(&format!("{v:.decimals$}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_significant_digits() {
        assert_eq!(sig3(0.0), "0");
        assert_eq!(sig3(1.0), "1");
        assert_eq!(sig3(0.636_62), "0.637");
        assert_eq!(sig3(100.0), "100");
        assert_eq!(sig3(23.8307), "23.8");
        assert_eq!(sig3(-76.169), "-76.2");
        assert_eq!(sig3(23_830.7), "2.38E+04");
        assert_eq!(sig3(0.000_012_34), "1.23E-05");
        assert_eq!(sig3(0.000_5), "0.0005");
    }

    #[test]
    fn header_carries_units() {
        let h = header();
        assert!(h.starts_with("name,type,mass_flow_rate [kg/s],"));
        assert!(h.ends_with("cumulative_dp [kPa]"));
        assert_eq!(h.split(',').count(), COLUMNS.len());
    }

    #[test]
    fn summary_rows_cover_every_component() {
        let network = pd_project::from_yaml_str(
            r#"
name: line
network:
  - name: in
    type: inlet
    flow: { mass_flow_rate: 2, density: 1000, pressure: 200000 }
  - name: k
    type: junction
    geom: { a: 0.01 }
    ref_area: { station: a }
    loss: { form: 2.0 }
  - name: p
    type: pipe
    geom: { inlet_area: 0.01, outlet_area: 0.01, hydraulic_diameter: 0.1, length: 5 }
    ref_area: { station: inlet_area }
    loss: { friction: 0.02 }
  - name: out
    type: outlet
"#,
        )
        .unwrap();
        let solution = pd_solver::solve(
            &network,
            &pd_registry::builtin::geometry_registry(),
            &pd_registry::builtin::loss_registry(),
        )
        .unwrap();

        let csv = summary_csv(&network, &solution);
        let rows: Vec<Vec<&str>> = csv.lines().map(|l| l.split(',').collect()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].join(","), header());

        // Boundary rows carry only the running total.
        let inlet = &rows[1];
        assert_eq!(&inlet[..2], ["in", "inlet"]);
        assert!(inlet[2..19].iter().all(|c| c.is_empty()));
        assert_eq!(inlet[19], "0");

        let junction = &rows[2];
        assert_eq!(&junction[..3], ["k", "junction", "2"]);
        assert_eq!(junction[5], "0.2");
        assert_eq!(junction[8], "0.01");
        assert_eq!(junction[12], "2");
        assert_eq!(junction[15], "0.04");
        assert_eq!(junction[16], "200");
        assert_eq!(junction[18], "0.04");
        for pipe_only in [3, 4, 6, 7, 9, 10, 11, 13, 14] {
            assert!(junction[pipe_only].is_empty(), "column {pipe_only}");
        }

        let pipe = &rows[3];
        assert_eq!(&pipe[..2], ["p", "pipe"]);
        assert_eq!(&pipe[3..5], ["0.2", "0.2"]);
        assert_eq!(&pipe[6..8], ["0.01", "0.01"]);
        assert_eq!(&pipe[9..12], ["5", "0.1", "0.02"]);
        assert!(pipe[12].is_empty());
        assert_eq!(&pipe[13..16], ["0", "0", "0.02"]);
        assert_eq!(pipe[19], "0.06");

        let outlet = &rows[4];
        assert_eq!(&outlet[..2], ["out", "outlet"]);
        assert!(outlet[2..19].iter().all(|c| c.is_empty()));
        assert_eq!(outlet[19], "0.06");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        assert_eq!(csv_field("tee, north"), "\"tee, north\"");
        assert_eq!(csv_field("plain"), "plain");
    }
}
