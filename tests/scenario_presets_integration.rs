use std::process::Command;

#[derive(Debug)]
struct Costs {
    classical: f64,
    quantum: f64,
}

#[test]
fn scenario_files_run_via_cli_and_produce_distinct_costs() {
    let baseline = run_and_parse_costs(&["--scenario", "scenarios/baseline.toml"]);
    let calm = run_and_parse_costs(&["--scenario", "scenarios/calm_winter.toml"]);
    let oversupply = run_and_parse_costs(&["--scenario", "scenarios/oversupply.toml"]);

    for (name, costs) in [("baseline", &baseline), ("calm_winter", &calm), ("oversupply", &oversupply)] {
        assert!(
            costs.quantum <= costs.classical,
            "{name}: quantum-inspired cost {} above classical {}",
            costs.quantum,
            costs.classical
        );
    }

    assert!(
        calm.classical > baseline.classical,
        "expected calm winter to need more backup: calm={:.0}, baseline={:.0}",
        calm.classical,
        baseline.classical
    );
    assert!(
        (oversupply.classical - baseline.classical).abs() > 1.0,
        "expected oversupply and baseline costs to differ: oversupply={:.0}, baseline={:.0}",
        oversupply.classical,
        baseline.classical
    );
}

#[test]
fn preset_flag_matches_equivalent_scenario_file() {
    let from_file = run_and_parse_costs(&["--scenario", "scenarios/baseline.toml"]);
    let from_preset = run_and_parse_costs(&["--preset", "baseline"]);
    assert_eq!(from_file.classical, from_preset.classical);
    assert_eq!(from_file.quantum, from_preset.quantum);
}

#[test]
fn unknown_preset_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_grid-dispatch-sim"))
        .args(["--preset", "nonexistent"])
        .output()
        .expect("grid-dispatch-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown preset"), "stderr: {stderr}");
}

#[test]
fn zero_speed_is_rejected() {
    let output = Command::new(env!("CARGO_BIN_EXE_grid-dispatch-sim"))
        .args(["--speed", "0", "--quiet"])
        .output()
        .expect("grid-dispatch-sim process should run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("simulation.speed"), "stderr: {stderr}");
}

fn run_and_parse_costs(args: &[&str]) -> Costs {
    let output = Command::new(env!("CARGO_BIN_EXE_grid-dispatch-sim"))
        .args(args)
        .arg("--quiet")
        .output()
        .expect("grid-dispatch-sim process should run");

    assert!(
        output.status.success(),
        "run failed for {args:?}: stderr={} ",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    parse_costs(&stdout)
}

fn parse_costs(stdout: &str) -> Costs {
    let label = "Total cost:";
    let line = stdout
        .lines()
        .find(|line| line.trim_start().starts_with(label))
        .unwrap_or_else(|| panic!("missing KPI line `{label}` in output: {stdout}"));

    let values: Vec<f64> = line[label.len()..]
        .split_whitespace()
        .map(|raw| {
            raw.trim_start_matches('$')
                .parse::<f64>()
                .unwrap_or_else(|_| panic!("failed parsing `{raw}` from KPI line `{line}`"))
        })
        .collect();
    assert_eq!(values.len(), 2, "expected two costs in `{line}`");

    Costs {
        classical: values[0],
        quantum: values[1],
    }
}
