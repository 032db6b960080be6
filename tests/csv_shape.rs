use std::fs;
use std::path::PathBuf;
use std::process::Command;

const POWER_BOND: &str = r#"{
    "token": "abc",
    "name": "power bond",
    "creator": "alice",
    "function_type": "power_function",
    "function_parameters": [
        {"param": "m", "value": "12"},
        {"param": "n", "value": "2"},
        {"param": "c", "value": "100"}
    ],
    "reserve_tokens": ["rez", "res"],
    "tx_fee_percentage": "0.1",
    "max_supply": 100,
    "signers": ["alice"]
}"#;

const SWAPPER_BOND: &str = r#"{
    "token": "pool",
    "creator": "alice",
    "function_type": "swapper_function",
    "reserve_tokens": ["res", "rez"],
    "tx_fee_percentage": "0.1",
    "max_supply": 1000000,
    "order_quantity_limits": {"res": 50},
    "signers": ["alice"]
}"#;

fn scratch(name: &str, bond: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("bondcurve_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    let bond_path = dir.join("bond.json");
    fs::write(&bond_path, bond).expect("write bond");
    (dir, bond_path)
}

fn bondcurve() -> Command {
    Command::new(env!("CARGO_BIN_EXE_bondcurve"))
}

#[test]
fn schedule_has_one_header_and_exact_values() {
    let (dir, bond) = scratch("schedule", POWER_BOND);
    let out = dir.join("out");
    let status = bondcurve()
        .args(["--mode", "curve", "--points", "11", "--no-draw"])
        .arg("--bond")
        .arg(&bond)
        .arg("--out-dir")
        .arg(&out)
        .status()
        .expect("run bondcurve");
    assert!(status.success());

    let s = fs::read_to_string(out.join("schedule.csv")).unwrap();
    let header_count = s.lines().filter(|l| l.starts_with("supply,")).count();
    assert_eq!(header_count, 1, "CSV must have exactly one header row");
    let header_line = s.lines().find(|l| l.starts_with("supply,")).unwrap();
    assert_eq!(header_line, "supply,price,reserve,mint_cost,tx_fee");

    let rows: Vec<Vec<&str>> = s
        .lines()
        .filter(|l| !l.starts_with('#') && !l.is_empty() && !l.starts_with("supply,"))
        .map(|l| l.split(',').collect())
        .collect();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0], vec!["0", "100", "0", "0", "0"]);
    // integral(100) = 4·100³ + 100·100
    let last = rows.last().unwrap();
    assert_eq!(last[0], "100");
    assert_eq!(last[1], "120100");
    assert_eq!(last[2], "4010000");

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn swap_mode_reports_output_and_fee() {
    let (dir, bond) = scratch("swap", SWAPPER_BOND);
    let output = bondcurve()
        .args(["--mode", "swap", "--balances", "10000res,10000rez", "--from", "3res", "--to", "rez"])
        .arg("--bond")
        .arg(&bond)
        .output()
        .expect("run bondcurve");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("receive 1rez (fee 1res)"), "{stdout}");

    let over_limit = bondcurve()
        .args(["--mode", "swap", "--balances", "10000res,10000rez", "--from", "51res", "--to", "rez"])
        .arg("--bond")
        .arg(&bond)
        .output()
        .expect("run bondcurve");
    assert!(!over_limit.status.success());

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn curve_mode_rejects_swapper_bonds() {
    let (dir, bond) = scratch("reject", SWAPPER_BOND);
    let status = bondcurve()
        .args(["--mode", "curve", "--no-draw"])
        .arg("--bond")
        .arg(&bond)
        .arg("--out-dir")
        .arg(dir.join("out"))
        .status()
        .expect("run bondcurve");
    assert!(!status.success());
    let _ = fs::remove_dir_all(dir);
}
