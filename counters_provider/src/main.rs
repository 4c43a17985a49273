//! Reconciliation replay harness.
//!
//! Loads a JSON fixture of declared-configuration steps, drives the
//! registry and reconciler over a fresh store, then replays the whole
//! sequence a second time and compares canonical hashes per address.

use std::fs;
use std::path::Path;

use counters_provider::lifecycle::{IdSource, UuidSource};
use counters_provider::reconcile;
use counters_provider::record::DeclaredConfig;
use counters_provider::registry::Registry;
use counters_provider::store::RecordStore;

struct Step {
    address: String,
    declared: DeclaredConfig,
}

fn load_steps(registry: &Registry, data: &str) -> Vec<Step> {
    let arr: Vec<serde_json::Value> =
        serde_json::from_str(data).expect("Failed to parse steps JSON");
    arr.iter()
        .map(|v| {
            let type_name = v["type"].as_str().expect("step missing 'type'");
            let address = v["address"]
                .as_str()
                .unwrap_or(type_name)
                .to_string();
            let kind = registry
                .kind(type_name)
                .unwrap_or_else(|e| panic!("{}", e));
            let declared = DeclaredConfig::from_value(kind, &v["config"]);
            Step { address, declared }
        })
        .collect()
}

/// Run all steps in order against a fresh store. Returns final
/// (address, canonical hash) pairs.
fn run_sequence(steps: &[Step], ids: &mut dyn IdSource) -> Vec<(String, String)> {
    let mut store = RecordStore::new();
    for step in steps {
        let prior = store.get(&step.address).cloned();
        let plan = reconcile::plan(&step.address, prior.as_ref(), &step.declared)
            .unwrap_or_else(|e| panic!("plan failed for {}: {}", step.address, e));
        for diag in &plan.diagnostics {
            println!("  [{:?}] {}", diag.severity, diag.summary);
        }
        reconcile::apply(&mut store, &step.address, &plan, ids);
        let record = store.get(&step.address).expect("record after apply");
        println!(
            "[STEP] {} action={:?} value={} hash={}",
            step.address,
            plan.action,
            record.state.display_value(),
            record.state.canonical_hash()
        );
    }
    store
        .addresses()
        .map(|addr| {
            let record = store.get(addr).expect("listed record");
            (addr.to_string(), record.state.canonical_hash())
        })
        .collect()
}

fn main() {
    let fixture_paths = [
        "fixtures/reconcile_steps.json",
        "counters_provider/fixtures/reconcile_steps.json",
    ];

    let mut fixture_data = None;
    for p in &fixture_paths {
        if Path::new(p).exists() {
            fixture_data = Some(fs::read_to_string(p).expect("Failed to read fixture file"));
            println!("Loaded steps from: {}", p);
            break;
        }
    }

    let data = fixture_data.expect("Could not find fixtures/reconcile_steps.json");
    let registry = Registry::new();
    let steps = load_steps(&registry, &data);

    let mut ids = UuidSource;
    let first = run_sequence(&steps, &mut ids);
    println!("\nReplaying sequence for determinism check…");
    let second = run_sequence(&steps, &mut ids);

    let mut all_passed = true;
    for ((addr, h1), (_, h2)) in first.iter().zip(second.iter()) {
        if h1 == h2 {
            println!("[PASS] {} hash={}", addr, h1);
        } else {
            all_passed = false;
            println!("[FAIL] {} run1={} run2={}", addr, h1, h2);
        }
    }

    if !all_passed {
        println!("[FAIL] Replay produced different state.");
        std::process::exit(1);
    }
    println!("[OK] All replays deterministic.");
}
