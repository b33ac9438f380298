//! Odds engine benchmark
//!
//! The UI recomputes odds on every roster or equipment change, so the
//! scoring pass should stay cheap even for full teams.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use personnel_projects::campaign::Soldier;
use personnel_projects::core::types::{Difficulty, SoldierId};
use personnel_projects::inventory::ResourceLedger;
use personnel_projects::operations::{compute_cost, compute_odds, OddsContext};
use personnel_projects::rules::RuleCatalog;
use personnel_projects::stats::StatBlock;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DEMO_CATALOG: &str = include_str!("../data/projects.toml");

fn bench_odds(c: &mut Criterion) {
    let catalog = RuleCatalog::parse_toml(DEMO_CATALOG).expect("demo catalog should parse");
    let rule = catalog.operation_rule("STR_OP_INFILTRATE_CELL").expect("demo operation");
    let soldier_type = catalog.soldier_type("STR_SOLDIER").expect("demo soldier type");
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let soldiers: Vec<Soldier> = (1..=8)
        .map(|i| {
            let mut s = Soldier::new(format!("Agent {}", i), "STR_SOLDIER")
                .with_stats(StatBlock::random_in_range(&soldier_type.min_stats, &soldier_type.max_stats, &mut rng))
                .with_rank(i % 5)
                .with_armor("STR_CIVILIAN_CLOTHES");
            s.id = SoldierId(i as u32);
            s
        })
        .collect();
    let team: Vec<&Soldier> = soldiers.iter().collect();
    let staged = ResourceLedger::with_items([("STR_PISTOL", 2), ("STR_MEDI_KIT", 1), ("STR_ROCKET_LAUNCHER", 1)]);
    let ctx = OddsContext { catalog: &catalog, difficulty: Difficulty::Veteran, psi_unlocked: true };

    c.bench_function("odds_8_soldiers", |b| {
        b.iter(|| {
            let odds = compute_odds(black_box(rule), black_box(&team), black_box(&staged), &ctx);
            compute_cost(rule, odds)
        })
    });

    c.bench_function("odds_empty_team", |b| {
        b.iter(|| compute_odds(black_box(rule), &[], black_box(&staged), &ctx))
    });
}

criterion_group!(benches, bench_odds);
criterion_main!(benches);
