//! Personnel Projects - headless demo
//!
//! Loads a rule catalog, staffs a base, starts a covert operation, runs a
//! soldier transformation and advances the clock until the scheduled
//! completions have landed.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use personnel_projects::campaign::{Base, Campaign, Soldier};
use personnel_projects::core::types::{BaseId, Difficulty};
use personnel_projects::operations::{DurationRating, OddsRating, OperationDraft};
use personnel_projects::rules::RuleCatalog;
use personnel_projects::stats::{StatBlock, StatVariant};
use personnel_projects::transformation::{
    check_transformation, commit_transformation, preview_stat_changes, projected_delay_hours, PlayerInput,
};

/// Personnel Projects - covert operation and transformation demo
#[derive(Parser, Debug)]
#[command(name = "personnel-projects")]
#[command(about = "Run a covert operation and a soldier transformation against a rule catalog")]
struct Args {
    /// Rule catalog (TOML)
    #[arg(long, default_value = "data/projects.toml")]
    catalog: PathBuf,

    /// Game difficulty: beginner, experienced, veteran, genius or superhuman
    #[arg(long, default_value = "experienced")]
    difficulty: Difficulty,

    /// Starting funds
    #[arg(long, default_value_t = 500_000)]
    funds: i64,

    /// Soldiers recruited at the base
    #[arg(long, default_value_t = 6)]
    soldiers: u32,

    /// Operation rule to start (defaults to the first in the catalog)
    #[arg(long)]
    operation: Option<String>,

    /// Transformation rule to run (defaults to the first in the catalog)
    #[arg(long)]
    transformation: Option<String>,

    /// Hours to advance after committing
    #[arg(long, default_value_t = 96)]
    hours: u32,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "personnel_projects=debug".into()),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let catalog = RuleCatalog::load_from_toml(&args.catalog)?;
    tracing::info!(
        "Loaded {} operations and {} transformations from {}",
        catalog.operation_ids().len(),
        catalog.transformation_ids().len(),
        args.catalog.display()
    );

    let mut campaign = Campaign::new(args.funds, args.difficulty);
    let mut base = recruit_base(&catalog, args.soldiers, &mut rng);

    println!("\n=== PERSONNEL PROJECTS (seed {}) ===", seed);

    if let Some(rule_id) = args.operation.clone().or_else(|| catalog.operation_ids().first().map(|s| s.to_string())) {
        run_operation(&rule_id, &mut base, &catalog, &mut campaign)?;
    }

    if let Some(rule_id) = args
        .transformation
        .clone()
        .or_else(|| catalog.transformation_ids().first().map(|s| s.to_string()))
    {
        run_transformation(&rule_id, &mut base, &catalog, &mut campaign, &mut rng)?;
    }

    for hour in 1..=args.hours {
        let report = base.advance_hour(&catalog, &mut rng);
        for id in &report.arrived_soldiers {
            println!("[hour {:>3}] {} arrived", hour, id);
        }
        for (kind, quantity) in &report.arrived_items {
            println!("[hour {:>3}] {} x{} arrived", hour, kind, quantity);
        }
        for finished in &report.transformations_finished {
            println!("[hour {:>3}] {} finished {}", hour, finished.soldier_name, finished.rule_id);
        }
    }

    println!("\nFunds left: {}", campaign.funds);
    println!("Pending completions: {}", base.transfers.len());
    Ok(())
}

fn recruit_base(catalog: &RuleCatalog, count: u32, rng: &mut impl Rng) -> Base {
    let mut base = Base::new(BaseId(1), "Cheyenne Mountain", count + 4);
    for (kind, quantity) in [
        ("STR_PISTOL", 4),
        ("STR_PISTOL_CLIP", 6),
        ("STR_MEDI_KIT", 2),
        ("STR_PSI_AMP", 1),
        ("STR_ELERIUM_115", 10),
    ] {
        if catalog.item_info(kind).is_some() {
            base.storage.add(kind, quantity);
        }
    }

    let soldier_type = catalog.soldier_type("STR_SOLDIER");
    for i in 0..count {
        let stats = soldier_type
            .map(|t| StatBlock::random_in_range(&t.min_stats, &t.max_stats, rng))
            .unwrap_or_default();
        let armor = soldier_type.map(|t| t.default_armor.clone()).unwrap_or_default();
        let soldier = Soldier::new(format!("Recruit {}", i + 1), "STR_SOLDIER")
            .with_stats(stats)
            .with_rank(rng.gen_range(0..4))
            .with_armor(armor);
        base.roster.spawn(soldier);
    }
    base
}

fn run_operation(
    rule_id: &str,
    base: &mut Base,
    catalog: &RuleCatalog,
    campaign: &mut Campaign,
) -> Result<(), Box<dyn std::error::Error>> {
    let rule = catalog.operation_rule(rule_id)?;
    let mut draft = OperationDraft::new(rule_id);

    let team_size = rule.soldier_slots + rule.optional_soldier_slots;
    let idle: Vec<_> = base.roster.active().filter(|s| s.is_available()).map(|s| s.id).take(team_size).collect();
    for id in idle {
        draft.add_soldier(base, id)?;
    }
    for (kind, &quantity) in rule.required_items.iter().chain(rule.bonus_items.iter()) {
        let quantity = quantity.min(base.storage.get(kind));
        if quantity > 0 {
            draft.stage_item(base, catalog, kind, quantity)?;
        }
    }

    let odds = draft.odds(base, catalog, campaign)?;
    let cost = draft.cost(base, catalog, campaign)?;
    println!("\nOperation {}", rule_id);
    println!("  team: {} soldiers, {} items staged", draft.soldiers().len(), draft.staged().total_quantity());
    println!("  odds: {:.1} ({})", odds, OddsRating::from_odds(odds));
    println!("  time: {} hours ({})", cost, DurationRating::from_hours(cost));

    match draft.commit(base, catalog, campaign) {
        Ok(id) => println!("  started as {:?}", id),
        Err(e) => {
            println!("  not started: {}", e);
            draft.cancel(base);
        }
    }
    Ok(())
}

fn run_transformation(
    rule_id: &str,
    base: &mut Base,
    catalog: &RuleCatalog,
    campaign: &mut Campaign,
    rng: &mut impl Rng,
) -> Result<(), Box<dyn std::error::Error>> {
    let rule = catalog.transformation_rule(rule_id)?;
    println!("\nTransformation {}", rule_id);

    let base_view: &Base = base;
    let campaign_view: &Campaign = campaign;
    let Some(candidate) = base_view
        .roster
        .iter()
        .find(|s| check_transformation(rule, s, base_view, campaign_view).is_ok())
        .map(|s| s.id)
    else {
        println!("  no eligible soldier");
        return Ok(());
    };

    if let Some(soldier) = base.roster.get(candidate) {
        println!("  candidate: {} ({})", soldier.name, soldier.soldier_type);
        println!("  ready in {} hours", projected_delay_hours(rule, soldier));
        let min = preview_stat_changes(rule, soldier, StatVariant::Min, catalog, &campaign.research)?;
        let max = preview_stat_changes(rule, soldier, StatVariant::Max, catalog, &campaign.research)?;
        if let (Some(min), Some(max)) = (min, max) {
            for ((stat, lo), (_, hi)) in min.rows.iter().zip(max.rows.iter()) {
                let (lo, hi) = (lo.to_string(), hi.to_string());
                if !lo.is_empty() || !hi.is_empty() {
                    println!("    {:?}: {} .. {}", stat, lo, hi);
                }
            }
        }
    }

    let outcome = commit_transformation(rule_id, candidate, base, campaign, catalog, &PlayerInput::default(), rng)?;
    println!("  outcome: {:?}", outcome);
    Ok(())
}
