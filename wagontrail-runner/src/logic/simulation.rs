use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use wagontrail_game::{
    Ending, JourneyConfig, JourneySetup, LogKind, RngBundle, Screen, StateController, score_journey,
};

use super::autopilot::Autopilot;
use super::policy::{Strategy, stock_cart};

const LEADER: &str = "Ezra";
const COMPANIONS: [&str; 4] = ["Abigail", "Brandon", "Clara", "Daniel"];

/// Knobs shared by every run in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Seconds fed to the controller per tick.
    pub dt: f32,
    pub max_ticks: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            dt: 0.5,
            max_ticks: 200_000,
        }
    }
}

/// How one automated journey went.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub seed: u64,
    pub strategy: String,
    pub profession: String,
    /// `None` when the run hit the tick ceiling first.
    pub ending: Option<Ending>,
    pub score: Option<u64>,
    pub rating: Option<String>,
    pub days: u32,
    pub miles: u32,
    pub survivors: u32,
    pub landmarks: usize,
    pub crossings: usize,
    pub hunts: usize,
    pub deaths: usize,
    pub money_left: String,
    pub errands: u32,
    pub ticks: u64,
    pub rng_draws: u64,
    #[serde(skip)]
    pub duration: Duration,
}

impl RunRecord {
    #[must_use]
    pub fn outcome_label(&self) -> &'static str {
        self.ending.map_or("timeout", Ending::key)
    }
}

/// Outfit a party for `strategy` and play until the journey ends or the tick
/// ceiling is reached.
///
/// # Errors
///
/// Fails when the strategy's setup is rejected by the game.
pub fn run_journey(
    seed: u64,
    strategy: Strategy,
    cfg: &JourneyConfig,
    opts: &RunOptions,
) -> Result<RunRecord> {
    let started = Instant::now();
    let policy = strategy.create_policy(seed);
    let profession = policy.profession();
    let cart = stock_cart(profession.starting_cents(), &policy.shopping_list());
    let session = JourneySetup::new(LEADER, &COMPANIONS, profession)
        .with_departure_month(policy.departure_month())
        .with_cart(cart)
        .embark(cfg)
        .with_context(|| format!("{strategy} setup rejected"))?;

    let mut controller =
        StateController::on_trail(session, RngBundle::from_user_seed(seed), cfg.clone());
    let mut pilot = Autopilot::new(policy);
    while !controller.is_finished() && controller.ticks() < opts.max_ticks {
        let input = pilot.next_input(&controller);
        controller.update(opts.dt, &input);
    }

    let ending = controller.ending();
    let score = match (controller.active(), ending) {
        (Some(Screen::GameOver(over)), _) if over.score().is_some() => over.score().cloned(),
        (_, Some(ending)) => Some(score_journey(controller.session(), ending)),
        _ => None,
    };
    let session = controller.session();
    let record = RunRecord {
        seed,
        strategy: strategy.key().to_string(),
        profession: profession.key().to_string(),
        ending,
        score: score.as_ref().map(|s| s.total),
        rating: score.as_ref().map(|s| s.rating.label().to_string()),
        days: session.trail.days_elapsed,
        miles: session.trail.miles_traveled(),
        survivors: session.party.alive_count(),
        landmarks: session.trail.visited_landmarks().len(),
        crossings: session.log.count_of(LogKind::Crossing),
        hunts: session.log.count_of(LogKind::Hunt),
        deaths: session.log.count_of(LogKind::Death),
        money_left: wagontrail_game::format_money(session.ledger.money_cents()),
        errands: pilot.errands_run(),
        ticks: controller.ticks(),
        rng_draws: controller.rngs().total_draws(),
        duration: started.elapsed(),
    };
    debug!(
        "seed {seed} {strategy}: {} after {} days ({} ticks)",
        record.outcome_label(),
        record.days,
        record.ticks
    );
    Ok(record)
}

/// Every seed × strategy × iteration combination. Iteration `i` plays seed `s + i`.
///
/// # Errors
///
/// Propagates the first failed setup.
pub fn run_batch(
    seeds: &[u64],
    strategies: &[Strategy],
    iterations: usize,
    cfg: &JourneyConfig,
    opts: &RunOptions,
) -> Result<Vec<RunRecord>> {
    let mut records = Vec::with_capacity(seeds.len() * strategies.len() * iterations);
    for &strategy in strategies {
        for &seed in seeds {
            for iteration in 0..iterations {
                let run_seed = seed.wrapping_add(iteration as u64);
                records.push(run_journey(run_seed, strategy, cfg, opts)?);
            }
        }
        info!("finished {strategy} batch");
    }
    Ok(records)
}

/// Per-strategy roll-up of a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub runs: usize,
    pub arrivals: usize,
    pub deaths: usize,
    pub timeouts: usize,
    pub arrival_rate: f64,
    pub mean_days: f64,
    pub mean_score: f64,
    pub mean_survivors: f64,
    pub best_score: u64,
}

#[must_use]
pub fn summarize(records: &[RunRecord]) -> Vec<StrategySummary> {
    let mut order: Vec<&str> = Vec::new();
    for record in records {
        if !order.contains(&record.strategy.as_str()) {
            order.push(&record.strategy);
        }
    }
    order
        .into_iter()
        .map(|strategy| {
            let runs: Vec<&RunRecord> = records.iter().filter(|r| r.strategy == strategy).collect();
            let count = runs.len();
            let count_f = count.max(1) as f64;
            let arrivals = runs
                .iter()
                .filter(|r| r.ending == Some(Ending::Reached))
                .count();
            let deaths = runs.iter().filter(|r| r.ending == Some(Ending::Death)).count();
            StrategySummary {
                strategy: strategy.to_string(),
                runs: count,
                arrivals,
                deaths,
                timeouts: count - arrivals - deaths,
                arrival_rate: arrivals as f64 / count_f,
                mean_days: runs.iter().map(|r| f64::from(r.days)).sum::<f64>() / count_f,
                mean_score: runs
                    .iter()
                    .map(|r| r.score.unwrap_or(0) as f64)
                    .sum::<f64>()
                    / count_f,
                mean_survivors: runs.iter().map(|r| f64::from(r.survivors)).sum::<f64>() / count_f,
                best_score: runs.iter().filter_map(|r| r.score).max().unwrap_or(0),
            }
        })
        .collect()
}
