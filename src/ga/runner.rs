//! Generation loop.
//!
//! [`GaRunner`] drives the search:
//!
//! 1. **Initialize**: validate input, build `population_size` random schedules.
//! 2. **Evaluate**: score every individual (rayon when `parallel`), then rank
//!    best-first. Ranking waits for every score of the generation.
//! 3. **Terminate** on a conflict-free best, on the generation budget, or
//!    when the observer breaks.
//! 4. **Reproduce**: copy `elite_count` top individuals, then fill the rest
//!    with children of two distinct parents drawn from the top half
//!    (truncation selection), mutated with `mutation_probability`.
//!
//! Each child gets its own RNG, seeded from the run RNG in slot order, so a
//! seeded run is identical with `parallel` on or off.

use std::ops::ControlFlow;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::chromosome::random_schedule;
use super::config::GaConfig;
use super::fitness::{count_conflicts, find_conflicts, score};
use super::operators::GeneticOperators;
use crate::error::Result;
use crate::models::{Catalog, Conflict, Schedule};
use crate::validation::validate_input;

/// Summary of one evaluated generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 1-based generation index.
    pub generation: usize,
    /// Fitness of the rank-0 individual.
    pub best_fitness: f64,
    /// Conflict count of the rank-0 individual.
    pub best_conflicts: usize,
    /// Mean fitness over the population.
    pub mean_fitness: f64,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// A conflict-free schedule was found.
    Perfect,
    /// The generation budget ran out first. An expected outcome, not a failure.
    MaxGenerations,
    /// The observer asked to stop.
    Cancelled,
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaResult {
    /// Best schedule seen in any generation.
    pub best: Schedule,
    /// Fitness of `best`.
    pub best_fitness: f64,
    /// Conflicts remaining in `best`.
    pub conflicts: Vec<Conflict>,
    /// Generation in which `best` was first seen.
    pub best_generation: usize,
    /// Number of generations evaluated.
    pub generations: usize,
    /// Why the run stopped.
    pub stop_reason: StopReason,
    /// One report per evaluated generation.
    pub history: Vec<GenerationReport>,
}

impl GaResult {
    /// Whether the best schedule is conflict-free.
    pub fn is_perfect(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// A schedule with its score for the current generation.
#[derive(Debug, Clone)]
struct Evaluated {
    schedule: Schedule,
    conflicts: usize,
    fitness: f64,
}

impl Evaluated {
    fn new(schedule: Schedule) -> Self {
        let conflicts = count_conflicts(&schedule);
        Self {
            schedule,
            conflicts,
            fitness: score(conflicts),
        }
    }
}

/// Runs the timetabling GA.
///
/// # Example
/// ```
/// use u_timetable::ga::{GaConfig, GaRunner};
/// use u_timetable::models::Catalog;
///
/// let catalog = Catalog::new(
///     ["C1", "C2", "C3"],
///     ["T1", "T2", "T3"],
///     ["R1", "R2"],
///     ["Morning", "Afternoon"],
/// );
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&catalog, &config).unwrap();
/// assert!(result.generations <= 100);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs to completion.
    pub fn run(catalog: &Catalog, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_observer(catalog, config, |_| ControlFlow::Continue(()))
    }

    /// Runs, calling `observer` after every evaluated generation.
    ///
    /// Returning `ControlFlow::Break(())` stops the run at that generation
    /// boundary with [`StopReason::Cancelled`], unless the generation already
    /// produced a conflict-free schedule or exhausted the budget.
    pub fn run_with_observer<F>(
        catalog: &Catalog,
        config: &GaConfig,
        mut observer: F,
    ) -> Result<GaResult>
    where
        F: FnMut(&GenerationReport) -> ControlFlow<()>,
    {
        validate_input(catalog, config)?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let ops = config.operators();

        info!(
            courses = catalog.course_count(),
            population_size = config.population_size,
            max_generations = config.max_generations,
            elite_count = config.elite_count,
            "starting timetable search"
        );
        if catalog.has_duplicate_ids() {
            warn!("catalog repeats identifiers; repeated IDs are drawn more often");
        }
        if !catalog.admits_perfect_schedule() {
            warn!(
                courses = catalog.course_count(),
                capacity = catalog.conflict_free_capacity(),
                "catalog cannot fit every course without conflicts"
            );
        }

        let population: Vec<Schedule> = (0..config.population_size)
            .map(|_| random_schedule(catalog, &mut rng))
            .collect();

        let mut generation = 1;
        let mut ranked = evaluate(population, config.parallel);
        let mut best = (ranked[0].clone(), generation);
        let mut history = Vec::new();

        let stop_reason = loop {
            let report = summarize(generation, &ranked);
            info!(
                generation,
                best_fitness = report.best_fitness,
                best_conflicts = report.best_conflicts,
                mean_fitness = report.mean_fitness,
                "generation evaluated"
            );

            let leader = &ranked[0];
            if leader.fitness > best.0.fitness {
                best = (leader.clone(), generation);
            }

            let flow = observer(&report);
            history.push(report);

            if leader.conflicts == 0 {
                break StopReason::Perfect;
            }
            if generation >= config.max_generations {
                break StopReason::MaxGenerations;
            }
            if flow.is_break() {
                break StopReason::Cancelled;
            }

            let next = reproduce(&ranked, catalog, config, &ops, &mut rng);
            generation += 1;
            ranked = evaluate(next, config.parallel);
        };

        let (best, best_generation) = best;

        match stop_reason {
            StopReason::Perfect => info!(generation, "conflict-free schedule found"),
            StopReason::MaxGenerations => warn!(
                generation,
                best_fitness = best.fitness,
                conflicts = best.conflicts,
                "generation budget exhausted without a conflict-free schedule"
            ),
            StopReason::Cancelled => info!(generation, "search cancelled by observer"),
        }

        Ok(GaResult {
            conflicts: find_conflicts(&best.schedule),
            best_fitness: best.fitness,
            best: best.schedule,
            best_generation,
            generations: generation,
            stop_reason,
            history,
        })
    }
}

/// Scores a population and ranks it best-first.
///
/// The sort is stable, so equal scores keep their slot order.
fn evaluate(population: Vec<Schedule>, parallel: bool) -> Vec<Evaluated> {
    let mut ranked: Vec<Evaluated> = if parallel {
        population.into_par_iter().map(Evaluated::new).collect()
    } else {
        population.into_iter().map(Evaluated::new).collect()
    };
    ranked.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
    ranked
}

fn summarize(generation: usize, ranked: &[Evaluated]) -> GenerationReport {
    let mean_fitness = ranked.iter().map(|e| e.fitness).sum::<f64>() / ranked.len() as f64;
    GenerationReport {
        generation,
        best_fitness: ranked[0].fitness,
        best_conflicts: ranked[0].conflicts,
        mean_fitness,
    }
}

/// Builds the next population from a ranked one.
fn reproduce(
    ranked: &[Evaluated],
    catalog: &Catalog,
    config: &GaConfig,
    ops: &GeneticOperators,
    rng: &mut SmallRng,
) -> Vec<Schedule> {
    let pool = &ranked[..config.parent_pool_size()];
    let elites = config.elite_count.min(config.population_size);

    let mut next: Vec<Schedule> = ranked[..elites]
        .iter()
        .map(|e| e.schedule.clone())
        .collect();

    let seeds: Vec<u64> = (elites..config.population_size)
        .map(|_| rng.random())
        .collect();

    let breed = |seed: u64| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (p1, p2) = select_parents(pool, &mut rng);
        ops.offspring(&p1.schedule, &p2.schedule, catalog, &mut rng)
    };

    let children: Vec<Schedule> = if config.parallel {
        seeds.into_par_iter().map(breed).collect()
    } else {
        seeds.into_iter().map(breed).collect()
    };
    next.extend(children);

    debug!(
        elites,
        offspring = next.len() - elites,
        pool = pool.len(),
        "next generation built"
    );
    next
}

/// Picks two distinct members of the pool uniformly.
fn select_parents<'a, R: Rng>(
    pool: &'a [Evaluated],
    rng: &mut R,
) -> (&'a Evaluated, &'a Evaluated) {
    let i = rng.random_range(0..pool.len());
    let mut j = rng.random_range(0..pool.len() - 1);
    if j >= i {
        j += 1;
    }
    (&pool[i], &pool[j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::ga::fitness::fitness;
    use crate::validation::ValidationErrorKind;

    fn sample_catalog() -> Catalog {
        Catalog::new(
            ["C1", "C2", "C3"],
            ["T1", "T2", "T3"],
            ["R1", "R2"],
            ["Morning", "Afternoon"],
        )
    }

    /// Five courses but only two conflict-free placements.
    fn infeasible_catalog() -> Catalog {
        Catalog::new(["C1", "C2", "C3", "C4", "C5"], ["T1"], ["R1"], ["Mon", "Tue"])
    }

    fn seeded(seed: u64) -> GaConfig {
        GaConfig::default().with_seed(seed).with_parallel(false)
    }

    #[test]
    fn test_finds_perfect_schedule_in_most_trials() {
        let catalog = sample_catalog();
        let perfect = (0..20)
            .filter_map(|seed| GaRunner::run(&catalog, &seeded(seed)).ok())
            .filter(|r| r.stop_reason == StopReason::Perfect)
            .count();
        assert!(perfect >= 16, "only {perfect}/20 runs found a perfect schedule");
    }

    #[test]
    fn test_perfect_result_is_consistent() {
        let catalog = sample_catalog();
        let result = GaRunner::run(&catalog, &seeded(42)).unwrap();
        if result.stop_reason == StopReason::Perfect {
            assert!(result.is_perfect());
            assert!((result.best_fitness - 1.0).abs() < 1e-10);
            assert!((fitness(&result.best) - 1.0).abs() < 1e-10);
            assert_eq!(result.best_generation, result.generations);
        }
        assert!(result.generations <= 100);
        assert_eq!(result.history.len(), result.generations);
        assert_eq!(
            result.best.courses().collect::<Vec<_>>(),
            vec!["C1", "C2", "C3"]
        );
    }

    #[test]
    fn test_single_course_stops_at_first_generation() {
        let catalog = Catalog::new(["C1"], ["T1", "T2"], ["R1"], ["Mon"]);
        let result = GaRunner::run(&catalog, &seeded(3)).unwrap();
        assert_eq!(result.generations, 1);
        assert_eq!(result.stop_reason, StopReason::Perfect);
        assert!((result.best_fitness - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_courses_stops_at_first_generation() {
        let catalog = Catalog::new(Vec::<String>::new(), ["T1"], ["R1"], ["Mon"]);
        let result = GaRunner::run(&catalog, &seeded(3)).unwrap();
        assert_eq!(result.generations, 1);
        assert!(result.best.is_empty());
        assert!(result.is_perfect());
    }

    #[test]
    fn test_infeasible_catalog_exhausts_budget() {
        let catalog = infeasible_catalog();
        let config = seeded(42).with_max_generations(25);
        let result = GaRunner::run(&catalog, &config).unwrap();

        assert_eq!(result.stop_reason, StopReason::MaxGenerations);
        assert_eq!(result.generations, 25);
        assert_eq!(result.history.len(), 25);
        assert!(result.best_fitness < 1.0);
        assert!(!result.is_perfect());
        assert_eq!(result.conflicts.len(), count_conflicts(&result.best));
    }

    #[test]
    fn test_best_is_best_of_history() {
        let catalog = infeasible_catalog();
        let result = GaRunner::run(&catalog, &seeded(11).with_max_generations(30)).unwrap();
        let top = result
            .history
            .iter()
            .map(|r| r.best_fitness)
            .fold(0.0, f64::max);
        assert!((result.best_fitness - top).abs() < 1e-10);
        let found = &result.history[result.best_generation - 1];
        assert!((found.best_fitness - top).abs() < 1e-10);
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let catalog = infeasible_catalog();
        let config = seeded(7).with_max_generations(20);
        let a = GaRunner::run(&catalog, &config).unwrap();
        let b = GaRunner::run(&catalog, &config).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = infeasible_catalog();
        let sequential = seeded(5).with_max_generations(15);
        let parallel = sequential.clone().with_parallel(true);
        let a = GaRunner::run(&catalog, &sequential).unwrap();
        let b = GaRunner::run(&catalog, &parallel).unwrap();
        assert_eq!(a.history, b.history);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_elitism_is_monotonic() {
        let catalog = Catalog::new(
            (1..=10).map(|i| format!("C{i}")),
            ["T1", "T2"],
            ["R1", "R2"],
            ["Mon", "Tue", "Wed"],
        );
        let config = seeded(42).with_max_generations(40).with_elite_count(1);
        let result = GaRunner::run(&catalog, &config).unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[1].best_fitness >= pair[0].best_fitness);
        }
    }

    #[test]
    fn test_report_bounds() {
        let catalog = infeasible_catalog();
        let result = GaRunner::run(&catalog, &seeded(1).with_max_generations(10)).unwrap();
        for (i, r) in result.history.iter().enumerate() {
            assert_eq!(r.generation, i + 1);
            assert!(r.best_fitness > 0.0 && r.best_fitness <= 1.0);
            assert!(r.mean_fitness > 0.0 && r.mean_fitness <= r.best_fitness);
            assert!((score(r.best_conflicts) - r.best_fitness).abs() < 1e-10);
        }
    }

    #[test]
    fn test_observer_cancels() {
        let catalog = infeasible_catalog();
        let mut seen = Vec::new();
        let result = GaRunner::run_with_observer(&catalog, &seeded(9), |report| {
            seen.push(report.generation);
            if report.generation == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.generations, 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_minimal_population() {
        let catalog = infeasible_catalog();
        let config = seeded(2).with_population_size(2).with_max_generations(5);
        let result = GaRunner::run(&catalog, &config).unwrap();
        assert_eq!(result.generations, 5);
    }

    #[test]
    fn test_invalid_population_size() {
        let config = seeded(1).with_population_size(1);
        let err = GaRunner::run(&sample_catalog(), &config).unwrap_err();
        let Error::Configuration(errors) = err;
        assert_eq!(errors[0].kind, ValidationErrorKind::PopulationTooSmall);
    }

    #[test]
    fn test_duplicate_ids_accepted() {
        let catalog = Catalog::new(["C1", "C2"], ["T1", "T1", "T2"], ["R1", "R2"], ["Mon", "Tue"]);
        let result = GaRunner::run(&catalog, &seeded(1)).unwrap();
        assert_eq!(result.best.len(), 2);
        assert!(result.best.iter().all(|a| catalog.teachers.contains(&a.teacher)));
    }

    #[test]
    fn test_best_generation_starts_at_one() {
        let catalog = infeasible_catalog();
        let result = GaRunner::run(&catalog, &seeded(4).with_max_generations(1)).unwrap();
        assert_eq!(result.generations, 1);
        assert_eq!(result.best_generation, 1);
        assert!((result.best_fitness - result.history[0].best_fitness).abs() < 1e-10);
    }

    #[test]
    fn test_empty_catalog_set_rejected() {
        let catalog = Catalog::new(["C1"], ["T1"], Vec::<String>::new(), ["Mon"]);
        assert!(GaRunner::run(&catalog, &seeded(1)).is_err());
    }

    #[test]
    fn test_select_parents_distinct() {
        let catalog = sample_catalog();
        let mut rng = SmallRng::seed_from_u64(42);
        let pool: Vec<Evaluated> = (0..2)
            .map(|_| Evaluated::new(random_schedule(&catalog, &mut rng)))
            .collect();
        for _ in 0..100 {
            let (a, b) = select_parents(&pool, &mut rng);
            assert!(!std::ptr::eq(a, b));
        }
    }
}
