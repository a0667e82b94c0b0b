use genepipe::{
    alteration::{CompositeAlterer, Mutator, SinglePointCrossover},
    evolution::{Engine, EngineOptions},
    genotype::{BitFactory, BitGenotype},
    optimize::Optimize,
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelector, StochasticUniversalSelector, TournamentSelector},
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn count_ones(genotype: &BitGenotype) -> f64 {
    genotype.count_ones() as f64
}

fn one_max_engine(workers: usize) -> Engine<BitGenotype> {
    Engine::<BitGenotype>::builder()
        .with_factory(BitFactory::new(32, 0.3).unwrap())
        .with_fitness_function(count_ones)
        .with_selector(TournamentSelector::new(3).unwrap())
        .with_alterer(
            CompositeAlterer::new()
                .and_then(SinglePointCrossover::new(0.3).unwrap())
                .and_then(Mutator::new(0.02).unwrap()),
        )
        .with_options(
            EngineOptions::builder()
                .population_size(20)
                .offspring_fraction(0.6)
                .worker_threads(workers)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn test_one_max_improves() {
    init_tracing();
    let engine = one_max_engine(2);
    let mut rng = RandomNumberGenerator::from_seed(2024);

    let start = engine.new_state(&mut rng).unwrap();
    assert_eq!(start.generation(), 1);
    assert_eq!(start.population().len(), 20);

    let initial_best = start.population().best(Optimize::Maximum).unwrap().fitness();

    let mut state = start;
    let mut last = None;
    for expected_generation in 2..=51 {
        let result = engine.evolve(&state, &mut rng).unwrap();

        assert_eq!(result.generation(), expected_generation);
        assert_eq!(result.generation(), state.generation() + 1);
        assert_eq!(result.population().len(), 20);
        assert!(result.population().iter().all(|p| p.fitness().is_finite()));

        state = result.state().clone();
        last = Some(result);
    }

    let last = last.unwrap();
    let final_best = last.best_phenotype().unwrap().fitness();
    assert!(
        final_best >= initial_best,
        "best fitness dropped from {} to {}",
        initial_best,
        final_best
    );
    assert!(last.worst_phenotype().unwrap().fitness() <= final_best);
}

#[test]
fn test_same_seed_same_history_regardless_of_workers() {
    let history = |workers: usize| {
        let engine = one_max_engine(workers);
        let mut rng = RandomNumberGenerator::from_seed(77);
        let state = engine.new_state(&mut rng).unwrap();

        engine
            .stream(state, rng)
            .take(15)
            .map(|result| {
                let result = result.unwrap();
                (
                    result.altered_count(),
                    result.population().fitness_values(),
                )
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(history(1), history(4));
}

#[test]
fn test_durations_are_recorded() {
    let engine = one_max_engine(2);
    let mut rng = RandomNumberGenerator::from_seed(5);
    let state = engine.new_state(&mut rng).unwrap();

    let result = engine.evolve(&state, &mut rng).unwrap();
    let durations = result.durations();

    assert!(durations.evolve >= durations.evaluation);
    assert!(durations.evolve >= durations.offspring_alter);
    assert!(durations.evolve >= durations.survivor_filter);
}

#[test]
fn test_minimization() {
    let engine = Engine::<BitGenotype>::builder()
        .with_factory(BitFactory::new(24, 0.7).unwrap())
        .with_fitness_function(count_ones)
        .with_alterer(Mutator::new(0.05).unwrap())
        .with_options(
            EngineOptions::builder()
                .population_size(30)
                .optimize(Optimize::Minimum)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap();

    let mut rng = RandomNumberGenerator::from_seed(11);
    let start = engine.new_state(&mut rng).unwrap();
    let initial_best = start.population().best(Optimize::Minimum).unwrap().fitness();

    let last = engine
        .stream(start, rng)
        .take(40)
        .last()
        .unwrap()
        .unwrap();

    assert_eq!(last.optimize(), Optimize::Minimum);
    assert!(last.best_phenotype().unwrap().fitness() <= initial_best);
}

fn roulette_min_engine(one_probability: f64) -> Engine<BitGenotype> {
    Engine::<BitGenotype>::builder()
        .with_factory(BitFactory::new(8, one_probability).unwrap())
        .with_fitness_function(count_ones)
        .with_offspring_selector(RouletteWheelSelector::new())
        .with_survivors_selector(StochasticUniversalSelector::new())
        .with_alterer(Mutator::new(0.02).unwrap())
        .with_options(
            EngineOptions::builder()
                .population_size(30)
                .optimize(Optimize::Minimum)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

#[test]
fn test_roulette_minimization_reaches_zero() {
    init_tracing();
    let engine = roulette_min_engine(0.3);
    let mut rng = RandomNumberGenerator::from_seed(31);
    let start = engine.new_state(&mut rng).unwrap();

    let best: Vec<f64> = engine
        .stream(start, rng)
        .take(150)
        .map(|result| result.unwrap().best_phenotype().unwrap().fitness())
        .collect();

    assert_eq!(best.len(), 150);
    assert!(best.contains(&0.0), "best fitness never reached 0: {:?}", best);
}

#[test]
fn test_roulette_minimization_of_converged_population() {
    let engine = roulette_min_engine(0.0);
    let mut rng = RandomNumberGenerator::from_seed(32);
    let start = engine.new_state(&mut rng).unwrap();
    assert!(start.population().iter().all(|p| p.fitness() == 0.0));

    let mut state = start;
    for _ in 0..10 {
        let result = engine.evolve(&state, &mut rng).unwrap();
        assert_eq!(result.population().len(), 30);
        assert_eq!(result.best_phenotype().unwrap().fitness(), 0.0);
        state = result.into_state();
    }
}
