use std::{
    cell::RefCell,
    env,
    error::Error,
    num::ParseIntError,
    rc::Rc,
    sync::OnceLock,
};

use rand::{random, rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

pub const TEST_SEED_ENV: &str = "EVENT_TEST_SEED";

static SESSION_SEED: OnceLock<u64> = OnceLock::new();

fn parse_seed(value: Option<String>) -> Result<Option<u64>, ParseIntError> {
    value.map(|value| value.trim().parse()).transpose()
}

fn session_seed() -> Result<u64, Box<dyn Error>> {
    if let Some(seed) = SESSION_SEED.get() {
        return Ok(*seed);
    }
    let seed = parse_seed(env::var(TEST_SEED_ENV).ok())?.unwrap_or_else(random);
    Ok(*SESSION_SEED.get_or_init(|| {
        println!("Using seed {seed}, export {TEST_SEED_ENV}={seed} to replay");
        seed
    }))
}

/// Generator seeded once per test binary, replayable through `EVENT_TEST_SEED`.
pub fn get_seeded_rng() -> Result<StdRng, Box<dyn Error>> {
    Ok(StdRng::seed_from_u64(session_seed()?))
}

/// Indices `0..distinct`, each present at least once, plus `repeats`
/// duplicates drawn at random, in random order.
pub fn sequence_with_repeats(rng: &mut impl Rng, distinct: usize, repeats: usize) -> Vec<usize> {
    let mut sequence = (0..distinct).collect::<Vec<_>>();
    if distinct > 0 {
        sequence.extend((0..repeats).map(|_| rng.gen_range(0..distinct)));
    }
    sequence.shuffle(rng);
    sequence
}

#[derive(Debug)]
pub struct Journal<E> {
    entries: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for Journal<E> {
    fn clone(&self) -> Self {
        Journal {
            entries: self.entries.clone(),
        }
    }
}

impl<E> Default for Journal<E> {
    fn default() -> Self {
        Journal {
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E> Journal<E> {
    pub fn record(&self, entry: E) {
        self.entries.borrow_mut().push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<E: Clone> Journal<E> {
    pub fn entries(&self) -> Vec<E> {
        self.entries.borrow().clone()
    }
}
