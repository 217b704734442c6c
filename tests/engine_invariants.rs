use levwave::{EngineError, WavefrontEngine, TILE_SIZE};

fn full_distance(a: &[u8], b: &[u8]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn distance4(a: &[u8], b: &[u8]) -> usize {
    let mut engine = WavefrontEngine::<4>::new();
    engine.init(a.len(), b.len()).unwrap();
    engine.compute(a, b).unwrap()
}

#[test]
fn trivial_match_is_zero() {
    assert_eq!(distance4(b"AAAA", b"AAAA"), 0);
}

#[test]
fn fully_disjoint_single_tile() {
    assert_eq!(distance4(b"AAAA", b"BBBB"), 4);
}

#[test]
fn identical_inputs_across_two_levels() {
    assert_eq!(distance4(b"ABCDEFGH", b"ABCDEFGH"), 0);
}

#[test]
fn substitutions_crossing_tile_boundaries() {
    assert_eq!(distance4(b"ABCDEFGH", b"AXCDYFGH"), 2);
}

#[test]
fn production_tile_single_block() {
    let a: Vec<u8> = b"ABCD".iter().copied().cycle().take(64).collect();
    let b: Vec<u8> = b"DCBA".iter().copied().cycle().take(64).collect();
    let mut engine: WavefrontEngine = WavefrontEngine::new();
    engine.init(64, 64).unwrap();
    assert_eq!(
        engine.compute(&a, &b).unwrap(),
        full_distance(&a, &b)
    );
}

#[test]
fn all_substitutions_runs_every_tile() {
    let a = vec![b'A'; 128];
    let b = vec![b'B'; 128];
    let mut engine: WavefrontEngine = WavefrontEngine::new();
    engine.init(128, 128).unwrap();
    assert_eq!(engine.compute(&a, &b).unwrap(), 128);
}

#[test]
fn identity_on_larger_grids() {
    let a: Vec<u8> = (0..96u8).map(|i| b"ACGT"[(i % 4) as usize]).collect();
    assert_eq!(distance4(&a, &a), 0);
}

#[test]
fn skewed_shapes_hit_both_folds() {
    // Tall-thin and short-wide tilings, exercising the range fold past Ht
    // and past Wt.
    let short = vec![b'A'; 4];
    let long = vec![b'A'; 32];
    assert_eq!(distance4(&short, &long), 28);

    let short: Vec<u8> = b"ACGT".iter().copied().cycle().take(8).collect();
    let long: Vec<u8> = b"ACGT".iter().copied().cycle().take(40).collect();
    assert_eq!(distance4(&short, &long), full_distance(&short, &long));
}

#[test]
fn init_accepts_either_length_order() {
    let a = vec![b'C'; 4];
    let b = vec![b'C'; 12];
    let mut engine = WavefrontEngine::<4>::new();
    engine.init(12, 4).unwrap();
    assert_eq!(engine.compute(&a, &b).unwrap(), 8);
    assert_eq!(engine.compute(&b, &a).unwrap(), 8);
}

#[test]
fn bad_shape_reports_original_lengths() {
    let mut engine = WavefrontEngine::<4>::new();
    assert_eq!(
        engine.init(7, 8),
        Err(EngineError::BadShape {
            len1: 7,
            len2: 8,
            tile: 4
        })
    );
    assert_eq!(
        engine.init(4, 0),
        Err(EngineError::BadShape {
            len1: 4,
            len2: 0,
            tile: 4
        })
    );
}

#[test]
fn compute_before_init_is_rejected() {
    let mut engine: WavefrontEngine = WavefrontEngine::new();
    assert_eq!(
        engine.compute(b"X", b"Y"),
        Err(EngineError::NotInitialized)
    );
}

#[test]
fn mismatched_compute_leaves_engine_usable() {
    let mut engine = WavefrontEngine::<4>::new();
    engine.init(4, 4).unwrap();
    assert!(matches!(
        engine.compute(b"AAAA", b"AAAAAAAA"),
        Err(EngineError::LengthMismatch { .. })
    ));
    // The failed call must not have corrupted the seeded state.
    assert_eq!(engine.compute(b"AAAA", b"ABBA").unwrap(), 2);
}

#[test]
fn reinit_reshapes_the_engine() {
    let mut engine = WavefrontEngine::<4>::new();
    engine.init(4, 4).unwrap();
    assert_eq!(engine.compute(b"AAAA", b"AAAA").unwrap(), 0);
    engine.init(4, 12).unwrap();
    assert_eq!(engine.compute(b"AAAA", b"AAAABBBBCCCC").unwrap(), 8);
}

#[test]
fn exposed_tile_size_pads_hosts() {
    let tile = WavefrontEngine::<TILE_SIZE>::tile_size();
    assert_eq!(tile, 64);
    assert_eq!(levwave::utils::padded_length(100, tile), 128);
}
