use std::env;
use std::time::Instant;

use levwave::{WavefrontBuilder, WavefrontEngine, TILE_SIZE};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("scale_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("Wavefront edit-distance scaling probe (tile size {TILE_SIZE})");
    eprintln!(
        "Baselines are checked with a full-table DP up to length {}.",
        options.verify_limit
    );
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    for scenario in SCENARIOS {
        eprintln!("Scenario: {} ({})", scenario.name, scenario.blurb);
        for &len in SIZES {
            let (down, left) = (scenario.build)(len);
            let m = measure(scenario.name, len, &options, &mut sys, &down, &left);
            eprintln!(
                "  len={:<6} distance={:<6} wall={:.3}s rss_delta={} KiB status={}",
                len,
                m.distance,
                m.wall_s,
                m.rss_delta_kib,
                m.status.label()
            );
            measurements.push(m);
        }
        eprintln!();
    }

    match options.format {
        OutputFormat::Csv => write_csv(&measurements),
        OutputFormat::Table => write_table(&measurements),
    }

    if measurements
        .iter()
        .any(|m| matches!(m.status, VerificationStatus::Failed))
    {
        std::process::exit(1);
    }
}

const SIZES: &[usize] = &[256, 1024, 4096, 16384, 65536];

struct Scenario {
    name: &'static str,
    blurb: &'static str,
    build: fn(usize) -> (Vec<u8>, Vec<u8>),
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "identical",
        blurb: "equal inputs, distance 0, pruning collapses to the diagonal",
        build: |len| {
            let s = deterministic_dna(len, 0);
            (s.clone(), s)
        },
    },
    Scenario {
        name: "disjoint",
        blurb: "disjoint alphabets, distance = length, every tile runs",
        build: |len| (vec![b'A'; len], vec![b'B'; len]),
    },
    Scenario {
        name: "random",
        blurb: "deterministic pseudo-random DNA pair",
        build: |len| (deterministic_dna(len, 0), deterministic_dna(len, 1)),
    },
    Scenario {
        name: "drifted",
        blurb: "near-identical pair with sparse substitutions, prune-friendly",
        build: |len| {
            let down = deterministic_dna(len, 0);
            let mut left = down.clone();
            for i in (0..len).step_by(97) {
                left[i] = b'N';
            }
            (down, left)
        },
    },
];

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Table;
        let mut verify_limit = 1024usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin scale_probe [-- <options>]

Options:
  --format <csv|table>   Output format (default: table)
  --verify-limit <N>     Maximum length verified against a full-table DP (default: 1024)
  -h, --help             Print this help message
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            other => Err(format!("unknown format '{other}'")),
        }
    }
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

struct Measurement {
    scenario: &'static str,
    len: usize,
    distance: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
}

fn measure(
    scenario: &'static str,
    len: usize,
    options: &Options,
    sys: &mut System,
    down: &[u8],
    left: &[u8],
) -> Measurement {
    let before = rss_kib(sys);
    let start = Instant::now();

    let mut engine: WavefrontEngine = WavefrontBuilder::new().build();
    engine
        .init(down.len(), left.len())
        .expect("probe sizes are tile-aligned");
    let distance = engine
        .compute(down, left)
        .expect("lengths match the init call");

    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    let status = if len <= options.verify_limit {
        if distance == reference_distance(down, left) {
            VerificationStatus::Passed
        } else {
            VerificationStatus::Failed
        }
    } else {
        VerificationStatus::NotChecked
    };

    Measurement {
        scenario,
        len,
        distance,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        status,
    }
}

fn write_csv(measurements: &[Measurement]) {
    println!("scenario,len,distance,wall_s,rss_delta_kib,status");
    for m in measurements {
        println!(
            "{},{},{},{:.3},{},{}",
            m.scenario,
            m.len,
            m.distance,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
}

fn write_table(measurements: &[Measurement]) {
    println!(
        "{:<12} {:>8} {:>10} {:>10} {:>14} {:>12}",
        "scenario", "len", "distance", "wall_s", "rss_delta_kib", "status"
    );
    for m in measurements {
        println!(
            "{:<12} {:>8} {:>10} {:>10.3} {:>14} {:>12}",
            m.scenario,
            m.len,
            m.distance,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

fn deterministic_dna(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|i| {
            // Cheap avalanche so the two offsets decorrelate.
            let mixed = (i + offset).wrapping_mul(2654435761) >> 7;
            ALPHABET[mixed % ALPHABET.len()]
        })
        .collect()
}

/// Two-row full DP used as the correctness baseline for small inputs.
fn reference_distance(a: &[u8], b: &[u8]) -> usize {
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
