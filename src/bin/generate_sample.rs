use std::path::PathBuf;

use anyhow::{Context, Result};
use salary_insights::data::model::{Field, Record};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

// (level, salary multiplier)
const LEVELS: [(&str, f64); 4] = [
    ("junior", 0.55),
    ("pleno", 0.8),
    ("senior", 1.1),
    ("executivo", 1.6),
];

// (title, base USD salary)
const TITLES: [(&str, f64); 12] = [
    ("Data Analyst", 85_000.0),
    ("Data Scientist", 135_000.0),
    ("Data Engineer", 140_000.0),
    ("Machine Learning Engineer", 160_000.0),
    ("Analytics Engineer", 125_000.0),
    ("BI Developer", 95_000.0),
    ("Research Scientist", 170_000.0),
    ("Data Architect", 155_000.0),
    ("AI Engineer", 165_000.0),
    ("Data Manager", 130_000.0),
    ("MLOps Engineer", 145_000.0),
    ("Applied Scientist", 175_000.0),
];

// (residence / company location, ISO3, currency, USD per unit)
const COUNTRIES: [(&str, &str, &str, f64); 5] = [
    ("US", "USA", "USD", 1.0),
    ("BR", "BRA", "BRL", 0.2),
    ("GB", "GBR", "GBP", 1.27),
    ("DE", "DEU", "EUR", 1.08),
    ("CA", "CAN", "CAD", 0.74),
];

const ARRANGEMENTS: [(&str, f64); 3] = [("presencial", 1.05), ("hibrido", 1.0), ("remoto", 0.97)];
const CONTRACTS: [&str; 4] = ["CLT", "PJ", "contrato", "meio_periodo"];
const SIZES: [&str; 3] = ["P", "M", "G"];

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("salarios_dados.csv"));
    let mut rng = SimpleRng::new(42);

    // Header is written by hand with the survey's column names.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(Field::ALL.map(Field::source_name))?;

    let mut rows = 0;
    for year in 2020..=2025 {
        // The market grows until 2024 and levels off in 2025.
        let growth = 1.0 + 0.06 * f64::from((year - 2020).min(4));
        for _ in 0..400 {
            let &(level, level_mult) = rng.pick(&LEVELS);
            let &(title, base) = rng.pick(&TITLES);
            let &(residence, _, _, _) = rng.pick(&COUNTRIES);
            let &(location, iso, currency, usd_rate) = rng.pick(&COUNTRIES);
            let &(arrangement, arrangement_mult) = rng.pick(&ARRANGEMENTS);

            let salary_usd =
                (rng.gauss(base, base * 0.15) * level_mult * growth * arrangement_mult).max(15_000.0);
            let record = Record {
                year,
                experience_level: level.to_string(),
                contract_type: rng.pick(&CONTRACTS).to_string(),
                job_title: title.to_string(),
                salary: Some((salary_usd / usd_rate).round()),
                currency: currency.to_string(),
                salary_usd: Some(salary_usd.round()),
                employee_residence: residence.to_string(),
                work_arrangement: arrangement.to_string(),
                company_location: location.to_string(),
                company_size: rng.pick(&SIZES).to_string(),
                country_iso: iso.to_string(),
            };
            writer.serialize(&record)?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!("Wrote {rows} salary records to {}", output_path.display());
    Ok(())
}
