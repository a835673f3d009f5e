use std::error::Error;

use movement_lab::data::model::SOURCE_COLUMNS;

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

    /// Occasionally drop a measurement to mimic a missed test station.
    fn maybe(&mut self, value: f64, decimals: usize) -> String {
        if self.next_f64() < 0.05 {
            String::new()
        } else {
            format!("{value:.decimals$}")
        }
    }
}

const NAMES: [&str; 24] = [
    "Aiden", "Bella", "Caleb", "Chloe", "Daniel", "Ella", "Ethan", "Freya", "Gabriel", "Grace",
    "Harper", "Isaac", "Isla", "Jack", "Layla", "Leo", "Mia", "Noah", "Olivia", "Oscar", "Ruby",
    "Samuel", "Sophie", "Zara",
];

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    let output_path = "ML_school_testing_clean.csv";
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(SOURCE_COLUMNS)?;

    for name in NAMES {
        let height = round1(rng.gauss(158.0, 9.0).clamp(135.0, 190.0));
        let bmi_target = rng.gauss(21.5, 4.5).clamp(15.0, 36.0);
        let height_m = height / 100.0;
        let weight = round1(bmi_target * height_m * height_m);
        // From the written values, so a derived BMI matches this column.
        let bmi = weight / (height_m * height_m);

        let grip = rng.gauss(0.55, 0.08).max(0.25);
        let ub_strength = (weight * rng.gauss(0.45, 0.08)).max(5.0);
        let squats = rng.gauss(38.0, 8.0).clamp(10.0, 65.0).round();
        let flexibility = rng.gauss(24.0, 6.0).clamp(2.0, 45.0);
        let trials = if rng.next_f64() < 0.7 { 3.0 } else { 2.0 };
        let best = rng.gauss(4.6, 0.8).clamp(2.0, 8.0);
        let mean = best - rng.next_f64() * 0.6;

        writer.write_record([
            name.to_string(),
            format!("{height:.1}"),
            format!("{weight:.1}"),
            // BMI left blank now and then so the loader derives it.
            rng.maybe(bmi, 2),
            rng.maybe(grip, 3),
            rng.maybe(ub_strength, 1),
            rng.maybe(squats, 0),
            rng.maybe(flexibility, 1),
            format!("{best:.2}"),
            format!("{mean:.2}"),
            format!("{trials:.0}"),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} students to {output_path}", NAMES.len());
    Ok(())
}
