use anyhow::{Context, Result};

/// Light intensities in percent of one sun, lowest first.
const INTENSITIES: [f64; 12] = [
    1.0, 3.0, 10.0, 16.0, 25.0, 32.0, 40.0, 50.0, 63.0, 79.0, 93.0, 100.0,
];

/// Photocurrent at one sun, amps.
const PHOTOCURRENT_A: f64 = 1.0e-3;
const SATURATION_A: f64 = 2.0e-15;
const IDEALITY: f64 = 1.5;
const THERMAL_VOLTAGE: f64 = 0.025_85;
/// Reverse sweeps lag the forward ones by this much (hysteresis).
const HYSTERESIS_V: f64 = 0.015;

/// Single-diode current with photocurrent counted negative.
fn diode_current(v: f64, photocurrent: f64) -> f64 {
    SATURATION_A * ((v / (IDEALITY * THERMAL_VOLTAGE)).exp() - 1.0) - photocurrent
}

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
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // Voltage sweep: -0.2 V → 1.1 V, step 10 mV
    let voltages: Vec<f64> = (0..=130).map(|i| -0.2 + i as f64 * 0.01).collect();

    let output_path = "CSV Data File.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    // Four columns per intensity: forward V, forward I, reverse V, reverse I
    let mut header = Vec::with_capacity(INTENSITIES.len() * 4);
    for pct in INTENSITIES {
        header.push(format!("V fwd {pct}%"));
        header.push(format!("I fwd {pct}%"));
        header.push(format!("V rev {pct}%"));
        header.push(format!("I rev {pct}%"));
    }
    writer.write_record(&header).context("writing header")?;

    for &v in &voltages {
        let mut row = Vec::with_capacity(header.len());
        for pct in INTENSITIES {
            let photocurrent = PHOTOCURRENT_A * pct / 100.0;
            let noise = 2.0e-7 * (1.0 + pct / 100.0);

            let forward = diode_current(v, photocurrent) + rng.gauss(0.0, noise);
            let reverse = diode_current(v - HYSTERESIS_V, photocurrent) + rng.gauss(0.0, noise);

            row.push(format!("{v:.3}"));
            row.push(format!("{forward:.6e}"));
            row.push(format!("{v:.3}"));
            row.push(format!("{reverse:.6e}"));
        }
        writer.write_record(&row).context("writing sweep row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} intensities ({} points each) to {output_path}",
        INTENSITIES.len(),
        voltages.len()
    );
    Ok(())
}
