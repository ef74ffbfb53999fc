//! Writes a deterministic synthetic survey file to `data/empleodesempleo.csv`.
//!
//! Usage: `cargo run --bin generate_sample [rows-per-year]`

use serde::Serialize;

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Año")]
    year: u16,
    #[serde(rename = "Edad")]
    age: u32,
    #[serde(rename = "Sexo")]
    sex: &'static str,
    #[serde(rename = "Nivel_Ingresos")]
    income_level: &'static str,
    #[serde(rename = "Horas_Trabajo")]
    hours_worked: f64,
    #[serde(rename = "Tipo_Empleo")]
    employment_type: &'static str,
    #[serde(rename = "Posicion_Ocupacion")]
    occupation_position: &'static str,
    #[serde(rename = "Total_Poblacion")]
    total_population: f64,
}

const SEXES: [&str; 2] = ["Hombre", "Mujer"];

const BRACKETS: [&str; 7] = [
    "Menos de 5,000",
    "5,001-10,000",
    "10,001-15,000",
    "15,001-20,000",
    "20,001-30,000",
    "30,001-50,000",
    "50,001 o más",
];

const EMPLOYMENT: [&str; 2] = ["Formal", "Informal"];

const OCCUPATIONS: [&str; 4] = [
    "Empleado",
    "Patrón",
    "Trabajador por cuenta propia",
    "Trabajador sin pago",
];

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let rows_per_year: usize = std::env::args()
        .nth(1)
        .and_then(|a| a.parse().ok())
        .unwrap_or(120);

    let mut rng = SimpleRng::new(42);
    let out_path = "data/empleodesempleo.csv";
    std::fs::create_dir_all("data").expect("creating data directory");
    let mut writer = csv::Writer::from_path(out_path).expect("opening output file");

    for year in 2020u16..=2024 {
        for _ in 0..rows_per_year {
            let age = rng.gauss(38.0, 11.0).clamp(18.0, 75.0).round() as u32;
            let sex = *rng.pick(&SEXES);

            // Income drifts up with age and recovers after 2020.
            let bracket_idx = (rng.gauss(
                1.8 + (age as f64 - 18.0) / 22.0 + (year - 2020) as f64 * 0.15,
                1.3,
            ))
            .clamp(0.0, (BRACKETS.len() - 1) as f64)
            .round() as usize;

            let informal = rng.next_f64() < if sex == "Hombre" { 0.52 } else { 0.58 };
            let employment = EMPLOYMENT[informal as usize];

            let hours = rng
                .gauss(if sex == "Hombre" { 46.0 } else { 41.0 }, 7.0)
                .clamp(20.0, 70.0);

            writer
                .serialize(Row {
                    year,
                    age,
                    sex,
                    income_level: BRACKETS[bracket_idx],
                    hours_worked: (hours * 10.0).round() / 10.0,
                    employment_type: employment,
                    occupation_position: *rng.pick(&OCCUPATIONS),
                    total_population: (rng.gauss(1_200.0, 350.0).clamp(100.0, 3_000.0)).round(),
                })
                .expect("writing row");
        }
    }

    writer.flush().expect("flushing output");
    println!(
        "Wrote {} rows to {out_path}",
        rows_per_year * 5
    );
}
