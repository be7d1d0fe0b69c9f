use anyhow::{Context, Result};

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
}

/// Borough name with a rough center to scatter markers around.
const BOROUGHS: &[(&str, f64, f64)] = &[
    ("Manhattan", 40.7831, -73.9712),
    ("Brooklyn", 40.6782, -73.9442),
    ("Queens", 40.7282, -73.7949),
    ("Bronx", 40.8448, -73.8648),
    ("Staten Island", 40.5795, -74.1502),
];

const FIRST_NAMES: &[&str] = &[
    "Alex", "Jordan", "Sam", "Casey", "Morgan", "Riley", "Devon", "Jamie",
];
const LAST_NAMES: &[&str] = &[
    "Rivera", "Chen", "Okafor", "Nowak", "Silva", "Haddad", "Kim", "Dubois",
];
const STREETS: &[&str] = &[
    "Atlantic Ave", "Queens Blvd", "Grand Concourse", "Broadway", "Bedford Ave",
    "Victory Blvd", "Northern Blvd", "Flatbush Ave",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_markers.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Latitude",
        "Longitude",
        "date",
        "name",
        "age",
        "Borough",
        "full_address",
        "narrative",
    ])?;

    let n_rows = 120;
    for i in 0..n_rows {
        let &(borough, lat0, lon0) = rng.pick(BOROUGHS);
        let lat = lat0 + (rng.next_f64() - 0.5) * 0.08;
        let lon = lon0 + (rng.next_f64() - 0.5) * 0.08;

        // Seed the defect paths the viewer has to tolerate: a few rows
        // without coordinates, a few without a parseable date.
        let (lat_s, lon_s) = if i % 17 == 0 {
            (String::new(), format!("{lon:.6}"))
        } else {
            (format!("{lat:.6}"), format!("{lon:.6}"))
        };
        let date = if i % 13 == 0 {
            "unknown".to_string()
        } else {
            let year = 2019 + (rng.next_u64() % 5) as u32;
            let month = 1 + (rng.next_u64() % 12) as u32;
            let day = 1 + (rng.next_u64() % 28) as u32;
            format!("{year}-{month:02}-{day:02}")
        };

        let name = format!("{} {}", rng.pick(FIRST_NAMES), rng.pick(LAST_NAMES));
        let age = if i % 7 == 0 {
            String::new()
        } else {
            format!("{}", 16 + rng.next_u64() % 60)
        };
        let address = format!("{} {}, {borough}", 1 + rng.next_u64() % 900, rng.pick(STREETS));
        let narrative = if i % 5 == 0 {
            String::new()
        } else {
            format!("Cyclist struck near {}.", rng.pick(STREETS))
        };

        writer.write_record([
            lat_s.as_str(),
            lon_s.as_str(),
            date.as_str(),
            name.as_str(),
            age.as_str(),
            borough,
            address.as_str(),
            narrative.as_str(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {n_rows} rows to {output_path}");
    Ok(())
}
