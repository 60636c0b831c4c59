use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    /// Uniform float in [lo, hi)
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

struct PlatformProfile {
    name: &'static str,
    followers: f64,
    growth_per_week: f64,
    engagement: f64,
    ctr: f64,
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let profiles = [
        PlatformProfile {
            name: "Instagram",
            followers: 25_000.0,
            growth_per_week: 1.2,
            engagement: 0.045,
            ctr: 0.012,
        },
        PlatformProfile {
            name: "Facebook",
            followers: 48_000.0,
            growth_per_week: 0.3,
            engagement: 0.018,
            ctr: 0.008,
        },
        PlatformProfile {
            name: "TikTok",
            followers: 9_000.0,
            growth_per_week: 3.5,
            engagement: 0.085,
            ctr: 0.020,
        },
        PlatformProfile {
            name: "YouTube",
            followers: 15_000.0,
            growth_per_week: 0.8,
            engagement: 0.030,
            ctr: 0.015,
        },
    ];

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("building start date")?;
    let weeks = 26;

    let output_path = "sample_metrics.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    writer.write_record([
        "Plataforma",
        "Fecha",
        "Seguidores",
        "Alcance",
        "Interacciones",
        "Engagement Rate",
        "Cantidad de Posts",
        "Crecimiento de Seguidores (%)",
        "CTR",
    ])?;

    let mut rows = 0usize;
    for profile in &profiles {
        let mut followers = profile.followers;

        for week in 0..weeks {
            let date = start + Duration::weeks(week);
            let growth = profile.growth_per_week * rng.range(0.4, 1.6);
            followers *= 1.0 + growth / 100.0;

            let reach = followers * rng.range(1.5, 4.0);
            let engagement = profile.engagement * rng.range(0.7, 1.3);
            let interactions = reach * engagement;
            let posts = (rng.range(2.0, 9.0)).floor();
            let ctr = profile.ctr * rng.range(0.6, 1.4);

            // sprinkle in the data-quality problems real exports have:
            // an "N/A" cell, a blank cell, the occasional blank date
            let followers_cell = if rng.next_f64() < 0.04 {
                "N/A".to_string()
            } else {
                format!("{followers:.0}")
            };
            let reach_cell = if rng.next_f64() < 0.04 {
                String::new()
            } else {
                format!("{reach:.0}")
            };
            let date_cell = if rng.next_f64() < 0.02 {
                String::new()
            } else {
                date.format("%d/%m/%Y").to_string()
            };

            writer.write_record([
                profile.name.to_string(),
                date_cell,
                followers_cell,
                reach_cell,
                format!("{interactions:.0}"),
                format!("{engagement:.4}"),
                format!("{posts:.0}"),
                format!("{growth:.2}"),
                format!("{ctr:.4}"),
            ])?;
            rows += 1;
        }
    }

    writer.flush()?;
    println!(
        "Wrote {rows} rows across {} platforms to {output_path}",
        profiles.len()
    );
    Ok(())
}
