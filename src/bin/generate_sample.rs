//! Writes the synthetic 64-row markdown dataset (`markdown_dataset.csv`):
//! 4 categories × 4 seasons × 4 products, each with four deepening markdown
//! stages and an elasticity-driven sales response. Deterministic by seed.

use markdown_advisor::ProductRecord;

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

    /// Uniform draw in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Units sold at a markdown depth: baseline demand scaled by an exponential
/// price-elasticity response, with mild noise.
fn sales_at(baseline: f64, elasticity: f64, markdown: f64, rng: &mut SimpleRng) -> f64 {
    let demand = baseline * (elasticity * markdown).exp();
    (demand * rng.range(0.95, 1.05)).round().max(0.0)
}

/// Depth in [0.05, 0.60] that maximizes price × (1 − d) × response(d).
fn revenue_maximizing_depth(baseline: f64, elasticity: f64, price: f64) -> f64 {
    let mut best = (0.05, f64::MIN);
    let mut d = 0.05;
    while d <= 0.60 {
        let revenue = price * (1.0 - d) * baseline * (elasticity * d).exp();
        if revenue > best.1 {
            best = (d, revenue);
        }
        d += 0.01;
    }
    (best.0 * 100.0).round() / 100.0
}

fn main() {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let categories = [
        ("Outerwear", ["Parka", "Wool Coat", "Rain Shell", "Puffer Jacket"]),
        ("Footwear", ["Trail Sneaker", "Leather Boot", "Canvas Slip-On", "Running Shoe"]),
        ("Accessories", ["Silk Scarf", "Leather Belt", "Knit Beanie", "Tote Bag"]),
        ("Knitwear", ["Cable Sweater", "Cardigan", "Merino Pullover", "Turtleneck"]),
    ];
    let seasons = ["Spring", "Summer", "Fall", "Winter"];
    let brands = ["Northline", "Stride", "Verano", "Atelier Ruhe"];
    let promotions = ["Clearance", "Seasonal", "Flash Sale", "Loyalty"];

    let mut records: Vec<ProductRecord> = Vec::new();

    for (cat_idx, (category, products)) in categories.iter().enumerate() {
        for (prod_idx, product) in products.iter().enumerate() {
            for (season_idx, season) in seasons.iter().enumerate() {
                let price = rng.range(25.0, 220.0);
                let competitor_price = (price * rng.range(0.85, 1.15)).max(1.0);
                let stock = rng.range(80.0, 600.0).round();
                let rating = rng.range(2.5, 5.0);
                let return_rate = rng.range(0.01, 0.25);

                // Demand at full price and how strongly discounts lift it.
                let baseline = rng.range(15.0, 70.0);
                let elasticity = rng.range(1.5, 4.0);

                // Four deepening stages with a little jitter per stage.
                let markdowns = [0.10, 0.20, 0.30, 0.40]
                    .map(|base| (base + rng.gauss(0.0, 0.015)).clamp(0.02, 0.60));
                let sales =
                    markdowns.map(|m| sales_at(baseline, elasticity, m, &mut rng));

                records.push(ProductRecord {
                    product_name: format!("{product} {season}"),
                    category: category.to_string(),
                    brand: brands[(cat_idx + prod_idx) % brands.len()].to_string(),
                    season: season.to_string(),
                    original_price: (price * 100.0).round() / 100.0,
                    competitor_price: (competitor_price * 100.0).round() / 100.0,
                    stock_level: stock,
                    promotion_type: promotions[(prod_idx + season_idx) % promotions.len()]
                        .to_string(),
                    rating: (rating * 10.0).round() / 10.0,
                    return_rate: (return_rate * 1000.0).round() / 1000.0,
                    markdown_1: (markdowns[0] * 1000.0).round() / 1000.0,
                    markdown_2: (markdowns[1] * 1000.0).round() / 1000.0,
                    markdown_3: (markdowns[2] * 1000.0).round() / 1000.0,
                    markdown_4: (markdowns[3] * 1000.0).round() / 1000.0,
                    sales_after_m1: sales[0],
                    sales_after_m2: sales[1],
                    sales_after_m3: sales[2],
                    sales_after_m4: sales[3],
                    optimal_discount: revenue_maximizing_depth(baseline, elasticity, price),
                });
            }
        }
    }

    let output_path = "markdown_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    for record in &records {
        writer.serialize(record).expect("Failed to write record");
    }
    writer.flush().expect("Failed to flush writer");

    println!("Wrote {} products to {output_path}", records.len());
}
