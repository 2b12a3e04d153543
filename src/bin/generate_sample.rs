//! Writes a synthetic `df_vendas.csv` for trying out the dashboard.
//!
//! Usage: `generate_sample [SAIDA.csv] [NOTAS]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

const SALESPEOPLE: [&str; 5] = [
    "Ana Souza",
    "Bruno Lima",
    "Carla Mendes",
    "Diego Rocha",
    "Elisa Prado",
];
const STATUSES: [&str; 3] = ["Faturada", "Pendente", "Cancelada"];

/// (product line, description, unit price)
const CATALOG: [(&str, &str, f64); 12] = [
    ("Descartáveis", "Luva Nitrílica Cx 100", 39.9),
    ("Descartáveis", "Seringa 5ml Cx 100", 54.0),
    ("Descartáveis", "Gaze Estéril Pct 10", 6.5),
    ("EPI", "Máscara PFF2", 4.2),
    ("EPI", "Avental Descartável", 3.1),
    ("EPI", "Óculos de Proteção", 18.75),
    ("Equipamentos", "Oxímetro de Dedo", 89.0),
    ("Equipamentos", "Termômetro Digital", 24.9),
    ("Equipamentos", "Esfigmomanômetro", 145.0),
    ("Curativos", "Atadura Crepom 10cm", 2.35),
    ("Curativos", "Esparadrapo 10cm x 4,5m", 9.8),
    ("Curativos", "Curativo Hidrocoloide", 27.6),
];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "NF")]
    invoice: u32,
    #[serde(rename = "Qtd_Produto")]
    quantity: u32,
    #[serde(rename = "Valor_Total_Item")]
    value: f64,
    #[serde(rename = "Total_Custo_Compra")]
    cost: f64,
    #[serde(rename = "Total_Lucro_Venda_Item")]
    profit: f64,
    #[serde(rename = "Linha")]
    product_line: &'static str,
    #[serde(rename = "Vendedor")]
    salesperson: &'static str,
    #[serde(rename = "Mes")]
    month: u32,
    #[serde(rename = "Ano")]
    year: u32,
    #[serde(rename = "situacao")]
    status: &'static str,
    #[serde(rename = "Descricao_produto")]
    product: &'static str,
}

/// SplitMix64: small, deterministic, good enough for sample data.
struct SplitMix(u64);

impl SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Uniform in `[lo, hi)`.
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "df_vendas.csv".to_string()));
    let invoices: u32 = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid invoice count '{n}'"))?,
        None => 400,
    };

    let mut rng = SplitMix(2024);
    let mut writer = csv::Writer::from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    let mut rows = 0usize;

    for nf in 1..=invoices {
        let salesperson = SALESPEOPLE[rng.below(SALESPEOPLE.len())];
        let status = STATUSES[rng.below(STATUSES.len())];
        let year = 2023 + rng.below(2) as u32;
        let month = 1 + rng.below(12) as u32;

        // one to four line items per invoice
        for _ in 0..1 + rng.below(4) {
            let (line, product, price) = CATALOG[rng.below(CATALOG.len())];
            let quantity = 1 + rng.below(50) as u32;
            let value = round2(price * quantity as f64);
            let cost = round2(value * rng.range(0.55, 0.85));

            writer
                .serialize(Row {
                    invoice: 10_000 + nf,
                    quantity,
                    value,
                    cost,
                    profit: round2(value - cost),
                    product_line: line,
                    salesperson,
                    month,
                    year,
                    status,
                    product,
                })
                .context("writing CSV row")?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!(
        "Wrote {rows} line items across {invoices} invoices to {}",
        output.display()
    );
    Ok(())
}
