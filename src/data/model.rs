use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SaleRecord – one row of the sales extract
// ---------------------------------------------------------------------------

/// A single line item of an invoice (one row of the source table).
///
/// Text-like columns keep their raw text so that equality filters compare the
/// value exactly as it appears in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// Invoice number (`NF`). An invoice may span several rows.
    #[serde(rename = "NF")]
    pub invoice: String,
    #[serde(rename = "Descricao_produto")]
    pub product: String,
    #[serde(rename = "Linha")]
    pub product_line: String,
    #[serde(rename = "Vendedor")]
    pub salesperson: String,
    #[serde(rename = "Mes")]
    pub month: String,
    #[serde(rename = "Ano")]
    pub year: String,
    #[serde(rename = "situacao")]
    pub status: String,
    #[serde(rename = "Qtd_Produto")]
    pub quantity: f64,
    #[serde(rename = "Valor_Total_Item")]
    pub value: f64,
    #[serde(rename = "Total_Custo_Compra")]
    pub cost: f64,
    #[serde(rename = "Total_Lucro_Venda_Item")]
    pub profit: f64,
}

/// Column names every source file must provide.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "NF",
    "Qtd_Produto",
    "Valor_Total_Item",
    "Total_Custo_Compra",
    "Total_Lucro_Venda_Item",
    "Linha",
    "Vendedor",
    "Mes",
    "Ano",
    "situacao",
    "Descricao_produto",
];

// ---------------------------------------------------------------------------
// GroupKey / ValueField – typed column selectors
// ---------------------------------------------------------------------------

/// A text column whose distinct values partition records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    ProductLine,
    Salesperson,
    Month,
    Year,
    Status,
    Product,
}

impl GroupKey {
    pub fn of<'a>(&self, record: &'a SaleRecord) -> &'a str {
        match self {
            GroupKey::ProductLine => &record.product_line,
            GroupKey::Salesperson => &record.salesperson,
            GroupKey::Month => &record.month,
            GroupKey::Year => &record.year,
            GroupKey::Status => &record.status,
            GroupKey::Product => &record.product,
        }
    }

    /// Source column name.
    pub fn column(&self) -> &'static str {
        match self {
            GroupKey::ProductLine => "Linha",
            GroupKey::Salesperson => "Vendedor",
            GroupKey::Month => "Mes",
            GroupKey::Year => "Ano",
            GroupKey::Status => "situacao",
            GroupKey::Product => "Descricao_produto",
        }
    }

    /// Human-readable label for axes and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            GroupKey::ProductLine => "Linha de Produto",
            GroupKey::Salesperson => "Vendedor",
            GroupKey::Month => "Mês",
            GroupKey::Year => "Ano",
            GroupKey::Status => "Situação",
            GroupKey::Product => "Produto",
        }
    }
}

/// A numeric column that can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueField {
    Quantity,
    Value,
    Cost,
    Profit,
}

impl ValueField {
    pub fn of(&self, record: &SaleRecord) -> f64 {
        match self {
            ValueField::Quantity => record.quantity,
            ValueField::Value => record.value,
            ValueField::Cost => record.cost,
            ValueField::Profit => record.profit,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            ValueField::Quantity => "Qtd_Produto",
            ValueField::Value => "Valor_Total_Item",
            ValueField::Cost => "Total_Custo_Compra",
            ValueField::Profit => "Total_Lucro_Venda_Item",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ValueField::Quantity => "Quantidade",
            ValueField::Value => "Valor Total de Venda",
            ValueField::Cost => "Custo Total",
            ValueField::Profit => "Lucro Total",
        }
    }
}

impl fmt::Display for ValueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// SalesDataset – the complete loaded extract
// ---------------------------------------------------------------------------

/// Distinct values offered by the filter selectors, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    pub salespeople: Vec<String>,
    pub months: Vec<String>,
    pub years: Vec<String>,
    pub statuses: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        FilterOptions {
            salespeople: distinct(records, GroupKey::Salesperson),
            months: distinct(records, GroupKey::Month),
            years: distinct(records, GroupKey::Year),
            statuses: distinct(records, GroupKey::Status),
        }
    }
}

/// Distinct values of `key` in first-seen order.
pub fn distinct(records: &[SaleRecord], key: GroupKey) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    records
        .iter()
        .map(|r| key.of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// The full parsed extract with pre-computed filter options.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    /// All records in file order.
    pub records: Vec<SaleRecord>,
    pub options: FilterOptions,
}

impl SalesDataset {
    pub fn from_records(records: Vec<SaleRecord>) -> Self {
        let options = FilterOptions::from_records(&records);
        SalesDataset { records, options }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
