use std::path::PathBuf;

use crate::analytics::aggregate::DEFAULT_TOP_N;
use crate::analytics::format::DEFAULT_CURRENCY_SYMBOL;

/// File read at start-up when no path is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "df_vendas.csv";

/// Start-up settings of the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Window title.
    pub title: String,
    pub data_path: PathBuf,
    pub currency_symbol: String,
    /// How many products the ranking shows.
    pub top_n: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Go MED SAÚDE".to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl DashboardConfig {
    /// `painel-vendas [ARQUIVO]`: the optional argument replaces the data path.
    ///
    /// `args` includes the program name, as returned by [`std::env::args`].
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = args.into_iter().nth(1) {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
